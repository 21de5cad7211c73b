use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::InvalidParameter;

// ---------------------------------------------------------------------------
// Slot – one of the three sampled times of day
// ---------------------------------------------------------------------------

/// Time of day at which wait times and open status were sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Morning,
    Afternoon,
    Evening,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Afternoon, Slot::Evening];

    /// Column suffix used by the source CSV (`wait_time_M`, `is_open_M`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Slot::Morning => "M",
            Slot::Afternoon => "A",
            Slot::Evening => "E",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::Afternoon => "Afternoon",
            Slot::Evening => "Evening",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Slot {
    type Err = InvalidParameter;

    /// Accepts either the column code (`M`) or the full name (`morning`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Slot::ALL
            .into_iter()
            .find(|slot| t.eq_ignore_ascii_case(slot.code()) || t.eq_ignore_ascii_case(slot.label()))
            .ok_or_else(|| InvalidParameter::UnknownSlot(s.to_string()))
    }
}

/// Operational status of an attraction in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Open,
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => f.write_str("Open"),
            Status::Closed => f.write_str("Closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// AttractionRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One attraction at one park on one observed day.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionRecord {
    pub park: String,
    pub land: String,
    pub attraction: String,
    pub day: String,
    /// Minutes per slot, indexed by `Slot as usize`. 0 means "not measured".
    pub wait_time: [f64; 3],
    /// Open flag per slot, indexed by `Slot as usize`.
    pub is_open: [bool; 3],
}

impl AttractionRecord {
    pub fn wait(&self, slot: Slot) -> f64 {
        self.wait_time[slot as usize]
    }

    pub fn open(&self, slot: Slot) -> bool {
        self.is_open[slot as usize]
    }

    pub fn status(&self, slot: Slot) -> Status {
        if self.open(slot) {
            Status::Open
        } else {
            Status::Closed
        }
    }

    /// Whether every slot carries a real (non-zero) wait time.
    pub fn fully_measured(&self) -> bool {
        self.wait_time.iter().all(|&w| w != 0.0)
    }
}

// ---------------------------------------------------------------------------
// WaitTimeTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable table of attraction records, in source row order.
#[derive(Debug, Clone, Default)]
pub struct WaitTimeTable {
    rows: Vec<AttractionRecord>,
    parks: Vec<String>,
    days: Vec<String>,
}

impl WaitTimeTable {
    /// Build the table and its distinct-value indices from parsed rows.
    pub fn from_records(rows: Vec<AttractionRecord>) -> Self {
        let parks = distinct_in_order(rows.iter().map(|r| r.park.as_str()));
        let days = distinct_in_order(rows.iter().map(|r| r.day.as_str()));
        WaitTimeTable { rows, parks, days }
    }

    pub fn rows(&self) -> &[AttractionRecord] {
        &self.rows
    }

    /// Distinct parks in first-seen order.
    pub fn parks(&self) -> &[String] {
        &self.parks
    }

    /// Distinct days in first-seen order.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Distinct parks observed on `day`, first-seen order.
    pub fn parks_on(&self, day: &str) -> Vec<String> {
        distinct_in_order(
            self.rows
                .iter()
                .filter(|r| r.day == day)
                .map(|r| r.park.as_str()),
        )
    }

    pub fn has_park(&self, park: &str) -> bool {
        self.parks.iter().any(|p| p == park)
    }

    pub fn has_day(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
