use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::config::{DashboardConfig, DataSource};
use crate::data::loader;
use crate::data::model::{Slot, WaitTimeTable};

// ---------------------------------------------------------------------------
// Per-section selections
// ---------------------------------------------------------------------------

/// Parks picked for the attraction-count comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParkComparison {
    pub parks: BTreeSet<String>,
}

/// Park whose lands are broken down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandSelection {
    pub park: String,
}

/// Inputs of the highest/lowest wait tables.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitRanking {
    pub day: String,
    pub park: String,
    pub slot: Slot,
    pub top_n: usize,
}

/// Inputs of the open/closed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureSelection {
    pub park: String,
    pub day: String,
    /// Slot whose closed attractions are listed by name.
    pub slot: Slot,
}

/// Park whose wait-time distribution is plotted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionSelection {
    pub park: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a load succeeds).
    pub dataset: Option<WaitTimeTable>,

    /// Where the current table came from.
    pub source: DataSource,

    pub comparison: ParkComparison,
    pub lands: LandSelection,
    pub ranking: WaitRanking,
    pub closures: ClosureSelection,
    pub distribution: DistributionSelection,

    /// Colour per park, shared by every chart.
    pub park_colors: ColorMap,

    /// Colour per day for the distribution plot.
    pub day_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            source: config.source.clone(),
            comparison: ParkComparison::default(),
            lands: LandSelection::default(),
            ranking: WaitRanking {
                day: String::new(),
                park: String::new(),
                slot: Slot::Morning,
                top_n: config.top_n,
            },
            closures: ClosureSelection {
                park: String::new(),
                day: String::new(),
                slot: Slot::Morning,
            },
            distribution: DistributionSelection::default(),
            park_colors: ColorMap::new(std::iter::empty()),
            day_colors: ColorMap::new(std::iter::empty()),
            status_message: None,
        }
    }

    /// Load the table from `source`, replacing the current one on success.
    ///
    /// On failure the previous table (if any) stays and the error is shown.
    pub fn load(&mut self, source: DataSource) {
        let result = match &source {
            DataSource::Url(url) => loader::load(url),
            DataSource::File(path) => loader::load_file(path),
        };
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows for parks {:?}",
                    table.len(),
                    table.parks()
                );
                self.source = source;
                self.set_dataset(table);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and point every selection at its first
    /// park and day.
    pub fn set_dataset(&mut self, table: WaitTimeTable) {
        let first_park = table.parks().first().cloned().unwrap_or_default();
        let first_day = table.days().first().cloned().unwrap_or_default();

        self.comparison.parks.clear();
        self.lands.park = first_park.clone();
        self.ranking.day = first_day.clone();
        self.ranking.park = table.parks_on(&first_day).first().cloned().unwrap_or_default();
        self.closures.park = first_park.clone();
        self.closures.day = first_day;
        self.distribution.park = first_park;

        self.park_colors = ColorMap::new(table.parks().iter().map(String::as_str));
        self.day_colors = ColorMap::new(table.days().iter().map(String::as_str));

        self.dataset = Some(table);
        self.status_message = None;
    }

    /// Change the ranking day; the park list narrows to parks seen that day.
    /// `dataset` is empty while the dashboard renders, so the table is passed in.
    pub fn set_ranking_day(&mut self, table: &WaitTimeTable, day: String) {
        let parks = table.parks_on(&day);
        if !parks.contains(&self.ranking.park) {
            self.ranking.park = parks.first().cloned().unwrap_or_default();
        }
        self.ranking.day = day;
    }

    /// Toggle a park in the comparison set.
    pub fn toggle_compared_park(&mut self, park: &str) {
        if !self.comparison.parks.remove(park) {
            self.comparison.parks.insert(park.to_string());
        }
    }

    /// Select every park of `table` for comparison.
    pub fn compare_all(&mut self, table: &WaitTimeTable) {
        self.comparison.parks = table.parks().iter().cloned().collect();
    }

    /// Clear the comparison set.
    pub fn compare_none(&mut self) {
        self.comparison.parks.clear();
    }
}
