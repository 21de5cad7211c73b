use std::collections::{BTreeMap, BTreeSet};

use super::error::InvalidParameter;
use super::filter::{count_by, dedup_by_attraction, require_day, require_park, rows_for, stable_rank};
use super::model::{Slot, Status, WaitTimeTable};

// ---------------------------------------------------------------------------
// Attraction counts
// ---------------------------------------------------------------------------

/// Distinct attractions per selected park.
///
/// Parks not present in the table produce no entry; an empty selection gives
/// an empty map. Attractions are deduplicated by name within each park, so
/// the same ride observed on both days counts once.
pub fn count_attractions_by_park(
    table: &WaitTimeTable,
    parks: &BTreeSet<String>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for park in parks {
        let rows = table.rows().iter().filter(|r| &r.park == park);
        let distinct = dedup_by_attraction(rows).len();
        if distinct > 0 {
            counts.insert(park.clone(), distinct);
        }
    }
    counts
}

/// Distinct attractions per land in one park, largest first.
///
/// Lands with equal counts keep the order in which they first appear.
pub fn count_attractions_by_land(
    table: &WaitTimeTable,
    park: &str,
) -> Result<Vec<(String, usize)>, InvalidParameter> {
    require_park(table, park)?;
    let rows = dedup_by_attraction(table.rows().iter().filter(|r| r.park == park));
    let mut counts = count_by(rows.iter().map(|r| r.land.as_str()));
    // Stable: ties stay in first-encountered order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Top / bottom wait times
// ---------------------------------------------------------------------------

/// Highest and lowest wait times among open attractions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtremeWaitTimes {
    /// Largest waits first.
    pub top: Vec<(String, f64)>,
    /// Smallest waits first.
    pub bottom: Vec<(String, f64)>,
}

/// Rank the open attractions of `park` on `day` by their `slot` wait time.
///
/// Closed attractions are dropped before ranking. Each side holds at most `k`
/// entries; ties keep table order.
pub fn extreme_wait_times(
    table: &WaitTimeTable,
    day: &str,
    park: &str,
    slot: Slot,
    k: usize,
) -> Result<ExtremeWaitTimes, InvalidParameter> {
    require_day(table, day)?;
    require_park(table, park)?;

    let open: Vec<(&str, f64)> = rows_for(table, park, day)
        .filter(|r| r.open(slot))
        .map(|r| (r.attraction.as_str(), r.wait(slot)))
        .collect();
    let waits: Vec<f64> = open.iter().map(|&(_, w)| w).collect();

    let pick = |descending: bool| -> Vec<(String, f64)> {
        stable_rank(&waits, descending)
            .into_iter()
            .take(k)
            .map(|i| (open[i].0.to_string(), open[i].1))
            .collect()
    };

    Ok(ExtremeWaitTimes {
        top: pick(true),
        bottom: pick(false),
    })
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// Open/closed counts for each slot of one park on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureCounts {
    counts: BTreeMap<(Slot, Status), usize>,
}

impl ClosureCounts {
    pub fn get(&self, slot: Slot, status: Status) -> usize {
        self.counts.get(&(slot, status)).copied().unwrap_or(0)
    }

    /// Open plus closed for `slot`; equal to the number of matching rows.
    pub fn total(&self, slot: Slot) -> usize {
        self.get(slot, Status::Open) + self.get(slot, Status::Closed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Status, usize)> + '_ {
        self.counts.iter().map(|(&(slot, status), &n)| (slot, status, n))
    }
}

/// Count open and closed attractions per slot for `park` on `day`.
pub fn closure_counts(
    table: &WaitTimeTable,
    park: &str,
    day: &str,
) -> Result<ClosureCounts, InvalidParameter> {
    require_park(table, park)?;
    require_day(table, day)?;

    let mut counts: BTreeMap<(Slot, Status), usize> = Slot::ALL
        .into_iter()
        .flat_map(|slot| [((slot, Status::Open), 0), ((slot, Status::Closed), 0)])
        .collect();
    for row in rows_for(table, park, day) {
        for slot in Slot::ALL {
            *counts.entry((slot, row.status(slot))).or_insert(0) += 1;
        }
    }
    Ok(ClosureCounts { counts })
}

/// Names of attractions closed during `slot` for `park` on `day`.
pub fn closed_attraction_names(
    table: &WaitTimeTable,
    park: &str,
    day: &str,
    slot: Slot,
) -> Result<BTreeSet<String>, InvalidParameter> {
    require_park(table, park)?;
    require_day(table, day)?;
    Ok(rows_for(table, park, day)
        .filter(|r| !r.open(slot))
        .map(|r| r.attraction.clone())
        .collect())
}

// ---------------------------------------------------------------------------
// Wait-time distributions
// ---------------------------------------------------------------------------

/// One observed wait time in long form.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitSample {
    pub day: String,
    pub slot: Slot,
    pub wait_time: f64,
}

/// Long-form wait times for `park`: three samples (M, A, E) per fully
/// measured row, in table order. Rows with any zero wait are skipped.
pub fn wait_time_samples(
    table: &WaitTimeTable,
    park: &str,
) -> Result<Vec<WaitSample>, InvalidParameter> {
    require_park(table, park)?;
    Ok(table
        .rows()
        .iter()
        .filter(|r| r.park == park && r.fully_measured())
        .flat_map(|r| {
            Slot::ALL.into_iter().map(move |slot| WaitSample {
                day: r.day.clone(),
                slot,
                wait_time: r.wait(slot),
            })
        })
        .collect())
}

/// Box-plot statistics for one (day, slot) group.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub day: String,
    pub slot: Slot,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summaries per (day, slot), groups in first-seen order.
pub fn summarize_samples(samples: &[WaitSample]) -> Vec<DistributionSummary> {
    let mut groups: Vec<((&str, Slot), Vec<f64>)> = Vec::new();
    for s in samples {
        let key = (s.day.as_str(), s.slot);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(s.wait_time),
            None => groups.push((key, vec![s.wait_time])),
        }
    }

    groups
        .into_iter()
        .map(|((day, slot), mut values)| {
            values.sort_by(f64::total_cmp);
            DistributionSummary {
                day: day.to_string(),
                slot,
                count: values.len(),
                min: values[0],
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// Linear-interpolated quantile of non-empty sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    const HEADER: &str =
        "park,land,attraction,day,wait_time_M,wait_time_A,wait_time_E,is_open_M,is_open_A,is_open_E";

    fn table(rows: &[&str]) -> WaitTimeTable {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        parse_csv(text.as_bytes()).unwrap()
    }

    /// The three-row scenario: RideA seen on two days, RideB closed.
    fn scenario() -> WaitTimeTable {
        table(&[
            "ParkA,LandX,RideA,Fri,10,0,0,1,1,1",
            "ParkA,LandX,RideA,Sat,20,0,0,1,1,1",
            "ParkA,LandY,RideB,Fri,5,0,0,0,1,1",
        ])
    }

    fn parks(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn park_mix() -> WaitTimeTable {
        table(&[
            "Magic,Fantasyland,Dumbo,Fri,30,45,20,1,1,1",
            "Magic,Fantasyland,Teacups,Fri,15,0,10,1,0,1",
            "Magic,Tomorrowland,Space,Fri,60,75,50,1,1,0",
            "Magic,Frontierland,Thunder,Fri,40,55,35,1,1,1",
            "Magic,Fantasyland,Dumbo,Sat,25,40,15,1,1,1",
            "Magic,Fantasyland,Teacups,Sat,20,25,10,1,1,1",
            "Magic,Tomorrowland,Space,Sat,70,80,0,1,1,0",
            "Magic,Frontierland,Thunder,Sat,45,50,30,0,1,1",
            "Epcot,World,Frozen,Fri,90,100,60,1,1,1",
            "Epcot,World,Frozen,Sat,80,95,55,1,1,1",
        ])
    }

    #[test]
    fn test_scenario_counts_dedupe_across_days() {
        let t = scenario();
        let by_park = count_attractions_by_park(&t, &parks(&["ParkA"]));
        assert_eq!(by_park, BTreeMap::from([("ParkA".to_string(), 2)]));

        let by_land = count_attractions_by_land(&t, "ParkA").unwrap();
        assert_eq!(
            by_land,
            vec![("LandX".to_string(), 1), ("LandY".to_string(), 1)]
        );
    }

    #[test]
    fn test_scenario_extremes_skip_closed_ride() {
        let t = scenario();
        let result = extreme_wait_times(&t, "Fri", "ParkA", Slot::Morning, 5).unwrap();
        assert_eq!(result.top, vec![("RideA".to_string(), 10.0)]);
        assert_eq!(result.bottom, vec![("RideA".to_string(), 10.0)]);
    }

    #[test]
    fn test_count_by_park_keys_are_selected_parks_in_table() {
        let t = park_mix();
        let counts = count_attractions_by_park(&t, &parks(&["Magic", "Epcot", "Nowhere"]));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Magic"], 4);
        assert_eq!(counts["Epcot"], 1);

        assert!(count_attractions_by_park(&t, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_land_counts_sorted_descending_and_sum_to_park_count() {
        let t = park_mix();
        let lands = count_attractions_by_land(&t, "Magic").unwrap();
        assert_eq!(
            lands,
            vec![
                ("Fantasyland".to_string(), 2),
                ("Tomorrowland".to_string(), 1),
                ("Frontierland".to_string(), 1),
            ]
        );

        for park in t.parks() {
            let total: usize = count_attractions_by_land(&t, park)
                .unwrap()
                .iter()
                .map(|(_, n)| n)
                .sum();
            let by_park = count_attractions_by_park(&t, &parks(&[park.as_str()]));
            assert_eq!(total, by_park[park]);
        }
    }

    #[test]
    fn test_land_counts_unknown_park() {
        let err = count_attractions_by_land(&park_mix(), "Nowhere").unwrap_err();
        assert_eq!(err, InvalidParameter::UnknownPark("Nowhere".to_string()));
    }

    #[test]
    fn test_extremes_rank_and_cap_at_k() {
        let t = park_mix();
        let result = extreme_wait_times(&t, "Fri", "Magic", Slot::Morning, 2).unwrap();
        assert_eq!(
            result.top,
            vec![("Space".to_string(), 60.0), ("Thunder".to_string(), 40.0)]
        );
        assert_eq!(
            result.bottom,
            vec![("Teacups".to_string(), 15.0), ("Dumbo".to_string(), 30.0)]
        );
    }

    #[test]
    fn test_extremes_fewer_open_rides_than_k() {
        let t = park_mix();
        // Afternoon on Friday: Teacups is closed, three rides remain.
        let result = extreme_wait_times(&t, "Fri", "Magic", Slot::Afternoon, 5).unwrap();
        assert_eq!(result.top.len(), 3);
        assert_eq!(result.bottom.len(), 3);
        assert!(result.top.iter().all(|(name, _)| name != "Teacups"));
        assert_eq!(result.bottom[0], ("Dumbo".to_string(), 45.0));
    }

    #[test]
    fn test_extremes_ties_keep_table_order() {
        let t = table(&[
            "P,L,First,Fri,10,0,0,1,1,1",
            "P,L,Second,Fri,10,0,0,1,1,1",
            "P,L,Third,Fri,10,0,0,1,1,1",
        ]);
        let result = extreme_wait_times(&t, "Fri", "P", Slot::Morning, 2).unwrap();
        let names = |v: &[(String, f64)]| v.iter().map(|(n, _)| n.clone()).collect::<Vec<_>>();
        assert_eq!(names(&result.top), vec!["First", "Second"]);
        assert_eq!(names(&result.bottom), vec!["First", "Second"]);
    }

    #[test]
    fn test_extremes_no_match_is_empty_not_error() {
        let t = table(&[
            "P,L,A,Fri,10,0,0,0,1,1",
            "Q,L,B,Sat,10,0,0,1,1,1",
        ]);
        // P exists and Sat exists, but P has no Saturday rows.
        let none = extreme_wait_times(&t, "Sat", "P", Slot::Morning, 5).unwrap();
        assert_eq!(none, ExtremeWaitTimes::default());
        // All of P's Friday rides are closed in the morning.
        let closed = extreme_wait_times(&t, "Fri", "P", Slot::Morning, 5).unwrap();
        assert!(closed.top.is_empty() && closed.bottom.is_empty());
    }

    #[test]
    fn test_extremes_unknown_day() {
        let err = extreme_wait_times(&park_mix(), "Sun", "Magic", Slot::Evening, 5).unwrap_err();
        assert_eq!(err, InvalidParameter::UnknownDay("Sun".to_string()));
    }

    #[test]
    fn test_closure_counts_totals_match_rows() {
        let t = park_mix();
        let counts = closure_counts(&t, "Magic", "Sat").unwrap();
        assert_eq!(counts.get(Slot::Morning, Status::Open), 3);
        assert_eq!(counts.get(Slot::Morning, Status::Closed), 1);
        assert_eq!(counts.get(Slot::Evening, Status::Closed), 1);
        for slot in Slot::ALL {
            assert_eq!(counts.total(slot), 4);
        }
        assert_eq!(counts.iter().count(), 6);
    }

    #[test]
    fn test_closure_counts_no_rows_are_zero() {
        let t = table(&["P,L,A,Fri,1,1,1,1,1,1", "Q,L,B,Sat,1,1,1,1,1,1"]);
        let counts = closure_counts(&t, "P", "Sat").unwrap();
        for slot in Slot::ALL {
            assert_eq!(counts.total(slot), 0);
        }
    }

    #[test]
    fn test_closed_attraction_names() {
        let t = park_mix();
        let closed = closed_attraction_names(&t, "Magic", "Fri", Slot::Evening).unwrap();
        assert_eq!(closed, parks(&["Space"]));
        let none = closed_attraction_names(&t, "Epcot", "Fri", Slot::Morning).unwrap();
        assert!(none.is_empty());
        assert!(closed_attraction_names(&t, "Magic", "Mon", Slot::Evening).is_err());
    }

    #[test]
    fn test_wait_time_samples_skip_rows_with_zero_wait() {
        let t = park_mix();
        let samples = wait_time_samples(&t, "Magic").unwrap();
        // Teacups Fri (A = 0) and Space Sat (E = 0) are excluded.
        assert_eq!(samples.len(), 6 * 3);
        assert_eq!(
            samples[0],
            WaitSample {
                day: "Fri".to_string(),
                slot: Slot::Morning,
                wait_time: 30.0,
            }
        );
        assert_eq!(samples[1].slot, Slot::Afternoon);
        assert_eq!(samples[2].slot, Slot::Evening);
        assert!(samples.iter().all(|s| s.wait_time != 0.0));
    }

    #[test]
    fn test_summarize_samples_quartiles() {
        let samples: Vec<WaitSample> = [10.0, 20.0, 30.0, 40.0]
            .into_iter()
            .map(|w| WaitSample {
                day: "Fri".to_string(),
                slot: Slot::Morning,
                wait_time: w,
            })
            .collect();
        let summary = summarize_samples(&samples);
        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.q1, 17.5);
        assert_eq!(s.median, 25.0);
        assert_eq!(s.q3, 32.5);
        assert_eq!(s.max, 40.0);
    }

    #[test]
    fn test_summaries_grouped_by_day_and_slot() {
        let t = park_mix();
        let summary = summarize_samples(&wait_time_samples(&t, "Magic").unwrap());
        assert_eq!(summary.len(), 6);
        assert_eq!((summary[0].day.as_str(), summary[0].slot), ("Fri", Slot::Morning));
        assert_eq!((summary[3].day.as_str(), summary[3].slot), ("Sat", Slot::Morning));
        assert_eq!(summary[3].count, 3);
    }

    #[test]
    fn test_aggregators_are_idempotent() {
        let t = park_mix();
        assert_eq!(
            extreme_wait_times(&t, "Sat", "Magic", Slot::Afternoon, 3),
            extreme_wait_times(&t, "Sat", "Magic", Slot::Afternoon, 3)
        );
        assert_eq!(
            count_attractions_by_land(&t, "Magic"),
            count_attractions_by_land(&t, "Magic")
        );
        assert_eq!(wait_time_samples(&t, "Epcot"), wait_time_samples(&t, "Epcot"));

        let selected = parks(&["Magic", "Epcot"]);
        assert_eq!(
            count_attractions_by_park(&t, &selected),
            count_attractions_by_park(&t, &selected)
        );
        assert_eq!(
            closure_counts(&t, "Magic", "Fri"),
            closure_counts(&t, "Magic", "Fri")
        );
        assert_eq!(
            closed_attraction_names(&t, "Magic", "Sat", Slot::Morning),
            closed_attraction_names(&t, "Magic", "Sat", Slot::Morning)
        );
    }

    #[test]
    fn test_wait_time_samples_unknown_park() {
        let err = wait_time_samples(&park_mix(), "Nowhere").unwrap_err();
        assert_eq!(err, InvalidParameter::UnknownPark("Nowhere".to_string()));
    }
}
