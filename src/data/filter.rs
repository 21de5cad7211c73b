use std::collections::BTreeSet;

use super::error::InvalidParameter;
use super::model::{AttractionRecord, WaitTimeTable};

// ---------------------------------------------------------------------------
// Row predicates and parameter checks
// ---------------------------------------------------------------------------

/// Ensure `park` names a park present in the table.
pub fn require_park(table: &WaitTimeTable, park: &str) -> Result<(), InvalidParameter> {
    if table.has_park(park) {
        Ok(())
    } else {
        Err(InvalidParameter::UnknownPark(park.to_string()))
    }
}

/// Ensure `day` names a day present in the table.
pub fn require_day(table: &WaitTimeTable, day: &str) -> Result<(), InvalidParameter> {
    if table.has_day(day) {
        Ok(())
    } else {
        Err(InvalidParameter::UnknownDay(day.to_string()))
    }
}

/// Rows of `park` on `day`, in table order.
pub fn rows_for<'a>(
    table: &'a WaitTimeTable,
    park: &'a str,
    day: &'a str,
) -> impl Iterator<Item = &'a AttractionRecord> + 'a {
    table
        .rows()
        .iter()
        .filter(move |r| r.park == park && r.day == day)
}

// ---------------------------------------------------------------------------
// Grouping primitives
// ---------------------------------------------------------------------------

/// Keep the first row for each attraction name, dropping later repeats
/// (from either day). Input order is preserved.
pub fn dedup_by_attraction<'a>(
    rows: impl IntoIterator<Item = &'a AttractionRecord>,
) -> Vec<&'a AttractionRecord> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    rows.into_iter()
        .filter(|r| seen.insert(r.attraction.as_str()))
        .collect()
}

/// Count occurrences per key, keys in first-encountered order.
pub fn count_by<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for k in keys {
        match counts.iter_mut().find(|(name, _)| name == k) {
            Some((_, n)) => *n += 1,
            None => counts.push((k.to_string(), 1)),
        }
    }
    counts
}

/// Indices of `values` ordered ascending or descending, ties kept in input order.
pub fn stable_rank(values: &[f64], descending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    // sort_by is stable, so equal values keep their original order.
    order.sort_by(|&a, &b| {
        let ord = values[a].total_cmp(&values[b]);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    order
}
