use std::collections::{HashMap, HashSet};

use log::debug;

use super::model::{RecordSet, Value};
use crate::error::Result;
use crate::rank::Direction;

// ---------------------------------------------------------------------------
// Key extraction: which cells identify a row for de-duplication
// ---------------------------------------------------------------------------

/// Per-row key tuples over `key_columns`, in row order.
fn row_keys<'a>(records: &'a RecordSet, key_columns: &[&str]) -> Result<Vec<Vec<&'a Value>>> {
    let cols = key_columns
        .iter()
        .map(|name| records.column(name))
        .collect::<Result<Vec<_>>>()?;

    Ok((0..records.len())
        .map(|row| cols.iter().map(|c| &c.values[row]).collect())
        .collect())
}

/// Return every row whose key-column values occur in at least one other row.
///
/// All occurrences are returned, the first one included, in original order
/// and with their original index labels. Rows with a unique key are
/// excluded. An empty result keeps the input's columns and dtypes.
pub fn find_duplicated_rows(records: &RecordSet, key_columns: &[&str]) -> Result<RecordSet> {
    let keys = row_keys(records, key_columns)?;

    let mut counts: HashMap<&[&Value], usize> = HashMap::with_capacity(keys.len());
    for key in &keys {
        *counts.entry(key.as_slice()).or_default() += 1;
    }

    let positions: Vec<usize> = keys
        .iter()
        .enumerate()
        .filter(|(_, key)| counts.get(key.as_slice()).is_some_and(|&n| n > 1))
        .map(|(i, _)| i)
        .collect();

    debug!(
        "{} of {} rows share a key over {:?}",
        positions.len(),
        records.len(),
        key_columns
    );
    Ok(records.take(&positions))
}

/// Stable-sort by `sort_column` (missing cells last) and keep the first row
/// of every key combination over `key_columns`.
pub fn sort_and_drop_duplicates(
    records: &RecordSet,
    sort_column: &str,
    direction: Direction,
    key_columns: &[&str],
) -> Result<RecordSet> {
    let sort_values = &records.column(sort_column)?.values;
    let keys = row_keys(records, key_columns)?;

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        let (va, vb) = (&sort_values[a], &sort_values[b]);
        match (va.is_missing(), vb.is_missing()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => direction.apply(va.sort_cmp(vb)),
        }
    });

    let mut seen: HashSet<&[&Value]> = HashSet::with_capacity(keys.len());
    let kept: Vec<usize> = order
        .into_iter()
        .filter(|&pos| seen.insert(keys[pos].as_slice()))
        .collect();

    debug!(
        "dropped {} duplicate rows after sorting by '{sort_column}'",
        records.len() - kept.len()
    );
    Ok(records.take(&kept))
}
