use log::debug;

use super::{RankMethod, RankOptions};
use crate::data::model::{RecordSet, Value};
use crate::error::Result;

/// Rank every row of `column`, aligned to the input row order.
///
/// Ranks run from 1 to the number of non-missing cells; missing cells
/// (null or NaN) are ranked `NaN`. Ties are resolved by `options.method`,
/// and `options.direction` only decides which end of the column is rank 1.
pub fn rank_rows(records: &RecordSet, column: &str, options: RankOptions) -> Result<Vec<f64>> {
    let values = &records.column(column)?.values;
    let ranks = rank_values(values, options);
    debug!(
        "ranked {} rows of '{column}' ({}, {:?})",
        ranks.len(),
        options.method,
        options.direction
    );
    Ok(ranks)
}

/// Rank a slice of cells; see [`rank_rows`].
pub fn rank_values(values: &[Value], options: RankOptions) -> Vec<f64> {
    let mut ranks = vec![f64::NAN; values.len()];

    let mut order: Vec<usize> = (0..values.len())
        .filter(|&i| !values[i].is_missing())
        .collect();
    // Stable: tied rows stay in row order, which `First` relies on.
    order.sort_by(|&a, &b| options.direction.apply(values[a].sort_cmp(&values[b])));

    let mut dense = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].sort_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        dense += 1.0;

        // Positions start+1..=end are occupied by this tie group.
        let lowest = (start + 1) as f64;
        let highest = end as f64;
        for (offset, &row) in order[start..end].iter().enumerate() {
            ranks[row] = match options.method {
                RankMethod::Average => (lowest + highest) / 2.0,
                RankMethod::Min => lowest,
                RankMethod::Max => highest,
                RankMethod::First => lowest + offset as f64,
                RankMethod::Dense => dense,
            };
        }
        start = end;
    }
    ranks
}
