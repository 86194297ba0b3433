use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::statistic::{RankStatistic, ReservedSlots};
use crate::data::model::{RecordSet, Value};
use crate::error::{FrameError, Result};

// ---------------------------------------------------------------------------
// TagOffsets – sparse manual priority nudges
// ---------------------------------------------------------------------------

/// Manual per-tag offsets: tag → signed nudge. More negative means more
/// prioritized. Tags not in the map have offset 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagOffsets(BTreeMap<String, i64>);

impl TagOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The offset for `tag`; 0 when the tag has none.
    pub fn offset(&self, tag: &str) -> i64 {
        self.0.get(tag).copied().unwrap_or(0)
    }

    pub fn values(&self) -> impl Iterator<Item = &i64> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for TagOffsets {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        TagOffsets(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Offset for one tag cell. Null tags have none.
fn cell_offset(offsets: &TagOffsets, tag: &Value) -> i64 {
    match tag {
        Value::Null => 0,
        Value::String(s) => offsets.offset(s),
        other => offsets.offset(&other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Single tag column
// ---------------------------------------------------------------------------

/// Fold manual tag offsets into `base_ranks` with the default
/// [`ReservedSlots`] statistic. See [`rank_tags_with`].
pub fn rank_tags(
    records: &RecordSet,
    tag_column: &str,
    base_ranks: &[f64],
    tag_offsets: &TagOffsets,
) -> Result<Vec<f64>> {
    let statistic = ReservedSlots::from_offsets(tag_offsets);
    debug!(
        "reserving {} priority slots for {} manual tag offsets",
        statistic.slots(),
        tag_offsets.len()
    );
    rank_tags_with(records, tag_column, base_ranks, tag_offsets, &statistic)
}

/// Combine each row's base rank with its tag's offset through `statistic`.
///
/// `base_ranks` is aligned to `records` by position, so its length must
/// match the row count exactly. Every row goes through `statistic`, with
/// or without an offset. The result keeps the input row order.
pub fn rank_tags_with<S: RankStatistic + ?Sized>(
    records: &RecordSet,
    tag_column: &str,
    base_ranks: &[f64],
    tag_offsets: &TagOffsets,
    statistic: &S,
) -> Result<Vec<f64>> {
    if base_ranks.len() != records.len() {
        return Err(FrameError::LengthMismatch {
            base_ranks: base_ranks.len(),
            records: records.len(),
        });
    }
    let tags = &records.column(tag_column)?.values;

    Ok(tags
        .iter()
        .zip(base_ranks)
        .map(|(tag, &base)| statistic.get_rank_statistic(base, cell_offset(tag_offsets, tag)))
        .collect())
}

// ---------------------------------------------------------------------------
// Several tag columns
// ---------------------------------------------------------------------------

/// One tag dimension: the tag column, its base ranks and its offsets.
#[derive(Debug, Clone, Copy)]
pub struct TagRanking<'a> {
    pub column: &'a str,
    pub base_ranks: &'a [f64],
    pub offsets: &'a TagOffsets,
}

/// Adjust every tag dimension independently, then keep each row's best
/// (lowest) adjusted value across dimensions.
///
/// `NaN` in one dimension is ignored; a row is `NaN` only when it is `NaN`
/// everywhere.
pub fn rank_multiple_tags(records: &RecordSet, rankings: &[TagRanking<'_>]) -> Result<Vec<f64>> {
    let (first, rest) = rankings.split_first().ok_or(FrameError::NoTagColumns)?;

    let mut combined = rank_tags(records, first.column, first.base_ranks, first.offsets)?;
    for ranking in rest {
        let adjusted = rank_tags(records, ranking.column, ranking.base_ranks, ranking.offsets)?;
        for (best, value) in combined.iter_mut().zip(adjusted) {
            *best = best.min(value);
        }
    }

    info!(
        "combined {} tag columns over {} rows",
        rankings.len(),
        records.len()
    );
    Ok(combined)
}
