use super::tags::TagOffsets;

/// Folds a row's base rank and its tag's manual offset into one priority
/// value. Lower values are surfaced first.
///
/// Implementations must be monotonic in `offset`: lowering a tag's offset
/// never moves it behind tags whose offset is unchanged.
pub trait RankStatistic {
    fn get_rank_statistic(&self, base_rank: f64, offset: i64) -> f64;
}

/// Reserves the first priority positions for manually boosted tags.
///
/// With `slots` the largest boost (`-offset`) in the mapping, a tag with
/// offset `-k` lands on `slots + 1 - k`, so the biggest boost gets 1.
/// Rows without an offset follow behind every reserved position at
/// `base_rank + slots + 1`, and a positive offset pushes a row further
/// back by that amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservedSlots {
    slots: i64,
}

impl ReservedSlots {
    pub fn new(slots: i64) -> Self {
        ReservedSlots {
            slots: slots.max(0),
        }
    }

    pub fn from_offsets(offsets: &TagOffsets) -> Self {
        Self::new(offsets.values().map(|&o| o.saturating_neg()).max().unwrap_or(0))
    }

    pub fn slots(&self) -> i64 {
        self.slots
    }
}

impl RankStatistic for ReservedSlots {
    fn get_rank_statistic(&self, base_rank: f64, offset: i64) -> f64 {
        if offset < 0 {
            // i128: `slots + 1` and `offset` may sit at the ends of i64.
            (i128::from(self.slots) + 1 + i128::from(offset)) as f64
        } else {
            base_rank + self.slots as f64 + 1.0 + offset as f64
        }
    }
}

impl<F: Fn(f64, i64) -> f64> RankStatistic for F {
    fn get_rank_statistic(&self, base_rank: f64, offset: i64) -> f64 {
        self(base_rank, offset)
    }
}
