//! Ranking engine: per-row ranks and manual tag priority adjustment.
//!
//! ```text
//!   column values ──► rows::rank_rows ──► base ranks
//!                                             │
//!   tag column + TagOffsets ──► tags::rank_tags ◄┘
//!                                   │
//!                       statistic::RankStatistic (seam)
//! ```

pub mod rows;
pub mod statistic;
pub mod tags;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

pub use rows::rank_rows;
pub use statistic::{RankStatistic, ReservedSlots};
pub use tags::{rank_multiple_tags, rank_tags, rank_tags_with, TagOffsets, TagRanking};

/// How tied values share ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    /// Mean of the positions the tied rows occupy.
    #[default]
    Average,
    /// Lowest position of the tie group.
    Min,
    /// Highest position of the tie group.
    Max,
    /// Earlier rows win ties.
    First,
    /// Like `Min`, without gaps between groups.
    Dense,
}

impl RankMethod {
    pub const ALL: [RankMethod; 5] = [
        RankMethod::Average,
        RankMethod::Min,
        RankMethod::Max,
        RankMethod::First,
        RankMethod::Dense,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RankMethod::Average => "average",
            RankMethod::Min => "min",
            RankMethod::Max => "max",
            RankMethod::First => "first",
            RankMethod::Dense => "dense",
        }
    }
}

impl fmt::Display for RankMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMethod {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| FrameError::UnknownRankMethod(s.to_string()))
    }
}

/// Which end of the column gets rank 1.
///
/// Defaults to `Descending`: the largest value is ranked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest value gets rank 1.
    Ascending,
    /// Largest value gets rank 1.
    #[default]
    Descending,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// Per-call ranking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankOptions {
    #[serde(default)]
    pub method: RankMethod,
    #[serde(default)]
    pub direction: Direction,
}

impl RankOptions {
    pub fn new(method: RankMethod, direction: Direction) -> Self {
        RankOptions { method, direction }
    }
}
