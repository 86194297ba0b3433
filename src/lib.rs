//! Cleaning, de-duplication and tag ranking for feedback-tagging datasets.
//!
//! The building blocks are plain functions over a [`RecordSet`]:
//! [`standardise_columns`], [`convert_object_to_datetime`],
//! [`find_duplicated_rows`], [`rank_rows`], [`rank_tags`] and
//! [`rank_multiple_tags`]. [`pipeline::run`] chains them as configured by a
//! [`PipelineConfig`].

pub mod clean;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod rank;

pub use clean::{convert_object_to_datetime, standardise_columns};
pub use config::{PipelineConfig, TagConfig};
pub use data::filter::{find_duplicated_rows, sort_and_drop_duplicates};
pub use data::model::{Column, DType, RecordSet, Value};
pub use error::{FrameError, Result};
pub use rank::{
    rank_multiple_tags, rank_rows, rank_tags, Direction, RankMethod, RankOptions, RankStatistic,
    TagOffsets, TagRanking,
};
