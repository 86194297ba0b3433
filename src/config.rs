use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::rank::{Direction, RankMethod, RankOptions, TagOffsets};

/// One tag dimension of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Column holding the tag of each row.
    pub column: String,
    /// Column whose values produce the machine base rank.
    pub rank_column: String,
    /// Manual priority nudges for this tag column.
    #[serde(default)]
    pub offsets: TagOffsets,
}

/// Pipeline settings, read from a JSON file.
///
/// Column names refer to the standardised names (`"Created At"` is
/// `created_at`).
///
/// ```json
/// {
///   "timestamp_column": "created_at",
///   "duplicate_keys": ["comment", "created_at"],
///   "method": "first",
///   "tags": [{ "column": "tag", "rank_column": "votes", "offsets": { "login": -1 } }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub timestamp_column: Option<String>,
    #[serde(default)]
    pub duplicate_keys: Vec<String>,
    #[serde(default = "default_true")]
    pub drop_duplicates: bool,
    #[serde(default)]
    pub method: RankMethod,
    #[serde(default)]
    pub direction: Direction,
    pub tags: Vec<TagConfig>,
    #[serde(default = "default_output_column")]
    pub output_column: String,
}

fn default_true() -> bool {
    true
}

fn default_output_column() -> String {
    "tag_rank".to_string()
}

impl PipelineConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tags.is_empty() {
            bail!("config must name at least one tag column");
        }
        if self.output_column.is_empty() {
            bail!("output_column must not be empty");
        }
        Ok(())
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions::new(self.method, self.direction)
    }
}
