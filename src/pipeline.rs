use log::{info, warn};

use crate::clean::{convert_object_to_datetime, standardise_columns};
use crate::config::PipelineConfig;
use crate::data::filter::{find_duplicated_rows, sort_and_drop_duplicates};
use crate::data::model::{Column, DType, RecordSet, Value};
use crate::error::Result;
use crate::rank::{rank_multiple_tags, rank_rows, Direction, TagRanking};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Cleaned, de-duplicated records with the output rank column appended.
    pub records: RecordSet,
    /// Rows that shared their duplicate key with another row.
    pub duplicates: RecordSet,
}

/// Run the cleaning and ranking steps in order:
/// standardise names → coerce timestamps → report and drop duplicates →
/// base ranks per tag column → manual tag adjustment.
pub fn run(records: RecordSet, config: &PipelineConfig) -> Result<PipelineOutput> {
    let mut records = standardise_columns(records);

    if let Some(column) = &config.timestamp_column {
        records = convert_object_to_datetime(records, column)?;
    }

    let keys: Vec<&str> = config.duplicate_keys.iter().map(String::as_str).collect();
    let duplicates = if keys.is_empty() {
        records.take(&[])
    } else {
        find_duplicated_rows(&records, &keys)?
    };
    if !duplicates.is_empty() {
        warn!("{} rows share a duplicate key", duplicates.len());
        if config.drop_duplicates {
            // Earliest record wins when there is a timestamp to sort on.
            let sort_column = config.timestamp_column.as_deref().unwrap_or(keys[0]);
            records = sort_and_drop_duplicates(&records, sort_column, Direction::Ascending, &keys)?;
        }
    }

    let options = config.rank_options();
    let base_ranks = config
        .tags
        .iter()
        .map(|tag| rank_rows(&records, &tag.rank_column, options))
        .collect::<Result<Vec<_>>>()?;

    let rankings: Vec<TagRanking<'_>> = config
        .tags
        .iter()
        .zip(&base_ranks)
        .map(|(tag, ranks)| TagRanking {
            column: &tag.column,
            base_ranks: ranks,
            offsets: &tag.offsets,
        })
        .collect();
    let adjusted = rank_multiple_tags(&records, &rankings)?;

    records.set_column(Column::with_dtype(
        config.output_column.clone(),
        DType::Float64,
        adjusted.into_iter().map(Value::Float).collect(),
    ))?;

    info!(
        "ranked {} rows over {} tag columns",
        records.len(),
        config.tags.len()
    );
    Ok(PipelineOutput {
        records,
        duplicates,
    })
}
