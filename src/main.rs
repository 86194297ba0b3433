use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use feedback_rank::data::loader::{load_file, write_csv};
use feedback_rank::{pipeline, PipelineConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [records_path, config_path] = args.as_slice() else {
        bail!("usage: feedback-rank <records.csv|json|parquet> <config.json>");
    };

    let config = PipelineConfig::from_path(&PathBuf::from(config_path))?;
    let records = load_file(&PathBuf::from(records_path))
        .with_context(|| format!("loading {records_path}"))?;

    let output = pipeline::run(records, &config).context("running pipeline")?;
    if !output.duplicates.is_empty() {
        info!(
            "duplicate rows (index labels): {:?}",
            output.duplicates.index()
        );
    }

    write_csv(&output.records, std::io::stdout().lock())
}
