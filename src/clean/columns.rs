use std::sync::LazyLock;

use regex::Regex;

use crate::data::model::RecordSet;

static NON_TOKEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("NON_TOKEN_RUN: invalid pattern"));

/// Canonical token form of a column label: lowercase, every run of
/// characters outside `[a-z0-9]` collapsed to one `_`, outer `_` stripped.
pub fn standardise_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_TOKEN_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Rename every column to its canonical token form. Cells, row order and
/// column order are untouched; colliding names are not detected.
pub fn standardise_columns(records: RecordSet) -> RecordSet {
    records.rename_columns(standardise_name)
}
