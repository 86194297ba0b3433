use std::borrow::Borrow;

use thiserror::Error;

/// Errors raised by record-set operations.
///
/// Every variant is a caller contract violation or malformed input; none of
/// them is retried anywhere in the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "'base_ranks', and 'records' must be the same length!: {} != {}",
        thousands(.base_ranks),
        thousands(.records)
    )]
    LengthMismatch { base_ranks: usize, records: usize },

    #[error("at least one tag column is required")]
    NoTagColumns,

    #[error(
        "could not parse {} value(s) in column '{column}' as datetimes (first at row {first_label}: {first_value})",
        thousands(.failed)
    )]
    UnparsableTimestamps {
        column: String,
        failed: usize,
        first_label: i64,
        first_value: String,
    },

    #[error("unknown rank method: {0} (expected average, min, max, first or dense)")]
    UnknownRankMethod(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// Format a count with `,` thousands separators, e.g. `12345` → `12,345`.
pub fn thousands<N: Borrow<usize>>(n: N) -> String {
    let digits = n.borrow().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
