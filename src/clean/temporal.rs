use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, warn};
use regex::Regex;

use crate::data::model::{Column, DType, RecordSet, Value};
use crate::error::{FrameError, Result};

/// Leading `YYYY-MM-DD[( |T)HH:MM[:SS[.fff]]]`; whatever follows (words,
/// `+00`, `UTC`) is ignored.
static LEADING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?",
    )
    .expect("LEADING_TIMESTAMP: invalid pattern")
});

/// A digit, or a `:`/`.` followed by one, right after the timestamp means
/// the text was cut mid-number (`01:13:489`).
static RUN_ON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[:.]?\d").expect("RUN_ON: invalid pattern"));

/// Parse the timestamp at the start of `text` as a naive datetime.
///
/// Trailing annotations are dropped, and an offset is discarded rather
/// than applied: `"2020-04-23 19:49:23+00"` is `2020-04-23 19:49:23`.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let caps = LEADING_TIMESTAMP.captures(text)?;
    if RUN_ON.is_match(&text[caps.get(0)?.end()..]) {
        return None;
    }
    let num = |i: usize| -> Option<u32> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?;

    let nanos = match caps.get(7) {
        Some(m) => {
            let digits = m.as_str();
            digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
        }
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(num(4)?, num(5)?, num(6)?, nanos)?;
    Some(date.and_time(time))
}

fn coerce_cell(cell: &Value) -> Option<NaiveDateTime> {
    match cell {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Convert the free-text timestamps in `column` to datetimes.
///
/// Every cell must parse: a single null or unparsable cell fails the whole
/// call, reporting how many cells failed and the first offender.
pub fn convert_object_to_datetime(mut records: RecordSet, column: &str) -> Result<RecordSet> {
    let source = records.column(column)?;

    let parsed: Vec<Option<NaiveDateTime>> = source.values.iter().map(coerce_cell).collect();
    let failures: Vec<usize> = parsed
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(i, _)| i)
        .collect();

    if let Some(&first) = failures.first() {
        warn!(
            "{} of {} values in '{column}' are not timestamps",
            failures.len(),
            records.len()
        );
        return Err(FrameError::UnparsableTimestamps {
            column: column.to_string(),
            failed: failures.len(),
            first_label: records.index()[first],
            first_value: match &source.values[first] {
                Value::Null => "<null>".to_string(),
                other => format!("'{other}'"),
            },
        });
    }

    let values = parsed.into_iter().flatten().map(Value::DateTime).collect();
    records.set_column(Column::with_dtype(column, DType::DateTime, values))?;
    debug!("coerced {} values in '{column}' to datetimes", records.len());
    Ok(records)
}
