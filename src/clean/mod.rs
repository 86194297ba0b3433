//! Record-set cleaning: canonical column names and strict timestamp coercion.

pub mod columns;
pub mod temporal;

pub use columns::{standardise_columns, standardise_name};
pub use temporal::{convert_object_to_datetime, parse_timestamp};
