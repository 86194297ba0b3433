/// Data layer: core types, loading, and row filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RecordSet
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  RecordSet    │  ordered Columns + row index labels
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  key-column duplicates → row subsets
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
