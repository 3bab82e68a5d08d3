/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / remote CSV
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → HousingDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ HousingDataset │  column-major numeric table, immutable per session
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │  stats    │     │  series   │
///   └──────────┘     └──────────┘     └──────────┘
///    row indices      summary of       plot inputs for
///    passing the      one column of    histogram / scatter
///    criteria         the view
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod series;
pub mod stats;
