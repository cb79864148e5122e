/// Data layer: table model, loading, statistics and region filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  named Option<f64> columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows inside an ellipse → indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
