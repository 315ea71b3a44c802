/// Data layer: core types, parsing, aggregation, search and loading.
///
/// Architecture:
/// ```text
///   registry ── model id → predictions .csv + metrics .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read both files concurrently, join
///   └──────────┘
///        │ text
///        ▼
///   ┌──────────┐
///   │  parser   │  quote-aware split → Dataset (Vec<DataRow>)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  stats    │   │  search   │  id lookup → PredictionRecord
///   └──────────┘   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod parser;
pub mod registry;
pub mod search;
pub mod stats;
