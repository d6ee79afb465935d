/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  clean_*.csv (x4)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate columns → EvDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ EvDataset │  stations, models, countries, world
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply model predicates → filtered indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
