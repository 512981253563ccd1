/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///   data.txt  (header + "<density> <generation>" lines)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<DataPoint>, file order
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
