/// Data layer: the record contract, column bindings, loading and writing.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse raw rows via the column bindings → IrisDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  IrisDataset  │  Vec<IrisRecord>, label index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │      │  writer   │  label selection / CSV + Parquet out
///   └──────────┘      └──────────┘
/// ```
///
/// The `schema` module holds the column-binding table both sides consult.

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod writer;
