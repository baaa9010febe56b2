//! Typed record contract and file loaders for the Iris classification
//! dataset.
//!
//! The crate pins down the row layout shared with external training and
//! inference tooling (five positional columns: four `f32` measurements plus
//! a text species label) and provides the loading boundary that turns raw
//! rows into [`IrisRecord`] values. Malformed rows fail there; the record
//! itself is a pure data holder.

pub mod data;

pub use data::loader::load_file;
pub use data::model::{CellValue, IrisDataset, IrisRecord};
pub use data::schema::{COLUMNS, ColumnBinding, ColumnType, SchemaError};
