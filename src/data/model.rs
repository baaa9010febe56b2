use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema;

// ---------------------------------------------------------------------------
// CellValue – a single cell read back through a column binding
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as exposed by the positional and named
/// accessors on [`IrisRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Float(f32),
    Text(String),
    /// Unlabeled species cell.
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f32` measurement.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// IrisRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observation of the Iris dataset (one raw data row).
///
/// A pure data holder: construction stores the five positional values and the
/// accessors read them back, either through the column-position binding or
/// through the external column name. Parsing and validation live at the
/// loading boundary in [`super::loader`], never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrisRecord {
    pub sepal_length: f32,
    pub sepal_width: f32,
    pub petal_length: f32,
    pub petal_width: f32,
    /// Species label; `None` on unlabeled rows (inference-only data).
    pub species: Option<String>,
}

impl IrisRecord {
    pub fn new(
        sepal_length: f32,
        sepal_width: f32,
        petal_length: f32,
        petal_width: f32,
        species: Option<String>,
    ) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
            species,
        }
    }

    /// Read a field through its column-position binding.
    pub fn value_at(&self, position: usize) -> Option<CellValue> {
        Some(match position {
            0 => CellValue::Float(self.sepal_length),
            1 => CellValue::Float(self.sepal_width),
            2 => CellValue::Float(self.petal_length),
            3 => CellValue::Float(self.petal_width),
            4 => match &self.species {
                Some(s) => CellValue::Text(s.clone()),
                None => CellValue::Null,
            },
            _ => return None,
        })
    }

    /// Read a field through its external column name.
    ///
    /// Resolves the name to a position via the binding table, so the answer
    /// stays correct even if the struct fields were ever reordered.
    pub fn value(&self, name: &str) -> Option<CellValue> {
        schema::column_named(name).and_then(|col| self.value_at(col.position))
    }

    /// The four measurements, in column order.
    pub fn features(&self) -> [f32; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// Whether the row carries a species label.
    pub fn is_labeled(&self) -> bool {
        self.species.is_some()
    }
}

// ---------------------------------------------------------------------------
// IrisDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct label set precomputed.
#[derive(Debug, Clone)]
pub struct IrisDataset {
    /// All observations (rows).
    pub records: Vec<IrisRecord>,
    /// Sorted set of distinct species labels present in the data.
    pub species_labels: BTreeSet<String>,
}

impl IrisDataset {
    /// Build the label index from the loaded records.
    pub fn from_records(records: Vec<IrisRecord>) -> Self {
        let species_labels = records
            .iter()
            .filter_map(|r| r.species.clone())
            .collect();
        IrisDataset {
            records,
            species_labels,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setosa_row() -> IrisRecord {
        IrisRecord::new(5.1, 3.5, 1.4, 0.2, Some("setosa".into()))
    }

    #[test]
    fn fields_read_back_by_name() {
        let rec = setosa_row();
        assert_eq!(rec.value("sepal_length"), Some(CellValue::Float(5.1)));
        assert_eq!(rec.value("sepal_width"), Some(CellValue::Float(3.5)));
        assert_eq!(rec.value("petal_length"), Some(CellValue::Float(1.4)));
        assert_eq!(rec.value("petal_width"), Some(CellValue::Float(0.2)));
        assert_eq!(rec.value("species"), Some(CellValue::Text("setosa".into())));
        assert_eq!(rec.value("sepal_depth"), None);
    }

    #[test]
    fn fields_read_back_by_position() {
        let rec = setosa_row();
        assert_eq!(rec.value_at(0), Some(CellValue::Float(5.1)));
        assert_eq!(rec.value_at(3), Some(CellValue::Float(0.2)));
        assert_eq!(rec.value_at(4), Some(CellValue::Text("setosa".into())));
        assert_eq!(rec.value_at(5), None);
    }

    #[test]
    fn unlabeled_row_reads_null_species() {
        let rec = IrisRecord::new(6.0, 2.9, 4.5, 1.5, None);
        assert!(!rec.is_labeled());
        assert_eq!(rec.value("species"), Some(CellValue::Null));
        assert_eq!(rec.value_at(4), Some(CellValue::Null));
    }

    #[test]
    fn features_follow_column_order() {
        assert_eq!(setosa_row().features(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn json_round_trip_preserves_record() {
        let rec = setosa_row();
        let text = serde_json::to_string(&rec).unwrap();
        let back: IrisRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn json_record_without_species_key_is_unlabeled() {
        let back: IrisRecord = serde_json::from_str(
            r#"{"sepal_length":6.0,"sepal_width":2.9,"petal_length":4.5,"petal_width":1.5}"#,
        )
        .unwrap();
        assert_eq!(back.species, None);
    }

    #[test]
    fn dataset_indexes_distinct_labels() {
        let ds = IrisDataset::from_records(vec![
            setosa_row(),
            setosa_row(),
            IrisRecord::new(6.3, 3.3, 6.0, 2.5, Some("virginica".into())),
            IrisRecord::new(6.0, 2.9, 4.5, 1.5, None),
        ]);
        assert_eq!(ds.len(), 4);
        assert!(!ds.is_empty());
        let labels: Vec<&str> = ds.species_labels.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, ["setosa", "virginica"]);
    }
}
