use thiserror::Error;

// ---------------------------------------------------------------------------
// Column bindings – the contract between raw rows and record fields
// ---------------------------------------------------------------------------

/// Storage type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 32-bit floating-point measurement.
    Float,
    /// Free-text label.
    Text,
}

/// Association between a positional raw-row value and a named, typed field.
///
/// Downstream tooling looks columns up by name; row parsing is driven by
/// position. Both resolve through this table, never through struct layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    /// External column name, as it appears in file headers and schemas.
    pub name: &'static str,
    /// Zero-based position of the column in a raw row.
    pub position: usize,
    pub ty: ColumnType,
}

/// Number of columns in a raw dataset row.
pub const COLUMN_COUNT: usize = 5;

/// The column-binding table, in row order.
///
/// Order and naming are fixed by the dataset layout shared with external
/// training/inference tooling; the entry at index `i` binds position `i`.
pub const COLUMNS: [ColumnBinding; COLUMN_COUNT] = [
    ColumnBinding { name: "sepal_length", position: 0, ty: ColumnType::Float },
    ColumnBinding { name: "sepal_width", position: 1, ty: ColumnType::Float },
    ColumnBinding { name: "petal_length", position: 2, ty: ColumnType::Float },
    ColumnBinding { name: "petal_width", position: 3, ty: ColumnType::Float },
    ColumnBinding { name: "species", position: 4, ty: ColumnType::Text },
];

/// The label column (the target a downstream model predicts).
pub const SPECIES: ColumnBinding = COLUMNS[COLUMN_COUNT - 1];

/// Binding for a given raw-row position.
pub fn column_at(position: usize) -> Option<&'static ColumnBinding> {
    COLUMNS.get(position)
}

/// Binding for a given external column name.
pub fn column_named(name: &str) -> Option<&'static ColumnBinding> {
    COLUMNS.iter().find(|c| c.name == name)
}

// ---------------------------------------------------------------------------
// Schema violations
// ---------------------------------------------------------------------------

/// A row or file that does not match the column-binding table.
///
/// Raised at the loading boundary; the record type itself never validates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("row has {found} columns, expected {expected}")]
    ColumnCount { found: usize, expected: usize },

    #[error("header column {position}: found `{found}`, expected `{expected}`")]
    HeaderName {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("missing column `{name}`")]
    MissingColumn { name: &'static str },

    #[error("column `{name}` has type {found}, expected {expected}")]
    ColumnType {
        name: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// Validate a parsed header row against the binding table.
///
/// Names must appear in schema order; comparison is trimmed and
/// case-insensitive so `Sepal_Length` style headers still match.
pub fn validate_header(found: &[&str]) -> Result<(), SchemaError> {
    if found.len() != COLUMN_COUNT {
        return Err(SchemaError::ColumnCount {
            found: found.len(),
            expected: COLUMN_COUNT,
        });
    }
    for (col, raw) in COLUMNS.iter().zip(found) {
        if !raw.trim().eq_ignore_ascii_case(col.name) {
            return Err(SchemaError::HeaderName {
                position: col.position,
                expected: col.name,
                found: raw.trim().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_dense_and_in_table_order() {
        for (i, col) in COLUMNS.iter().enumerate() {
            assert_eq!(col.position, i);
        }
    }

    #[test]
    fn measurements_are_float_and_label_is_text() {
        for col in &COLUMNS[..4] {
            assert_eq!(col.ty, ColumnType::Float);
        }
        assert_eq!(SPECIES.ty, ColumnType::Text);
        assert_eq!(SPECIES.name, "species");
    }

    #[test]
    fn lookup_by_name_resolves_position() {
        let col = column_named("petal_width").unwrap();
        assert_eq!(col.position, 3);
        assert!(column_named("petal_depth").is_none());
    }

    #[test]
    fn canonical_header_is_accepted() {
        let names = ["sepal_length", "sepal_width", "petal_length", "petal_width", "species"];
        assert_eq!(validate_header(&names), Ok(()));
    }

    #[test]
    fn header_matching_ignores_case_and_whitespace() {
        let names = ["Sepal_Length", " sepal_width ", "PETAL_LENGTH", "petal_width", "Species"];
        assert_eq!(validate_header(&names), Ok(()));
    }

    #[test]
    fn reordered_header_is_rejected() {
        let names = ["sepal_width", "sepal_length", "petal_length", "petal_width", "species"];
        assert_eq!(
            validate_header(&names),
            Err(SchemaError::HeaderName {
                position: 0,
                expected: "sepal_length",
                found: "sepal_width".into(),
            })
        );
    }

    #[test]
    fn short_header_is_rejected() {
        let names = ["sepal_length", "sepal_width", "petal_length", "petal_width"];
        assert_eq!(
            validate_header(&names),
            Err(SchemaError::ColumnCount { found: 4, expected: 5 })
        );
    }
}
