use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{IrisDataset, IrisRecord};
use super::schema::{self, ColumnBinding, ColumnType, SchemaError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an Iris dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – positional five-column rows, optional header
/// * `.json`    – `[{ "sepal_length": 5.1, ..., "species": "setosa" }, ...]`
/// * `.parquet` – four `Float32`/`Float64` measurement columns plus an
///   optional nullable `species` column
///
/// Malformed rows (wrong column count, non-numeric measurements, misnamed
/// headers) fail here with the offending row and column named; the record
/// type itself never validates.
pub fn load_file(path: &Path) -> Result<IrisDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: exactly five positional columns per row, in binding-table
/// order.  A leading header row is recognised (its first cell is not a
/// number) and validated against the table; everything else is data.
fn load_csv(path: &Path) -> Result<IrisDataset> {
    let file = File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: Read>(input: R) -> Result<IrisDataset> {
    // Headers are handled by hand so that headerless files stay readable
    // and header validation goes through the binding table.  `flexible`
    // defers column-count checking to `parse_row`.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if row_no == 0 && looks_like_header(&record) {
            let names: Vec<&str> = record.iter().collect();
            schema::validate_header(&names).context("CSV header")?;
            continue;
        }

        let parsed = parse_row(&record).with_context(|| format!("CSV row {row_no}"))?;
        records.push(parsed);
    }

    Ok(IrisDataset::from_records(records))
}

/// A first row whose leading cell is not a number is a header row.
fn looks_like_header(record: &csv::StringRecord) -> bool {
    record
        .get(0)
        .map(|cell| cell.trim().parse::<f32>().is_err())
        .unwrap_or(false)
}

/// Deserialize one raw row by consulting the column-binding table.
fn parse_row(record: &csv::StringRecord) -> Result<IrisRecord> {
    if record.len() != schema::COLUMN_COUNT {
        return Err(SchemaError::ColumnCount {
            found: record.len(),
            expected: schema::COLUMN_COUNT,
        }
        .into());
    }

    let mut features = [0.0f32; 4];
    for (slot, col) in features.iter_mut().zip(&schema::COLUMNS) {
        let raw = record.get(col.position).unwrap_or("").trim();
        *slot = raw
            .parse()
            .with_context(|| format!("column `{}`: `{raw}` is not a number", col.name))?;
    }

    let label = record.get(schema::SPECIES.position).unwrap_or("").trim();
    let species = (!label.is_empty()).then(|| label.to_string());

    let [sepal_length, sepal_width, petal_length, petal_width] = features;
    Ok(IrisRecord {
        sepal_length,
        sepal_width,
        petal_length,
        petal_width,
        species,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "sepal_length": 5.1,
///     "sepal_width": 3.5,
///     "petal_length": 1.4,
///     "petal_width": 0.2,
///     "species": "setosa"
///   },
///   ...
/// ]
/// ```
///
/// The measurement keys are required; `species` may be absent or `null`
/// (columns are named here, so a missing label is explicit, not truncation).
fn load_json(path: &Path) -> Result<IrisDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<IrisRecord> = serde_json::from_str(&text).context("parsing JSON records")?;
    Ok(IrisDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing Iris observations.
///
/// The four measurement columns are located by name and must be `Float32`
/// or `Float64`; a `species` column is optional, with nulls meaning
/// unlabeled rows.
fn load_parquet(path: &Path) -> Result<IrisDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let file_schema = batch.schema();

        let mut feature_cols = Vec::with_capacity(schema::COLUMN_COUNT - 1);
        for col in schema::COLUMNS.iter().filter(|c| c.ty == ColumnType::Float) {
            let idx = file_schema
                .index_of(col.name)
                .map_err(|_| SchemaError::MissingColumn { name: col.name })?;
            feature_cols.push((col, batch.column(idx).clone()));
        }
        let species_col = file_schema
            .index_of(schema::SPECIES.name)
            .ok()
            .map(|idx| batch.column(idx).clone());

        for row in 0..batch.num_rows() {
            let mut features = [0.0f32; 4];
            for (slot, (col, array)) in features.iter_mut().zip(&feature_cols) {
                *slot = extract_f32(array, row, col).with_context(|| format!("row {row}"))?;
            }
            let species = match &species_col {
                Some(array) => extract_species(array, row)?,
                None => None,
            };

            let [sepal_length, sepal_width, petal_length, petal_width] = features;
            records.push(IrisRecord {
                sepal_length,
                sepal_width,
                petal_length,
                petal_width,
                species,
            });
        }
    }

    Ok(IrisDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Extract one measurement from an Arrow column at the given row.
fn extract_f32(col: &ArrayRef, row: usize, binding: &ColumnBinding) -> Result<f32> {
    if col.is_null(row) {
        bail!("column `{}`: null measurement", binding.name);
    }
    match col.data_type() {
        DataType::Float32 => Ok(col
            .as_any()
            .downcast_ref::<Float32Array>()
            .unwrap()
            .value(row)),
        DataType::Float64 => Ok(col
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap()
            .value(row) as f32),
        other => Err(SchemaError::ColumnType {
            name: binding.name,
            expected: "Float32 or Float64",
            found: format!("{other:?}"),
        }
        .into()),
    }
}

/// Extract the species label at the given row; null or empty means unlabeled.
fn extract_species(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let raw = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => {
            return Err(SchemaError::ColumnType {
                name: schema::SPECIES.name,
                expected: "Utf8",
                found: format!("{other:?}"),
            }
            .into());
        }
    };
    let trimmed = raw.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}
