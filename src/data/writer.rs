use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::IrisRecord;
use super::schema::{COLUMNS, ColumnType};

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write records as CSV: a header row in binding-table order, then one row
/// per record.  Unlabeled records get an empty species cell, which the
/// loader reads back as unlabeled.
pub fn write_csv(records: &[IrisRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;

    writer
        .write_record(COLUMNS.iter().map(|c| c.name))
        .context("writing CSV header")?;

    for rec in records {
        // `f32::to_string` prints the shortest digits that parse back to the
        // same value, so measurements survive the text round-trip exactly.
        writer
            .write_record(&[
                rec.sepal_length.to_string(),
                rec.sepal_width.to_string(),
                rec.petal_length.to_string(),
                rec.petal_width.to_string(),
                rec.species.clone().unwrap_or_default(),
            ])
            .context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

/// Write records as a single Parquet record batch: four non-nullable
/// `Float32` measurement columns and a nullable `Utf8` species column, all
/// named and ordered by the binding table.
pub fn write_parquet(records: &[IrisRecord], path: &Path) -> Result<()> {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|col| match col.ty {
            ColumnType::Float => Field::new(col.name, DataType::Float32, false),
            ColumnType::Text => Field::new(col.name, DataType::Utf8, true),
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = (0..4)
        .map(|i| {
            let values: Vec<f32> = records.iter().map(|r| r.features()[i]).collect();
            Arc::new(Float32Array::from(values)) as ArrayRef
        })
        .collect();
    let species: Vec<Option<&str>> = records.iter().map(|r| r.species.as_deref()).collect();
    columns.push(Arc::new(StringArray::from(species)));

    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;

    fn sample_records() -> Vec<IrisRecord> {
        vec![
            IrisRecord::new(5.1, 3.5, 1.4, 0.2, Some("setosa".into())),
            IrisRecord::new(6.3, 3.3, 6.0, 2.5, Some("virginica".into())),
            // Awkward float on purpose: must survive the text round-trip.
            IrisRecord::new(4.9000001, 3.0, 1.4, 0.1, None),
        ]
    }

    #[test]
    fn csv_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris.csv");
        let records = sample_records();

        write_csv(&records, &path).unwrap();
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.records, records);
    }

    #[test]
    fn parquet_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris.parquet");
        let records = sample_records();

        write_parquet(&records, &path).unwrap();
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.records, records);
        assert_eq!(ds.species_labels.len(), 2);
    }

    #[test]
    fn written_csv_header_matches_binding_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris.csv");
        write_csv(&sample_records(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "sepal_length,sepal_width,petal_length,petal_width,species"
        );
    }
}
