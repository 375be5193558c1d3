use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Column headers every input format must provide.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: String,
        found: String,
        expected: &'static str,
    },
    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, the four launch columns plus anything else
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – flat columns named like the CSV headers
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(BufReader::new(file))
        }
        "json" => {
            let file = File::open(path)
                .with_context(|| format!("opening JSON {}", path.display()))?;
            read_json(BufReader::new(file))
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }?;

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {:?})",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.payload_extent()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse comma-separated launch records. Columns are matched by header name;
/// extra columns (flight number, booster version, unnamed index) are ignored.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()).into());
        }
    }

    let records = reader
        .deserialize::<LaunchRecord>()
        .enumerate()
        .map(|(row_no, rec)| rec.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` shape:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version Category": "v1.0"
///   }
/// ]
/// ```
pub fn read_json<R: Read>(input: R) -> Result<LaunchDataset> {
    let records: Vec<LaunchRecord> =
        serde_json::from_reader(input).context("parsing JSON launch records")?;
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per launch field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): the payload column may be float or
/// integer, the class column any integer width.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    read_parquet(path, PARQUET_BATCH_SIZE)
}

const PARQUET_BATCH_SIZE: usize = 1024;

fn read_parquet(path: &Path, batch_size: usize) -> Result<LaunchDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column(batch, SITE_COLUMN)?;
    let payloads = column(batch, PAYLOAD_COLUMN)?;
    let classes = column(batch, CLASS_COLUMN)?;
    let boosters = column(batch, BOOSTER_COLUMN)?;

    for row in 0..batch.num_rows() {
        let abs_row = row_offset + row;
        let class = int_value(classes, CLASS_COLUMN, abs_row, row)?;
        let outcome = Outcome::try_from(class).with_context(|| format!("Row {abs_row}"))?;

        out.push(LaunchRecord {
            launch_site: string_value(sites, SITE_COLUMN, abs_row, row)?,
            payload_mass_kg: float_value(payloads, PAYLOAD_COLUMN, abs_row, row)?,
            outcome,
            booster_category: string_value(boosters, BOOSTER_COLUMN, abs_row, row)?,
        });
    }
    Ok(())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn type_error(col: &Arc<dyn Array>, name: &str, expected: &'static str) -> anyhow::Error {
    LoadError::ColumnType {
        column: name.to_string(),
        found: format!("{:?}", col.data_type()),
        expected,
    }
    .into()
}

fn check_null(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<()> {
    if col.is_null(row) {
        return Err(LoadError::NullValue {
            row: abs_row,
            column: name.to_string(),
        }
        .into());
    }
    Ok(())
}

fn string_value(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<String> {
    check_null(col, name, abs_row, row)?;
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| type_error(col, name, "Utf8"))?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(type_error(col, name, "Utf8")),
    }
}

fn float_value(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<f64> {
    check_null(col, name, abs_row, row)?;
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 | DataType::Int32 => return Ok(int_value(col, name, abs_row, row)? as f64),
        _ => None,
    };
    value.ok_or_else(|| type_error(col, name, "Float64"))
}

fn int_value(col: &Arc<dyn Array>, name: &str, abs_row: usize, row: usize) -> Result<i64> {
    check_null(col, name, abs_row, row)?;
    let value = match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        _ => None,
    };
    value.ok_or_else(|| type_error(col, name, "Int64"))
}
