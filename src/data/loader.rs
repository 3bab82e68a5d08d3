use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, HousingDataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a housing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row + one numeric value per cell (recommended)
/// * `.json`    – `[{ "col": 1.2, ... }, ...]` (pandas `orient='records'`)
/// * `.parquet` – flat table of scalar numeric columns
pub fn load_file(path: &Path) -> Result<HousingDataset> {
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

/// Fetch a remote CSV once, blocking.  No retries: the app performs at most
/// one load per session and has no fallback source.
pub fn load_remote_csv(url: &str) -> Result<HousingDataset> {
    let response = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?
        .get(url)
        .send()
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;

    parse_csv(response).context("parsing remote CSV")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell a single numeric
/// value. Empty cells and `NA`/`NaN` tokens are treated as missing.
fn load_csv(path: &Path) -> Result<HousingDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

fn parse_csv(source: impl Read) -> Result<HousingDataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: has {} fields, expected {}",
                record.len(),
                headers.len()
            );
        }
        for (col_idx, field) in record.iter().enumerate() {
            let value = parse_cell(field)
                .with_context(|| {
                    format!("Row {row_no}, column '{}'", headers[col_idx])
                })?;
            columns[col_idx].push(value);
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    HousingDataset::from_columns(columns).map_err(Into::into)
}

fn parse_cell(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "CRIM": 0.006, "CHAS": 0, "RM": 6.5, "MEDV": 24.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<HousingDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

fn parse_json_records(text: &str) -> Result<HousingDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;
    if records.is_empty() {
        bail!("JSON dataset has no records");
    }

    // Column order comes from the first record.
    let first = records[0]
        .as_object()
        .context("Row 0 is not a JSON object")?;
    let names: Vec<String> = first.keys().cloned().collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); names.len()];

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for (col_idx, name) in names.iter().enumerate() {
            let value = match obj.get(name) {
                None | Some(JsonValue::Null) => f64::NAN,
                Some(JsonValue::Number(n)) => n
                    .as_f64()
                    .with_context(|| format!("Row {i}, '{name}': not representable as f64"))?,
                Some(JsonValue::Bool(b)) => {
                    if *b {
                        1.0
                    } else {
                        0.0
                    }
                }
                Some(other) => bail!("Row {i}, '{name}': expected a number, got {other}"),
            };
            columns[col_idx].push(value);
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    HousingDataset::from_columns(columns).map_err(Into::into)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a flat numeric table: every column must be
/// a scalar Float64/Float32/Int64/Int32.  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<HousingDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if names.is_empty() {
            names = schema.fields().iter().map(|f| f.name().clone()).collect();
            columns = vec![Vec::new(); names.len()];
        }

        for (col_idx, name) in names.iter().enumerate() {
            let array = batch.column(col_idx);
            append_numeric(array, &mut columns[col_idx])
                .with_context(|| format!("column '{name}'"))?;
        }
    }

    if names.is_empty() {
        bail!("Parquet file has no record batches");
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    HousingDataset::from_columns(columns).map_err(Into::into)
}

/// Append every value of a scalar numeric Arrow column to `out`, mapping
/// nulls to `NaN`.
fn append_numeric(array: &Arc<dyn Array>, out: &mut Vec<f64>) -> Result<()> {
    match array.data_type() {
        DataType::Float64 => {
            let arr = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            out.extend(arr.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        DataType::Float32 => {
            let arr = array
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            out.extend(arr.iter().map(|v| v.map(f64::from).unwrap_or(f64::NAN)));
        }
        DataType::Int64 => {
            let arr = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            out.extend(arr.iter().map(|v| v.map(|i| i as f64).unwrap_or(f64::NAN)));
        }
        DataType::Int32 => {
            let arr = array
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            out.extend(arr.iter().map(|v| v.map(f64::from).unwrap_or(f64::NAN)));
        }
        other => bail!("Expected a scalar numeric column, got {other:?}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parses_numeric_cells_and_missing_tokens() {
        let csv = "crim,chas,medv\n0.1,0,24.0\n0.2,1,NA\n0.3,0,\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column("medv").unwrap().missing(), 2);
        assert_eq!(ds.column("crim").unwrap().values, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn csv_rejects_non_numeric_cells() {
        let csv = "crim\nhello\n";
        assert!(parse_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_records_become_columns() {
        let text = r#"[
            {"RM": 6.5, "CHAS": 0, "MEDV": 24.0},
            {"RM": 5.0, "CHAS": 1, "MEDV": null}
        ]"#;
        let ds = parse_json_records(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column("RM").unwrap().values, vec![6.5, 5.0]);
        assert_eq!(ds.column("MEDV").unwrap().missing(), 1);
    }

    #[test]
    fn json_rejects_non_numeric_fields() {
        let text = r#"[{"RM": "tall"}]"#;
        assert!(parse_json_records(text).is_err());
    }
}
