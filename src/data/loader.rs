use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a design table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per design
/// * `.json`    – `[{ "Range": 9000, "CruiseSpeed": 800, ... }, ...]`
/// * `.parquet` – flat table, one column per field (Pandas / Polars output)
///
/// Only numeric columns are kept. A column with any non-numeric text cell
/// (e.g. an aircraft name) is dropped.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    info!(
        "loaded {} rows x {} numeric columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// One raw cell before the column is known to be numeric.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Number(f64),
    Missing,
    Text,
}

fn parse_cell(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Missing;
    }
    if let Ok(v) = s.parse::<f64>() {
        return Cell::Number(v);
    }
    match s.to_ascii_lowercase().as_str() {
        "na" | "n/a" | "null" | "none" | "-" => Cell::Missing,
        _ => Cell::Text,
    }
}

/// Keep numeric columns, drop the rest.
fn finish(raw: Vec<(String, Vec<Cell>)>) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(raw.len());
    for (name, cells) in raw {
        if cells.iter().any(|c| *c == Cell::Text) {
            debug!("dropping non-numeric column '{name}'");
            continue;
        }
        let values = cells
            .into_iter()
            .map(|c| match c {
                Cell::Number(v) => Some(v),
                _ => None,
            })
            .collect();
        columns.push(Column::new(name, values));
    }
    Ok(Dataset::new(columns)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per design.
/// Empty cells and `NaN` / `NA` / `null` are missing values.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, column) in cells.iter_mut().enumerate() {
            column.push(parse_cell(record.get(col_idx).unwrap_or("")));
        }
    }

    finish(headers.into_iter().zip(cells).collect())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Range": 9000.0, "CruiseSpeed": 800.0, "WingSpan": 30.0 },
///   ...
/// ]
/// ```
///
/// A key absent from a record is a missing value for that row. Columns come
/// out in key order.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut keys = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        keys.extend(obj.keys().cloned());
        objects.push(obj);
    }

    let raw = keys
        .into_iter()
        .map(|key| {
            let cells = objects
                .iter()
                .map(|obj| obj.get(&key).map_or(Cell::Missing, json_to_cell))
                .collect();
            (key, cells)
        })
        .collect();

    finish(raw)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
        JsonValue::String(s) => parse_cell(s),
        JsonValue::Null => Cell::Missing,
        _ => Cell::Text,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Integer, float and decimal columns are cast to `Float64`; string columns
/// are parsed cell by cell like CSV; anything else is dropped.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut raw: Vec<(String, Vec<Cell>)> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if raw.is_empty() {
            raw = schema
                .fields()
                .iter()
                .map(|f| (f.name().clone(), Vec::new()))
                .collect();
        }

        for (name, cells) in raw.iter_mut() {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet batch missing column '{name}'"))?;
            let col = batch.column(idx);
            cells.extend(
                extract_cells(col).with_context(|| format!("reading column '{name}'"))?,
            );
        }
    }

    finish(raw)
}

// -- Parquet / Arrow helpers --

/// Convert a whole Arrow column into raw cells.
fn extract_cells(col: &Arc<dyn Array>) -> Result<Vec<Cell>> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.iter().map(|v| v.map_or(Cell::Missing, parse_cell)).collect())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.iter().map(|v| v.map_or(Cell::Missing, parse_cell)).collect())
        }
        dt if dt.is_numeric() => {
            let casted = cast(col.as_ref(), &DataType::Float64).context("casting to Float64")?;
            let arr = casted
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr
                .iter()
                .map(|v| v.map_or(Cell::Missing, Cell::Number))
                .collect())
        }
        _ => Ok(vec![Cell::Text; col.len()]),
    }
}
