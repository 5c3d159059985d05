// JSON document format
//
//   { "fileName": "...", "data": [["a", "b"], ...], "timestamp": "2024-01-05T10:00:00.000Z" }
//
// Rows are written in storage order. Row ids are not persisted; import
// assigns fresh ones.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use gridedit_engine::grid::Grid;

use crate::error::{ExportError, ImportError};

/// File extension appended on export
pub const EXTENSION: &str = "json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    file_name: &'a str,
    data: Vec<&'a [String]>,
    timestamp: String,
}

/// A parsed document, before it becomes a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub file_name: Option<String>,
    pub data: Vec<Vec<String>>,
    pub timestamp: Option<String>,
}

/// ISO-8601 UTC with milliseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn document<'a>(grid: &'a Grid, file_name: &'a str, at: DateTime<Utc>) -> DocumentOut<'a> {
    DocumentOut {
        file_name,
        data: grid.rows().iter().map(|r| r.cells()).collect(),
        timestamp: format_timestamp(at),
    }
}

/// Encode `grid` as pretty-printed JSON stamped with `at`.
pub fn serialize_at(grid: &Grid, file_name: &str, at: DateTime<Utc>) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&document(grid, file_name, at))
}

/// Encode `grid` stamped with the current time.
pub fn serialize(grid: &Grid, file_name: &str) -> Result<Vec<u8>, serde_json::Error> {
    serialize_at(grid, file_name, Utc::now())
}

/// Parse and validate a document.
///
/// Only `data` is required. String cells pass through, numbers and booleans
/// become their text form, `null` becomes empty. Arrays or objects in a cell
/// are rejected.
pub fn read_document(bytes: &[u8]) -> Result<Document, ImportError> {
    let root: Value = serde_json::from_slice(bytes)?;

    let rows = match root.get("data") {
        None => return Err(ImportError::MissingData),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(ImportError::DataNotArray),
    };

    let mut data = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let cells = value.as_array().ok_or(ImportError::RowNotArray { row })?;
        let record = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| cell_text(cell).ok_or(ImportError::InvalidCell { row, col }))
            .collect::<Result<Vec<_>, _>>()?;
        data.push(record);
    }

    let text_field = |key: &str| root.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(Document {
        file_name: text_field("fileName"),
        data,
        timestamp: text_field("timestamp"),
    })
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Decode a document into a grid padded to the given minimums.
///
/// Ragged rows are widened to the widest row so the grid stays rectangular.
pub fn deserialize(bytes: &[u8], min_rows: usize, min_cols: usize) -> Result<Grid, ImportError> {
    let doc = read_document(bytes)?;
    Ok(Grid::initialize(&doc.data, min_rows, min_cols))
}

/// Path that `export` writes for `file_name` in `dir`.
pub fn export_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_name, EXTENSION))
}

/// Write `grid` to `<dir>/<file_name>.json` and return the path.
pub fn export(grid: &Grid, dir: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ExportError::EmptyFileName);
    }
    if file_name.chars().any(std::path::is_separator) || file_name == ".." || file_name == "." {
        return Err(ExportError::InvalidFileName(file_name.to_string()));
    }

    let path = export_path(dir, file_name);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &document(grid, file_name, Utc::now()))?;
    writer.flush()?;

    Ok(path)
}
