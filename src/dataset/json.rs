//! JSON datasets
//!
//! Two shapes are accepted:
//!
//! ```text
//! [ { "id": 1, "name": "Alice" }, ... ]
//! { "columns": [ { "id": "name", "pin": "left" }, ... ], "rows": [ ... ] }
//! ```
//!
//! Without declared columns, columns are inferred from the keys of the row
//! objects in first-seen order.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::{CellValue, ColumnDescriptor, Row};

use super::{Dataset, DatasetError};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDataset {
    Rows(Vec<Map<String, Value>>),
    Declared {
        #[serde(default)]
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Map<String, Value>>,
    },
}

/// Parse a JSON dataset
pub fn parse_json(content: &str) -> Result<Dataset, DatasetError> {
    let parsed: JsonDataset = serde_json::from_str(content).map_err(|e| {
        DatasetError::Json(format!(
            "expected an array of objects or {{\"columns\", \"rows\"}}: {}",
            e
        ))
    })?;

    let (columns, objects) = match parsed {
        JsonDataset::Rows(objects) => (Vec::new(), objects),
        JsonDataset::Declared { columns, rows } => (columns, rows),
    };

    let columns = if columns.is_empty() {
        infer_columns(&objects)
    } else {
        columns
            .into_iter()
            .map(|mut column| {
                if column.header.is_empty() {
                    column.header = column.id.clone();
                }
                column
            })
            .collect()
    };

    let rows = objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            let cells: BTreeMap<String, CellValue> = object
                .into_iter()
                .map(|(key, value)| (key, to_cell(value)))
                .filter(|(_, value)| !value.is_null())
                .collect();
            Row::from_cells(index, cells)
        })
        .collect();

    Ok(Dataset { columns, rows })
}

fn infer_columns(objects: &[Map<String, Value>]) -> Vec<ColumnDescriptor> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for key in objects.iter().flat_map(|object| object.keys()) {
        if seen.insert(key.as_str()) {
            columns.push(ColumnDescriptor::new(key));
        }
    }
    columns
}

/// Scalars map directly; nested arrays and objects are kept as JSON text
fn to_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(b),
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
        Value::String(s) => CellValue::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
    }
}
