//! Delimited text parsing using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields, escaped quotes
//! and custom delimiters. The first record names the columns; cell text is
//! typed with `CellValue::infer`.

use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;

use crate::model::{CellValue, ColumnDescriptor, Row};

use super::{Dataset, DatasetError};

/// Supported delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// Parse delimited text into a dataset
///
/// Blank header names become `column_N` (1-based) and repeated names get a
/// numeric suffix, so column ids are always unique. Short rows leave their
/// missing cells null; long rows grow extra generated columns.
pub fn parse_csv(content: &str, delimiter: Delimiter) -> Result<Dataset, DatasetError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut ids: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DatasetError::Csv {
            line: Some(line_num + 1),
            message: e.to_string(),
        })?;

        if line_num == 0 {
            for field in record.iter() {
                push_unique_id(&mut ids, &mut seen, field);
            }
            continue;
        }

        while ids.len() < record.len() {
            push_unique_id(&mut ids, &mut seen, "");
        }

        let cells: BTreeMap<String, CellValue> = ids
            .iter()
            .zip(record.iter())
            .map(|(id, field)| (id.clone(), CellValue::infer(field)))
            .filter(|(_, value)| !value.is_null())
            .collect();
        rows.push(Row::from_cells(rows.len(), cells));
    }

    let columns = ids
        .iter()
        .map(|id| ColumnDescriptor::new(id))
        .collect();

    Ok(Dataset { columns, rows })
}

fn push_unique_id(ids: &mut Vec<String>, seen: &mut HashSet<String>, name: &str) {
    let name = name.trim();
    let base = if name.is_empty() {
        format!("column_{}", ids.len() + 1)
    } else {
        name.to_string()
    };

    let mut id = base.clone();
    let mut suffix = 2;
    while seen.contains(&id) {
        id = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    seen.insert(id.clone());
    ids.push(id);
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}
