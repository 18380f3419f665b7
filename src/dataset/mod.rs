//! Dataset loading for the command-line driver
//!
//! Reads rows (and optionally column declarations) from CSV/TSV/PSV or JSON
//! files. The grid engine itself never touches files; hosts own their data.

mod delimited;
mod json;

use std::path::Path;

use crate::model::{ColumnDescriptor, Row};

pub use delimited::{detect_delimiter, parse_csv, Delimiter};
pub use json::parse_json;

/// Rows plus the columns that display them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Error type for dataset loading
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The file could not be read
    Io(String),
    /// Malformed CSV (line numbers are 1-based)
    Csv {
        line: Option<usize>,
        message: String,
    },
    /// Malformed or unsupported JSON
    Json(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(msg) => write!(f, "IO error: {}", msg),
            DatasetError::Csv {
                line: Some(line),
                message,
            } => write!(f, "CSV parse error at line {}: {}", line, message),
            DatasetError::Csv {
                line: None,
                message,
            } => write!(f, "CSV parse error: {}", message),
            DatasetError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Load a dataset, picking the format from the file extension
///
/// `.json` is read as JSON; `.tsv` and `.psv` use their delimiters; anything
/// else is CSV with the delimiter detected from the first lines.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DatasetError::Io(format!("{}: {}", path.display(), e)))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "json" => parse_json(&content)?,
        "tsv" | "psv" => parse_csv(&content, Delimiter::from_extension(&ext))?,
        _ => parse_csv(&content, detect_delimiter(&content))?,
    };

    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.row_count(),
        dataset.column_count(),
        path.display()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let tsv = dir.path().join("people.tsv");
        std::fs::write(&tsv, "name\tage\nAlice\t30\n").unwrap();
        let data = load_dataset(&tsv).unwrap();
        assert_eq!(data.column_count(), 2);
        assert_eq!(data.row_count(), 1);

        let json = dir.path().join("people.json");
        let mut file = std::fs::File::create(&json).unwrap();
        writeln!(file, r#"[{{"name": "Bob", "age": 41}}]"#).unwrap();
        let data = load_dataset(&json).unwrap();
        assert_eq!(data.rows[0].get("name").to_string(), "Bob");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
