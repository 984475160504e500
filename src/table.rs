//! Long-format merged table: allow-list projection and CSV I/O.
//!
//! Source files carry many columns; only the allow-listed ones survive the
//! merge. `score_AVE` is the framework's name for the averaged score and is
//! folded into the canonical `score` column on load.

use std::path::{Path, PathBuf};

/// Canonical data columns after `score_AVE` is folded into `score`.
pub const DATA_COLUMNS: &[&str] = &["update", "ID", "score"];

#[derive(Debug)]
pub enum TableError {
    Csv(csv::Error),
    Io(std::io::Error),
    /// A matched source file cannot produce every canonical data column
    MissingColumns { path: PathBuf, missing: Vec<String> },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::MissingColumns { path, missing } => write!(
                f,
                "{:?} is missing required columns: {}",
                path,
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for TableError {}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// The merged long-format table.
///
/// Header is fixed at construction: the canonical data columns followed by
/// the axis columns. Rows are stored as plain strings, exactly as they will
/// be written.
#[derive(Debug, Clone)]
pub struct MergedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MergedTable {
    /// Create an empty table with the fixed output schema: the canonical
    /// data columns followed by `axis_columns`.
    pub fn new(axis_columns: Vec<String>) -> Self {
        let mut columns: Vec<String> = DATA_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(axis_columns);
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Append one condition's batch of full-width rows.
    pub fn append_batch(&mut self, batch: Vec<Vec<String>>) {
        debug_assert!(batch.iter().all(|row| row.len() == self.columns.len()));
        self.rows.extend(batch);
    }

    /// Write the table to `path`, overwriting any existing file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Read one source file and project it onto the canonical data columns.
///
/// Columns outside the allow-list are dropped. When both `score_AVE` and a
/// raw `score` column are present, `score_AVE` wins. A file that cannot
/// supply every canonical column is a schema violation, reported as fatal.
pub fn read_data_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, TableError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut indices = Vec::with_capacity(DATA_COLUMNS.len());
    let mut missing = Vec::new();
    for &column in DATA_COLUMNS {
        let found = if column == "score" {
            position("score_AVE").or_else(|| position("score"))
        } else {
            position(column)
        };
        match found {
            Some(idx) => indices.push(idx),
            None => missing.push(column.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(TableError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            indices
                .iter()
                .map(|&idx| record.get(idx).unwrap_or("").to_string())
                .collect(),
        );
    }
    Ok(rows)
}
