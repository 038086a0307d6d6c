//! TSV loader for the GDC clinical and family-history exports.
//!
//! Columns are preserved verbatim and every cell is kept as a string; typing
//! happens after the join. Missing and short cells read as `""`.

use std::io::ErrorKind;
use std::path::Path;

use tcga_explorer_common::{ExplorerError, ReadErrorKind, Result};
use tracing::{debug, info};

/// Header plus string rows, straight from a source file (or a cleaning step).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Index of a column the table cannot do without.
    pub fn require_column(&self, table: &str, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| ExplorerError::schema(table, column))
    }

    /// Cell at (`row`, `column`).
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Keep only `columns`, in the given order.
    pub fn project(&self, table: &str, columns: &[&str]) -> Result<RawTable> {
        let indices = columns
            .iter()
            .map(|c| self.require_column(table, c))
            .collect::<Result<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(RawTable {
            headers: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Rewrite every cell through `map`.
    pub fn map_cells<F>(&self, map: F) -> RawTable
    where
        F: Fn(&str) -> String,
    {
        RawTable {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|c| map(c)).collect())
                .collect(),
        }
    }
}

/// Read a source file, enforcing the size limit before touching its content.
pub fn read_source(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.is_dir() {
        return Err(ExplorerError::read(path, ReadErrorKind::Unreadable, "is a directory"));
    }
    if metadata.len() > max_bytes {
        return Err(ExplorerError::read(
            path,
            ReadErrorKind::TooLarge,
            format!("{} bytes exceeds limit of {} bytes", metadata.len(), max_bytes),
        ));
    }
    std::fs::read(path).map_err(|e| io_error(path, e))
}

/// Parse tab-separated content with a header row.
///
/// `source` only labels errors. Rows with more cells than the header are
/// malformed; shorter rows are padded with empty strings.
pub fn parse_tsv(source: &Path, content: &[u8]) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(content);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(source, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ExplorerError::read(source, ReadErrorKind::Empty, "no header row"));
    }
    debug!(source = %source.display(), n_columns = headers.len(), "Parsed TSV header");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(source, e))?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ExplorerError::read(
                source,
                ReadErrorKind::Malformed,
                format!(
                    "line {} has {} fields, header has {}",
                    line,
                    record.len(),
                    headers.len()
                ),
            ));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ExplorerError::read(source, ReadErrorKind::Empty, "header only"));
    }

    Ok(RawTable { headers, rows })
}

/// Read and parse one TSV file.
pub fn load_tsv(path: &Path, max_bytes: u64) -> Result<RawTable> {
    let content = read_source(path, max_bytes)?;
    let table = parse_tsv(path, &content)?;
    info!(
        path = %path.display(),
        n_rows = table.len(),
        n_columns = table.headers().len(),
        "Loaded TSV"
    );
    Ok(table)
}

/// Read both exports. Either failure aborts the load.
pub fn load_sources(
    clinical: &Path,
    family_history: &Path,
    max_bytes: u64,
) -> Result<(RawTable, RawTable)> {
    let clinical = load_tsv(clinical, max_bytes)?;
    let family = load_tsv(family_history, max_bytes)?;
    Ok((clinical, family))
}

fn io_error(path: &Path, err: std::io::Error) -> ExplorerError {
    let kind = match err.kind() {
        ErrorKind::NotFound => ReadErrorKind::NotFound,
        ErrorKind::InvalidData => ReadErrorKind::Malformed,
        _ => ReadErrorKind::Unreadable,
    };
    ExplorerError::read(path, kind, err.to_string())
}

fn csv_error(path: &Path, err: csv::Error) -> ExplorerError {
    let kind = match err.kind() {
        csv::ErrorKind::Io(_) => ReadErrorKind::Unreadable,
        _ => ReadErrorKind::Malformed,
    };
    ExplorerError::read(path, kind, err.to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
