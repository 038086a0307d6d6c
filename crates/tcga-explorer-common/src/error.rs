use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a source file could not be turned into a raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// No such file.
    NotFound,
    /// The file exists but could not be read (permissions, directory, I/O).
    Unreadable,
    /// The content is not a well-formed tab-separated table.
    Malformed,
    /// Header only, or nothing at all.
    Empty,
    /// Larger than `limits.max_file_bytes`.
    TooLarge,
}

impl fmt::Display for ReadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadErrorKind::NotFound => "no such file",
            ReadErrorKind::Unreadable => "unreadable",
            ReadErrorKind::Malformed => "malformed content",
            ReadErrorKind::Empty => "no data rows",
            ReadErrorKind::TooLarge => "file too large",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Failed to read {}: {kind} ({detail})", .path.display())]
    Read {
        path: PathBuf,
        kind: ReadErrorKind,
        detail: String,
    },

    #[error("Schema error: {table} table has no column `{column}`")]
    Schema { table: String, column: String },

    #[error("Shape error: row {row} has {found} cells, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Derivation error for `{field}`: {reason}")]
    Derivation { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExplorerError {
    pub fn read(path: &Path, kind: ReadErrorKind, detail: impl Into<String>) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn schema(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Kind of a read failure, if this is one.
    pub fn read_kind(&self) -> Option<ReadErrorKind> {
        match self {
            Self::Read { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Loader, schema and config failures abort page construction.
    /// Derivation problems are reported but never stop a page.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Derivation { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
