//! Table and Analysis Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or building a table
#[derive(Debug, Error)]
pub enum TableError {
    /// Backing file could not be opened
    #[error("Failed to open table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text (ragged records, invalid UTF-8, ...)
    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// Columns do not share a row count
    #[error("Column '{key}' has {actual} rows, expected {expected}")]
    Jagged {
        key: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors rejecting an analysis call
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Caller supplied a label list that does not match the table width
    #[error("Label count {labels} does not match column count {columns}")]
    LabelMismatch { labels: usize, columns: usize },
}
