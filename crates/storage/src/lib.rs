//! Storage Layer
//!
//! Source documents, their per-column classification labels, and the sink
//! that persists feature matrices.

mod repository;
mod sink;

pub use repository::{ColumnRecord, Manifest, Repository, SourceRecord};
pub use sink::{analysis_path, AnalysisSink, FileSink, MemorySink};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Lock error: {0}")]
    Lock(String),
    #[error("Source {0} not found")]
    NotFound(i64),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Source {source_id}: column labels are not indexed 0..n ({detail})")]
    LabelIndex { source_id: i64, detail: String },
}
