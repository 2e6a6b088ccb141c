//! Repository Implementation

use crate::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use table_analyzer::{ColumnLabel, Taxonomy};
use tracing::{debug, info, warn};

/// An uploaded delimited-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: i64,
    /// Path of the uploaded file, relative to the media root
    #[serde(default)]
    pub document: Option<String>,
    /// Set once every column of the document has been labeled
    #[serde(default)]
    pub time_classified: Option<DateTime<Utc>>,
}

/// Classification of one column of a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub source_id: i64,
    /// Position of the column, left to right
    pub index: usize,
    #[serde(default)]
    pub main_class: Option<String>,
    #[serde(default)]
    pub sub_class: Option<String>,
}

/// On-disk snapshot of the label store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub sources: Vec<SourceRecord>,
    #[serde(default)]
    pub columns: Vec<ColumnRecord>,
}

/// Repository for sources and column labels (in-memory)
pub struct Repository {
    sources: Mutex<Vec<SourceRecord>>,
    columns: Mutex<Vec<ColumnRecord>>,
    taxonomy: Taxonomy,
}

impl Repository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self {
            sources: Mutex::new(Vec::new()),
            columns: Mutex::new(Vec::new()),
            taxonomy: Taxonomy::default(),
        }
    }

    /// Build a repository from a manifest
    pub fn from_manifest(manifest: Manifest) -> Self {
        info!(
            "Loading manifest: {} sources, {} column labels",
            manifest.sources.len(),
            manifest.columns.len()
        );
        Self {
            sources: Mutex::new(manifest.sources),
            columns: Mutex::new(manifest.columns),
            taxonomy: Taxonomy::default(),
        }
    }

    /// Read a JSON manifest file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest = serde_json::from_str(&text)?;
        Ok(Self::from_manifest(manifest))
    }

    /// Insert or replace a source
    pub fn upsert_source(&self, record: SourceRecord) -> Result<(), StorageError> {
        let mut sources = self.sources.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        match sources.iter_mut().find(|s| s.id == record.id) {
            Some(existing) => *existing = record,
            None => sources.push(record),
        }
        Ok(())
    }

    /// Record the label of one column
    pub fn insert_column(&self, record: ColumnRecord) -> Result<(), StorageError> {
        let mut columns = self.columns.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        debug!("Inserted label for source {} column {}", record.source_id, record.index);
        columns.push(record);
        Ok(())
    }

    /// Mark a source as fully classified
    pub fn mark_classified(&self, source_id: i64, at: DateTime<Utc>) -> Result<(), StorageError> {
        let mut sources = self.sources.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        let source = sources
            .iter_mut()
            .find(|s| s.id == source_id)
            .ok_or(StorageError::NotFound(source_id))?;
        source.time_classified = Some(at);
        Ok(())
    }

    /// Sources with a document and a completed classification, ordered by id
    pub fn eligible_sources(&self) -> Result<Vec<SourceRecord>, StorageError> {
        let sources = self.sources.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut eligible: Vec<SourceRecord> = sources
            .iter()
            .filter(|s| s.document.as_deref().is_some_and(|d| !d.is_empty()))
            .filter(|s| s.time_classified.is_some())
            .cloned()
            .collect();
        eligible.sort_by_key(|s| s.id);
        Ok(eligible)
    }

    /// Labels of a source's columns in column order.
    ///
    /// Stored indices must be exactly `0..n`; a gap or repeat is an error.
    /// Unknown label pairs are logged and kept as-is.
    pub fn labels_for(&self, source_id: i64) -> Result<Vec<ColumnLabel>, StorageError> {
        let columns = self.columns.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut records: Vec<&ColumnRecord> =
            columns.iter().filter(|c| c.source_id == source_id).collect();
        records.sort_by_key(|c| c.index);

        let mut labels = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.index != position {
                let detail = if record.index < position {
                    format!("index {} repeated", record.index)
                } else {
                    format!("index {position} missing")
                };
                return Err(StorageError::LabelIndex { source_id, detail });
            }

            let label = ColumnLabel::new(record.main_class.clone(), record.sub_class.clone());
            if !self.taxonomy.is_known(&label) {
                warn!(
                    "Source {} column {}: label {:?}/{:?} is outside the taxonomy",
                    source_id,
                    record.index,
                    label.main(),
                    label.sub()
                );
            }
            labels.push(label);
        }
        Ok(labels)
    }

    /// Get total source count
    pub fn source_count(&self) -> Result<usize, StorageError> {
        let sources = self.sources.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(sources.len())
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
