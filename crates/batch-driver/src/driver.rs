//! Batch Driver

use crate::config::BatchConfig;
use asset_sets::{AssetError, AssetSets};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{analysis_path, AnalysisSink, Repository, SourceRecord, StorageError};
use table_analyzer::{AnalysisError, CsvOptions, Table, TableAnalyzer, TableError};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Errors raised by the batch driver
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid delimiter {0:?}: expected a single byte")]
    InvalidDelimiter(String),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error("Table load failed: {0}")]
    Table(#[from] TableError),
    #[error("Analysis rejected: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Source {0} has no document")]
    MissingDocument(i64),
    #[error("Duplicate output path {} (already written by source {first})", path.display())]
    DuplicateOutput { path: PathBuf, first: i64 },
    #[error("Analysis task failed: {0}")]
    Task(String),
    #[error("Invalid log level {0:?}")]
    InvalidLogLevel(String),
}

/// A source that was skipped, and why
#[derive(Debug, Clone)]
pub struct TableFailure {
    pub source_id: i64,
    pub document: Option<String>,
    pub reason: String,
}

/// Outcome of one batch run, in source order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// `(source id, output path)` for every matrix written
    pub written: Vec<(i64, PathBuf)>,
    pub failures: Vec<TableFailure>,
}

impl BatchReport {
    /// Every eligible source was written
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Everything one table job needs, cheap to clone into a blocking task
#[derive(Clone)]
struct TableJob {
    repository: Arc<Repository>,
    analyzer: TableAnalyzer,
    sink: Arc<dyn AnalysisSink>,
    media_root: PathBuf,
    csv: CsvOptions,
}

impl TableJob {
    fn process(&self, source: &SourceRecord) -> Result<PathBuf, BatchError> {
        let document = source
            .document
            .as_deref()
            .ok_or(BatchError::MissingDocument(source.id))?;

        let table = Table::from_csv_path(self.media_root.join(document), &self.csv)?;
        let labels = self.repository.labels_for(source.id)?;
        let matrix = self.analyzer.analyze(&table, &labels)?;
        Ok(self.sink.write(document, &matrix)?)
    }
}

/// Analyzes every classified source and persists the resulting matrices
pub struct BatchDriver {
    job: TableJob,
    max_concurrency: usize,
}

impl BatchDriver {
    /// Create a driver over an already-loaded label store and asset sets
    pub fn new(
        repository: Arc<Repository>,
        assets: Arc<AssetSets>,
        sink: Arc<dyn AnalysisSink>,
        config: &BatchConfig,
    ) -> Result<Self, BatchError> {
        Ok(Self {
            job: TableJob {
                repository,
                analyzer: TableAnalyzer::new(assets),
                sink,
                media_root: config.media_root.clone(),
                csv: config.csv_options()?,
            },
            max_concurrency: config.max_concurrency.max(1),
        })
    }

    /// Run the batch.
    ///
    /// Tables are analyzed on the blocking pool, at most `max_concurrency` at
    /// a time. A table that fails to load, label, analyze or write is logged
    /// and recorded in the report; only failing to list sources aborts.
    pub async fn run(&self) -> Result<BatchReport, BatchError> {
        let sources = self.job.repository.eligible_sources()?;
        info!(
            "Starting batch: {} eligible sources, concurrency {}",
            sources.len(),
            self.max_concurrency
        );

        // Two documents sharing a stem would write the same file; the first
        // source (by id) keeps the path
        let mut claimed: HashMap<PathBuf, i64> = HashMap::new();
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut handles = Vec::with_capacity(sources.len());
        for source in sources {
            if let Some(document) = source.document.as_deref() {
                let path = analysis_path(document);
                if let Some(&first) = claimed.get(&path) {
                    handles.push((source, Err(BatchError::DuplicateOutput { path, first })));
                    continue;
                }
                claimed.insert(path, source.id);
            }

            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| BatchError::Task(e.to_string()))?;
            let job = self.job.clone();
            let task_source = source.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job.process(&task_source)
            });
            handles.push((source, Ok(handle)));
        }

        let mut report = BatchReport::default();
        for (source, handle) in handles {
            let outcome = match handle {
                Ok(handle) => match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(BatchError::Task(e.to_string())),
                },
                Err(e) => Err(e),
            };
            match outcome {
                Ok(path) => {
                    debug!("Source {} -> {}", source.id, path.display());
                    report.written.push((source.id, path));
                }
                Err(e) => {
                    warn!(
                        "Skipping source {} ({}): {}",
                        source.id,
                        source.document.as_deref().unwrap_or("<none>"),
                        e
                    );
                    report.failures.push(TableFailure {
                        source_id: source.id,
                        document: source.document.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch complete: {} written, {} skipped",
            report.written.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
