//! Feature Matrix Sinks

use crate::StorageError;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use table_analyzer::FeatureMatrix;
use tracing::debug;

/// Directory that holds serialized feature matrices
const ANALYSIS_DIR: &str = "analysis";

/// Relative output path for a source document: `analysis/<stem>.json`.
///
/// The stem is the base name up to its first `.`, so `uploads/a.b.csv` maps
/// to `analysis/a.json`. A base name starting with `.` keeps the full name.
pub fn analysis_path(document: &str) -> PathBuf {
    let base = Path::new(document)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = base.split('.').next().unwrap_or_default().to_string();
    let stem = if stem.is_empty() { base } else { stem };
    Path::new(ANALYSIS_DIR).join(format!("{stem}.json"))
}

/// Destination for analyzed tables
pub trait AnalysisSink: Send + Sync {
    /// Persist the matrix computed from `document`, returning where it went
    fn write(&self, document: &str, matrix: &FeatureMatrix) -> Result<PathBuf, StorageError>;
}

/// Writes JSON files beneath an output root
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AnalysisSink for FileSink {
    fn write(&self, document: &str, matrix: &FeatureMatrix) -> Result<PathBuf, StorageError> {
        let path = self.root.join(analysis_path(document));
        let io_err = |source| StorageError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut writer = BufWriter::new(File::create(&path).map_err(io_err)?);
        matrix.write_json(&mut writer)?;
        writer.flush().map_err(io_err)?;

        debug!("Wrote {} columns to {}", matrix.len(), path.display());
        Ok(path)
    }
}

/// Keeps rendered JSON in memory, keyed by output path
#[derive(Debug, Default)]
pub struct MemorySink {
    written: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn written(&self) -> Result<BTreeMap<PathBuf, String>, StorageError> {
        let written = self.written.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(written.clone())
    }
}

impl AnalysisSink for MemorySink {
    fn write(&self, document: &str, matrix: &FeatureMatrix) -> Result<PathBuf, StorageError> {
        let path = analysis_path(document);
        let json = matrix.to_json_string()?;
        self.written
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?
            .insert(path.clone(), json);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_sets::AssetSets;
    use std::sync::Arc;
    use table_analyzer::{ColumnLabel, Table, TableAnalyzer};

    fn matrix() -> FeatureMatrix {
        let table = Table::from_columns([("zip", ["75001", "90210"])]).unwrap();
        let analyzer = TableAnalyzer::new(Arc::new(AssetSets::builder().build()));
        analyzer.analyze(&table, &[ColumnLabel::unlabeled()]).unwrap()
    }

    #[test]
    fn test_analysis_path() {
        assert_eq!(analysis_path("uploads/parcels.csv"), PathBuf::from("analysis/parcels.json"));
        assert_eq!(analysis_path("uploads/a.b.csv"), PathBuf::from("analysis/a.json"));
        assert_eq!(analysis_path("noext"), PathBuf::from("analysis/noext.json"));
        assert_eq!(analysis_path("uploads/.hidden"), PathBuf::from("analysis/.hidden.json"));
    }

    #[test]
    fn test_file_sink_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        let path = sink.write("uploads/parcels.csv", &matrix()).unwrap();

        assert_eq!(path, dir.path().join("analysis").join("parcels.json"));
        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["zip"]["row_count"], 2);
        assert_eq!(json["zip"]["label"], "reject");
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.write("uploads/parcels.csv", &matrix()).unwrap();
        let written = sink.written().unwrap();
        assert!(written.contains_key(Path::new("analysis/parcels.json")));
    }

    #[test]
    fn test_memory_sink_poisoned_lock() {
        let sink = Arc::new(MemorySink::new());
        let held = sink.clone();
        let poisoner = std::thread::spawn(move || {
            let _guard = held.written.lock().unwrap();
            panic!("panicked while holding the sink lock");
        });
        assert!(poisoner.join().is_err());

        assert!(matches!(sink.written(), Err(StorageError::Lock(_))));
        assert!(matches!(
            sink.write("uploads/parcels.csv", &matrix()),
            Err(StorageError::Lock(_))
        ));
    }
}
