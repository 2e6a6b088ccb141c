//! Batch configuration

use crate::driver::BatchError;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use table_analyzer::CsvOptions;
use tracing::Level;

/// Config file looked up in the working directory when no path is given
const DEFAULT_CONFIG_NAME: &str = "column-analysis";

/// Prefix of environment overrides, e.g. `COLUMN_ANALYSIS__MAX_CONCURRENCY=8`
const ENV_PREFIX: &str = "COLUMN_ANALYSIS";

/// Batch driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding the reference asset lists
    pub assets_dir: PathBuf,

    /// JSON snapshot of sources and column labels
    pub manifest: PathBuf,

    /// Root that source document paths are relative to
    pub media_root: PathBuf,

    /// Root under which `analysis/<stem>.json` files are written
    pub output_root: PathBuf,

    /// Single-byte field delimiter of source documents
    pub delimiter: String,

    /// Source documents start with a header row
    pub has_headers: bool,

    /// Tables analyzed at once
    pub max_concurrency: usize,

    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets/lists"),
            manifest: PathBuf::from("manifest.json"),
            media_root: PathBuf::from("."),
            output_root: PathBuf::from("."),
            delimiter: ",".to_string(),
            has_headers: true,
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl BatchConfig {
    /// Layer defaults, then the config file, then environment overrides.
    ///
    /// An explicit `path` must exist; the default `column-analysis.*` file is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parsing options for source documents
    pub fn csv_options(&self) -> Result<CsvOptions, BatchError> {
        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => return Err(BatchError::InvalidDelimiter(self.delimiter.clone())),
        };
        Ok(CsvOptions {
            delimiter,
            has_headers: self.has_headers,
        })
    }

    /// Parsed `log_level`; a misspelled level is an error, not a fallback
    pub fn max_log_level(&self) -> Result<Level, BatchError> {
        Level::from_str(self.log_level.trim())
            .map_err(|_| BatchError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.assets_dir, PathBuf::from("assets/lists"));
        assert!(config.max_concurrency >= 1);
        let options = config.csv_options().unwrap();
        assert_eq!(options.delimiter, b',');
        assert!(options.has_headers);
        assert!(!config.log_json);
    }

    #[test]
    fn test_load_from_file_keeps_unset_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.toml");
        std::fs::write(&path, "delimiter = \";\"\nmax_concurrency = 2\n").unwrap();

        let config = BatchConfig::load(Some(&path)).unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.csv_options().unwrap().delimiter, b';');
        assert_eq!(config.manifest, PathBuf::from("manifest.json"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BatchConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_multibyte_delimiter_is_rejected() {
        let config = BatchConfig {
            delimiter: "||".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.csv_options(), Err(BatchError::InvalidDelimiter(_))));
    }

    #[test]
    fn test_log_level_parsing() {
        let config = BatchConfig {
            log_level: "DEBUG".to_string(),
            ..Default::default()
        };
        assert_eq!(config.max_log_level().unwrap(), Level::DEBUG);

        let config = BatchConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.max_log_level(),
            Err(BatchError::InvalidLogLevel(l)) if l == "verbose"
        ));
    }
}
