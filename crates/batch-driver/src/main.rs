//! Column Analysis - Batch Entry Point
//!
//! Usage: `column-analysis [CONFIG]`. Without an argument the config path is
//! taken from `COLUMN_ANALYSIS_CONFIG`, then `./column-analysis.toml`.

use anyhow::Context;
use asset_sets::AssetSets;
use batch_driver::{init_logging, BatchConfig, BatchDriver};
use feature_engine::SCHEMA_VERSION;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{AnalysisSink, FileSink, Repository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("COLUMN_ANALYSIS_CONFIG").map(PathBuf::from));
    let config = BatchConfig::load(config_path.as_deref()).context("loading configuration")?;

    let level = config.max_log_level()?;
    init_logging(level, config.log_json).context("installing tracing subscriber")?;
    info!(
        "=== Column Analysis v{} (metric schema v{}) ===",
        env!("CARGO_PKG_VERSION"),
        SCHEMA_VERSION
    );

    // Asset lists are required for the lexical metrics; a missing one aborts
    let assets = AssetSets::load_dir(&config.assets_dir).context("loading reference asset lists")?;
    let repository = Repository::open(&config.manifest)
        .with_context(|| format!("opening label manifest {}", config.manifest.display()))?;
    let sink: Arc<dyn AnalysisSink> = Arc::new(FileSink::new(&config.output_root));

    let driver = BatchDriver::new(Arc::new(repository), Arc::new(assets), sink, &config)?;
    let report = driver.run().await?;

    info!(
        "Wrote {} feature matrices, skipped {}",
        report.written.len(),
        report.failures.len()
    );

    Ok(())
}
