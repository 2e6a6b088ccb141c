//! Column Analysis Batch Driver
//!
//! Loads every classified source document, analyzes its columns and writes
//! one feature matrix per document. A failing document is reported and
//! skipped; the rest of the batch still runs.

mod config;
mod driver;

pub use self::config::BatchConfig;
pub use driver::{BatchDriver, BatchError, BatchReport, TableFailure};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging at `level`.
///
/// With `json` set, events are emitted as one JSON object per line.
pub fn init_logging(
    level: Level,
    json: bool,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}
