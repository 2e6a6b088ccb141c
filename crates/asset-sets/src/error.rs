//! Asset Loading Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading reference asset lists
#[derive(Debug, Error)]
pub enum AssetError {
    /// Backing list file is missing or unreadable
    #[error("Asset list '{name}' could not be read from {}: {source}", path.display())]
    MissingAssetList {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
