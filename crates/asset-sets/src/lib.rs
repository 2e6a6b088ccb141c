//! Reference Asset Sets
//!
//! Static, deduplicated, lower-cased token sets loaded once per process and
//! shared read-only by every column analysis.

pub mod builtin;
mod error;
mod set;

pub use error::AssetError;
pub use set::{AssetKind, AssetSet, AssetSets, AssetSetsBuilder};
