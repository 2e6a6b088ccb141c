//! Feature Engineering Engine
//!
//! Character and token primitives plus the per-column feature battery used to
//! train the column classifier.

pub mod chars;
mod features;
pub mod statistics;
pub mod tokens;

pub use features::{
    ColumnFeatureExtractor, FeatureVector, Metric, MetricValue, FEATURE_DIMENSION, SCHEMA_VERSION,
};
pub use statistics::Aggregator;

/// Returned by fractional metrics whose denominator is zero
pub const SENTINEL: f64 = -1.0;
