//! Table Analyzer
//!
//! Turns a delimited-text table plus one label per column into a feature
//! matrix: one row per input column, one field per metric.

mod analyzer;
mod error;
mod labels;
mod matrix;
mod table;

pub use analyzer::TableAnalyzer;
pub use error::{AnalysisError, TableError};
pub use labels::{label_or_reject, ColumnLabel, Taxonomy, REJECT_LABEL};
pub use matrix::{FeatureMatrix, FeatureRow};
pub use table::{Column, CsvOptions, Table};
