//! Table Analyzer

use crate::error::AnalysisError;
use crate::labels::ColumnLabel;
use crate::matrix::{FeatureMatrix, FeatureRow};
use crate::table::Table;
use asset_sets::AssetSets;
use feature_engine::ColumnFeatureExtractor;
use std::sync::Arc;
use tracing::debug;

/// Runs the column feature battery over every column of a table
#[derive(Debug, Clone)]
pub struct TableAnalyzer {
    extractor: ColumnFeatureExtractor,
}

impl TableAnalyzer {
    /// Create an analyzer over shared reference sets
    pub fn new(assets: Arc<AssetSets>) -> Self {
        Self {
            extractor: ColumnFeatureExtractor::new(assets),
        }
    }

    /// Analyze every column and attach its label.
    ///
    /// `labels[i]` belongs to column `i`. A length mismatch is a caller bug
    /// and rejects the call instead of truncating or padding.
    pub fn analyze(
        &self,
        table: &Table,
        labels: &[ColumnLabel],
    ) -> Result<FeatureMatrix, AnalysisError> {
        if labels.len() != table.column_count() {
            return Err(AnalysisError::LabelMismatch {
                labels: labels.len(),
                columns: table.column_count(),
            });
        }

        debug!(
            "Analyzing table: {} columns x {} rows",
            table.column_count(),
            table.row_count()
        );

        let rows = table
            .columns()
            .iter()
            .zip(labels)
            .map(|(column, label)| {
                let features = self.extractor.extract(column.cells());
                let row = FeatureRow::new(column.key(), label.clone(), features);
                debug!("Column '{}' -> {}", row.key(), row.joined_label());
                row
            })
            .collect();

        Ok(FeatureMatrix::new(rows))
    }
}
