//! Feature Matrix
//!
//! Serialized as `{ columnKey: { metric: value, ..., main_class, sub_class, label } }`
//! with input column order and metric order preserved, so the JSON reloads
//! directly as a metrics-by-column table.

use crate::labels::ColumnLabel;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::io::Write;

/// One analyzed column: its key, label fields and metrics
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    key: String,
    label: ColumnLabel,
    joined_label: String,
    features: FeatureVector,
}

impl FeatureRow {
    pub fn new(key: impl Into<String>, label: ColumnLabel, features: FeatureVector) -> Self {
        let joined_label = label.label_or_reject();
        Self {
            key: key.into(),
            label,
            joined_label,
            features,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &ColumnLabel {
        &self.label
    }

    /// Main and sub joined into one target, or `reject`
    pub fn joined_label(&self) -> &str {
        &self.joined_label
    }

    pub fn features(&self) -> &FeatureVector {
        &self.features
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_DIMENSION + 3))?;
        for (name, value) in self.features.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.serialize_entry("main_class", &self.label.main())?;
        map.serialize_entry("sub_class", &self.label.sub())?;
        map.serialize_entry("label", &self.joined_label)?;
        map.end()
    }
}

/// Table-level output: one row per input column, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Deterministic JSON rendering
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Stream the JSON rendering into `writer`
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }
}

impl Serialize for FeatureMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.key, row)?;
        }
        map.end()
    }
}
