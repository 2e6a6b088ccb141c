//! Feature Vector Assembly

use crate::chars::{
    count_digits, count_letters, count_other, count_spaces, frac_of_chars, unique_char_count,
};
use crate::statistics::{average_line_length, Aggregator};
use crate::tokens::{
    frac_matching_pattern, frac_of_tokens, mean_token_count, mean_token_length, unique_token_count,
};
use asset_sets::{AssetKind, AssetSets};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Version of the metric schema below; bump on any change to names or order
pub const SCHEMA_VERSION: u32 = 1;

/// Number of metrics in a feature vector
pub const FEATURE_DIMENSION: usize = 21;

/// Prefix length for US zip-style matching (ZIP+4 collapses to the 5-digit code)
const ZIP_PREFIX_LEN: usize = 5;

/// Pieces are pipe-delimited since postal codes may contain a space
const POSTAL_SEPARATOR: &str = "|";

static CANADIAN_POSTAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*[a-z][0-9][a-z][ -]?[0-9][a-z][0-9]\s*$").unwrap());

/// One named metric of the column feature battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    MeanTokenCount,
    MeanTokenLength,
    FracDigit,
    FracAlpha,
    FracSpace,
    FracOtherText,
    MeanLineLength,
    MedianLineLength,
    StdLineLength,
    UniqueCharCount,
    UniqueTokenCount,
    FracGivenNames,
    FracSurnames,
    FracStates,
    FracCanada,
    FracCities,
    FracCounties,
    FracUsZip,
    FracFips,
    FracCanadaPostal,
    RowCount,
}

impl Metric {
    /// Every metric in schema order
    pub const ALL: [Metric; FEATURE_DIMENSION] = [
        Metric::MeanTokenCount,
        Metric::MeanTokenLength,
        Metric::FracDigit,
        Metric::FracAlpha,
        Metric::FracSpace,
        Metric::FracOtherText,
        Metric::MeanLineLength,
        Metric::MedianLineLength,
        Metric::StdLineLength,
        Metric::UniqueCharCount,
        Metric::UniqueTokenCount,
        Metric::FracGivenNames,
        Metric::FracSurnames,
        Metric::FracStates,
        Metric::FracCanada,
        Metric::FracCities,
        Metric::FracCounties,
        Metric::FracUsZip,
        Metric::FracFips,
        Metric::FracCanadaPostal,
        Metric::RowCount,
    ];

    /// Serialized name of the metric
    pub fn name(self) -> &'static str {
        match self {
            Metric::MeanTokenCount => "mean_token_count",
            Metric::MeanTokenLength => "mean_token_length",
            Metric::FracDigit => "frac_digit",
            Metric::FracAlpha => "frac_alpha",
            Metric::FracSpace => "frac_space",
            Metric::FracOtherText => "frac_other_text",
            Metric::MeanLineLength => "mean_line_length",
            Metric::MedianLineLength => "median_line_length",
            Metric::StdLineLength => "std_line_length",
            Metric::UniqueCharCount => "unq_char_count",
            Metric::UniqueTokenCount => "unq_token_count",
            Metric::FracGivenNames => "frac_given_names",
            Metric::FracSurnames => "frac_surnames",
            Metric::FracStates => "frac_states",
            Metric::FracCanada => "frac_canada",
            Metric::FracCities => "frac_cities",
            Metric::FracCounties => "frac_counties",
            Metric::FracUsZip => "frac_us_zip",
            Metric::FracFips => "frac_fips",
            Metric::FracCanadaPostal => "frac_canada_postal",
            Metric::RowCount => "row_count",
        }
    }

    /// Position of the metric within a feature vector
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single metric value; counts stay integral when serialized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Real(f64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Count(n) => n as f64,
            MetricValue::Real(v) => v,
        }
    }
}

/// Feature vector for one column, values in [`Metric::ALL`] order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<MetricValue>,
}

impl FeatureVector {
    /// Value of one metric
    pub fn get(&self, metric: Metric) -> MetricValue {
        self.values[metric.index()]
    }

    /// `(name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, MetricValue)> + '_ {
        Metric::ALL
            .iter()
            .zip(self.values.iter())
            .map(|(metric, value)| (metric.name(), *value))
    }

    /// Raw values in schema order
    pub fn values(&self) -> &[MetricValue] {
        &self.values
    }
}

/// Applies the full metric battery to a column
#[derive(Debug, Clone)]
pub struct ColumnFeatureExtractor {
    assets: Arc<AssetSets>,
}

impl ColumnFeatureExtractor {
    /// Create a new extractor over shared reference sets
    pub fn new(assets: Arc<AssetSets>) -> Self {
        Self { assets }
    }

    /// Reference sets used for lexical matching
    pub fn assets(&self) -> &AssetSets {
        &self.assets
    }

    /// Extract every metric from one column's cells.
    ///
    /// Total over all inputs: an empty column produces sentinels, never a panic.
    pub fn extract<S: AsRef<str>>(&self, rows: &[S]) -> FeatureVector {
        debug!("Extracting features: {} rows", rows.len());

        let assets = &self.assets;
        let lexical = |kind: AssetKind, prefix_len: Option<usize>| {
            MetricValue::Real(frac_of_tokens(rows, assets.get(kind), None, prefix_len))
        };

        let values = Metric::ALL
            .iter()
            .map(|metric| match metric {
                Metric::MeanTokenCount => MetricValue::Real(mean_token_count(rows, None)),
                Metric::MeanTokenLength => MetricValue::Real(mean_token_length(rows)),
                Metric::FracDigit => MetricValue::Real(frac_of_chars(count_digits, rows)),
                Metric::FracAlpha => MetricValue::Real(frac_of_chars(count_letters, rows)),
                Metric::FracSpace => MetricValue::Real(frac_of_chars(count_spaces, rows)),
                Metric::FracOtherText => MetricValue::Real(frac_of_chars(count_other, rows)),
                Metric::MeanLineLength => {
                    MetricValue::Real(average_line_length(Aggregator::Mean, rows))
                }
                Metric::MedianLineLength => {
                    MetricValue::Real(average_line_length(Aggregator::Median, rows))
                }
                Metric::StdLineLength => {
                    MetricValue::Real(average_line_length(Aggregator::StdDev, rows))
                }
                Metric::UniqueCharCount => MetricValue::Count(unique_char_count(rows) as u64),
                Metric::UniqueTokenCount => {
                    MetricValue::Count(unique_token_count(rows, None) as u64)
                }
                Metric::FracGivenNames => lexical(AssetKind::GivenNames, None),
                Metric::FracSurnames => lexical(AssetKind::Surnames, None),
                Metric::FracStates => lexical(AssetKind::States, None),
                Metric::FracCanada => lexical(AssetKind::Canada, None),
                Metric::FracCities => lexical(AssetKind::Cities, None),
                Metric::FracCounties => lexical(AssetKind::Counties, None),
                Metric::FracUsZip => lexical(AssetKind::Zipcodes, Some(ZIP_PREFIX_LEN)),
                Metric::FracFips => lexical(AssetKind::Fips, None),
                Metric::FracCanadaPostal => MetricValue::Real(frac_matching_pattern(
                    rows,
                    &CANADIAN_POSTAL_PATTERN,
                    POSTAL_SEPARATOR,
                )),
                Metric::RowCount => MetricValue::Count(rows.len() as u64),
            })
            .collect();

        FeatureVector { values }
    }
}
