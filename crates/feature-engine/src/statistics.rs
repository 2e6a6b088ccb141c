//! Line Length Statistics

use crate::SENTINEL;

/// Aggregation applied to the per-cell line lengths of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    Mean,
    /// Middle value; mean of the two middle values for even counts
    Median,
    /// Population standard deviation (divisor n)
    StdDev,
}

impl Aggregator {
    /// Apply to a slice of values, `None` when the slice is empty
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Aggregator::Mean => mean(values),
            Aggregator::Median => median(values),
            Aggregator::StdDev => std_dev(values),
        }
    }
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median without mutating the input
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation: sqrt(E[(X-μ)²])
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let m2: f64 = values
        .iter()
        .map(|&v| {
            let d = v - mean;
            d * d
        })
        .sum();
    Some((m2 / values.len() as f64).sqrt())
}

/// Aggregate the character lengths of every cell in a column.
///
/// Returns the sentinel for a column with no cells.
pub fn average_line_length<S: AsRef<str>>(aggregator: Aggregator, rows: &[S]) -> f64 {
    let lengths: Vec<f64> = rows
        .iter()
        .map(|cell| cell.as_ref().chars().count() as f64)
        .collect();
    aggregator.apply(&lengths).unwrap_or(SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&values).unwrap() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Population std dev of this dataset is exactly 2.0
        assert!((std_dev(&values).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_line_lengths() {
        let rows = ["123 Main St", "456 Oak Ave", ""];
        let mean = average_line_length(Aggregator::Mean, &rows);
        assert!((mean - 22.0 / 3.0).abs() < 1e-12);
        assert_eq!(average_line_length(Aggregator::Median, &rows), 11.0);

        let rows: [&str; 0] = [];
        assert_eq!(average_line_length(Aggregator::StdDev, &rows), SENTINEL);
    }

    #[test]
    fn test_line_length_counts_chars_not_bytes() {
        assert_eq!(average_line_length(Aggregator::Mean, &["Québec"]), 6.0);
    }
}
