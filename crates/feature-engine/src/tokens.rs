//! Token Primitives
//!
//! Word-level measurements over a column. Without an explicit separator a
//! value splits on runs of whitespace, so leading, trailing and repeated
//! whitespace never produce empty tokens. With a separator every occurrence
//! splits, empty pieces included.

use crate::SENTINEL;
use asset_sets::AssetSet;
use regex::Regex;
use std::collections::HashSet;

/// Split a value on `sep`, or on whitespace runs when `sep` is `None` or empty
pub fn tokenize<'a>(value: &'a str, sep: Option<&str>) -> Vec<&'a str> {
    match sep {
        Some(sep) if !sep.is_empty() => value.split(sep).collect(),
        _ => value.split_whitespace().collect(),
    }
}

/// Join every cell of a column with `sep`
pub fn join_cells<S: AsRef<str>>(rows: &[S], sep: &str) -> String {
    let mut joined = String::new();
    for (i, cell) in rows.iter().enumerate() {
        if i > 0 {
            joined.push_str(sep);
        }
        joined.push_str(cell.as_ref());
    }
    joined
}

/// Fraction of the column's tokens found in `assets`.
///
/// Cells are joined with `sep` (a single space by default) and re-tokenized.
/// With `prefix_len`, only the first `prefix_len` characters of each token are
/// looked up. Matching is case-insensitive. Zero tokens yields the sentinel.
pub fn frac_of_tokens<S: AsRef<str>>(
    rows: &[S],
    assets: &AssetSet,
    sep: Option<&str>,
    prefix_len: Option<usize>,
) -> f64 {
    let joined = join_cells(rows, sep.unwrap_or(" "));
    let tokens = tokenize(&joined, sep);
    if tokens.is_empty() {
        return SENTINEL;
    }

    let matched = tokens
        .iter()
        .filter(|token| {
            let key = match prefix_len {
                Some(n) => token.chars().take(n).collect::<String>(),
                None => token.to_string(),
            };
            assets.contains(&key.to_lowercase())
        })
        .count();

    matched as f64 / tokens.len() as f64
}

/// Fraction of `sep`-delimited pieces matching `pattern`.
///
/// Used for codes with embedded spaces (Canadian postal codes), so `sep` is
/// typically a pipe. When every piece is empty the column carries no text and
/// the sentinel is returned.
pub fn frac_matching_pattern<S: AsRef<str>>(rows: &[S], pattern: &Regex, sep: &str) -> f64 {
    let joined = join_cells(rows, sep);
    let pieces: Vec<&str> = if sep.is_empty() {
        vec![joined.as_str()]
    } else {
        joined.split(sep).collect()
    };
    if pieces.iter().all(|piece| piece.is_empty()) {
        return SENTINEL;
    }

    let matched = pieces.iter().filter(|piece| pattern.is_match(piece)).count();
    matched as f64 / pieces.len() as f64
}

/// Mean number of tokens per cell; sentinel for a column with no cells
pub fn mean_token_count<S: AsRef<str>>(rows: &[S], sep: Option<&str>) -> f64 {
    if rows.is_empty() {
        return SENTINEL;
    }
    let total: usize = rows
        .iter()
        .map(|cell| tokenize(cell.as_ref(), sep).len())
        .sum();
    total as f64 / rows.len() as f64
}

/// Mean character length of a token, over every token in the column
pub fn mean_token_length<S: AsRef<str>>(rows: &[S]) -> f64 {
    let (count, chars) = rows
        .iter()
        .flat_map(|cell| tokenize(cell.as_ref(), None))
        .fold((0usize, 0usize), |(count, chars), token| {
            (count + 1, chars + token.chars().count())
        });
    if count == 0 {
        return SENTINEL;
    }
    chars as f64 / count as f64
}

/// Distinct tokens across the column
pub fn unique_token_count<S: AsRef<str>>(rows: &[S], sep: Option<&str>) -> usize {
    let joined = join_cells(rows, sep.unwrap_or(" "));
    tokenize(&joined, sep).into_iter().collect::<HashSet<&str>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_sets::AssetKind;
    use proptest::prelude::*;

    fn zipcodes() -> AssetSet {
        AssetSet::from_tokens(AssetKind::Zipcodes.file_name(), ["75001", "90210"])
    }

    #[test]
    fn test_tokenize_whitespace_runs() {
        assert_eq!(tokenize("  123   Main\tSt ", None), vec!["123", "Main", "St"]);
        assert!(tokenize("   ", None).is_empty());
    }

    #[test]
    fn test_tokenize_explicit_separator_keeps_empties() {
        assert_eq!(tokenize("a||b", Some("|")), vec!["a", "", "b"]);
        assert_eq!(tokenize("a b", Some("")), vec!["a", "b"]);
    }

    #[test]
    fn test_states_fraction() {
        let states = AssetSet::from_tokens("states", ["tx", "ca", "ny", "texas"]);
        assert_eq!(frac_of_tokens(&["TX", "CA", "NY"], &states, None, None), 1.0);
        assert_eq!(frac_of_tokens(&["TX", "Ontario"], &states, None, None), 0.5);
    }

    #[test]
    fn test_zip_prefix_matching() {
        let zips = zipcodes();
        assert_eq!(frac_of_tokens(&["75001", "90210"], &zips, None, Some(5)), 1.0);
        assert_eq!(frac_of_tokens(&["75001-1234", "90210"], &zips, None, Some(5)), 1.0);
        assert_eq!(frac_of_tokens(&["75001-1234"], &zips, None, None), 0.0);
    }

    #[test]
    fn test_token_fraction_empty_column() {
        let zips = zipcodes();
        let none: [&str; 0] = [];
        assert_eq!(frac_of_tokens(&none, &zips, None, Some(5)), SENTINEL);
        assert_eq!(frac_of_tokens(&["", " "], &zips, None, Some(5)), SENTINEL);
    }

    #[test]
    fn test_pattern_fraction() {
        let postal = Regex::new(r"^[A-Z]\d[A-Z] ?\d[A-Z]\d$").unwrap();
        let rows = ["K1A 0B1", "M5V3L9", "75001", ""];
        assert_eq!(frac_matching_pattern(&rows, &postal, "|"), 0.5);
        assert_eq!(frac_matching_pattern(&["", ""], &postal, "|"), SENTINEL);
        let none: [&str; 0] = [];
        assert_eq!(frac_matching_pattern(&none, &postal, "|"), SENTINEL);
    }

    #[test]
    fn test_mean_token_metrics() {
        let rows = ["123 Main St", "456 Oak Ave", ""];
        assert_eq!(mean_token_count(&rows, None), 2.0);
        // 3 + 4 + 2 + 3 + 3 + 3 characters over 6 tokens
        assert_eq!(mean_token_length(&rows), 3.0);
    }

    #[test]
    fn test_mean_token_metrics_empty() {
        let none: [&str; 0] = [];
        assert_eq!(mean_token_count(&none, None), SENTINEL);
        assert_eq!(mean_token_count(&["", ""], None), 0.0);
        assert_eq!(mean_token_length(&["", "  "]), SENTINEL);
    }

    #[test]
    fn test_unique_tokens() {
        assert_eq!(unique_token_count(&["Main St", "Oak St", "Main"], None), 3);
        assert_eq!(unique_token_count(&["a|b", "b"], Some("|")), 2);
    }

    proptest! {
        #[test]
        fn prop_unique_tokens_permutation_invariant(
            mut rows in prop::collection::vec("[a-c ]{0,6}", 0..10)
        ) {
            let before = unique_token_count(&rows, None);
            let mid = rows.len() / 2;
            rows.rotate_left(mid);
            prop_assert_eq!(before, unique_token_count(&rows, None));
        }
    }
}
