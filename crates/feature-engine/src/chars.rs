//! Character Class Primitives
//!
//! Classification uses Rust's Unicode-aware `char` predicates, so accented
//! letters count as alphabetic and non-ASCII digits as numeric. The classes
//! are disjoint: a character that is both numeric and alphabetic (Roman
//! numeral code points, for one) counts as a digit only.

use crate::SENTINEL;
use std::collections::HashSet;

/// Number of numeric characters
pub fn count_digits(s: &str) -> usize {
    s.chars().filter(|c| c.is_numeric()).count()
}

/// Number of alphabetic characters
pub fn count_letters(s: &str) -> usize {
    s.chars()
        .filter(|c| c.is_alphabetic() && !c.is_numeric())
        .count()
}

/// Number of whitespace characters
pub fn count_spaces(s: &str) -> usize {
    s.chars().filter(|c| c.is_whitespace()).count()
}

/// Everything that is not a digit, letter or whitespace
pub fn count_other(s: &str) -> usize {
    s.chars()
        .count()
        .saturating_sub(count_digits(s) + count_letters(s) + count_spaces(s))
}

/// Fraction of characters in the concatenated column matched by `classify`.
///
/// Cells are joined with no separator. A column with zero total characters
/// yields the sentinel.
pub fn frac_of_chars<S, F>(classify: F, rows: &[S]) -> f64
where
    S: AsRef<str>,
    F: Fn(&str) -> usize,
{
    let mut aggregated = String::new();
    for cell in rows {
        aggregated.push_str(cell.as_ref());
    }
    let total = aggregated.chars().count();
    if total == 0 {
        return SENTINEL;
    }
    classify(&aggregated) as f64 / total as f64
}

/// Distinct characters across every cell of the column
pub fn unique_char_count<S: AsRef<str>>(rows: &[S]) -> usize {
    rows.iter()
        .flat_map(|cell| cell.as_ref().chars())
        .collect::<HashSet<char>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_character_classes() {
        let s = "123 Main St., #4";
        assert_eq!(count_digits(s), 4);
        assert_eq!(count_letters(s), 6);
        assert_eq!(count_spaces(s), 3);
        assert_eq!(count_other(s), 3);
    }

    #[test]
    fn test_unicode_classification() {
        assert_eq!(count_letters("Montréal"), 8);
        assert_eq!(count_spaces("a\u{00A0}b\tc"), 2);
        assert_eq!(count_other("Montréal"), 0);
        assert_eq!(count_digits("Ⅻ"), 1);
        assert_eq!(count_letters("Ⅻ"), 0);
    }

    #[test]
    fn test_frac_digit_example() {
        let rows = ["123 Main St", "456 Oak Ave", ""];
        let frac = frac_of_chars(count_digits, &rows);
        assert!((frac - 6.0 / 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_column_sentinel() {
        let none: [&str; 0] = [];
        assert_eq!(frac_of_chars(count_letters, &none), SENTINEL);
        assert_eq!(frac_of_chars(count_letters, &["", ""]), SENTINEL);
    }

    #[test]
    fn test_unique_chars() {
        assert_eq!(unique_char_count(&["aab", "bc"]), 3);
        assert_eq!(unique_char_count(&[""]), 0);
    }

    proptest! {
        #[test]
        fn prop_fractions_sum_to_one(rows in prop::collection::vec(".{0,12}", 1..8)) {
            prop_assume!(rows.iter().any(|r| !r.is_empty()));
            let total = frac_of_chars(count_digits, &rows)
                + frac_of_chars(count_letters, &rows)
                + frac_of_chars(count_spaces, &rows)
                + frac_of_chars(count_other, &rows);
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_unique_chars_permutation_invariant(
            mut rows in prop::collection::vec("[a-z0-9 ]{0,8}", 0..8)
        ) {
            let before = unique_char_count(&rows);
            rows.reverse();
            prop_assert_eq!(before, unique_char_count(&rows));
        }
    }
}
