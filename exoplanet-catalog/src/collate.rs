//! Locale-style string ordering.
//!
//! Approximates root-locale collation closely enough for catalog labels:
//!
//! 1. **Primary** — strings are decomposed (NFD) and combining marks are
//!    dropped, so `É` weighs as `e`; letters compare case-insensitively;
//!    whitespace and punctuation sort before digits, digits before letters.
//! 2. **Secondary** — unaccented before accented.
//! 3. **Tertiary** — at the first case difference, lowercase sorts first.
//! 4. Remaining ties fall back to code point order, so the result is a
//!    total order and equal only for identical strings.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two strings in dictionary order. See the module docs.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_chars(a)
        .map(primary_weight)
        .cmp(base_chars(b).map(primary_weight))
        .then_with(|| marks(a).cmp(marks(b)))
        .then_with(|| {
            base_chars(a)
                .map(char::is_uppercase)
                .cmp(base_chars(b).map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

fn marks(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| is_combining_mark(*c))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("kepler", "Kepler"), Ordering::Less);
    }

    #[test]
    fn test_identical_strings_equal() {
        assert_eq!(locale_cmp("Transit", "Transit"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_cmp("Kepler", "Kepler-10"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_before_digits_before_letters() {
        assert_eq!(locale_cmp("HD_1", "HD1"), Ordering::Less);
        assert_eq!(locale_cmp("HD 1", "HDA"), Ordering::Less);
        assert_eq!(locale_cmp("K2", "KA"), Ordering::Less);
    }

    #[test]
    fn test_accented_letters_sort_with_base_letter() {
        assert_eq!(locale_cmp("Éta", "Zeta"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "É"), Ordering::Less);
    }

    #[test]
    fn test_sort_accented_host_names() {
        let mut hosts = vec!["Zeta Del", "Ösel-3", "Éta Cas", "Eta Cas", "Oph 11"];
        hosts.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(hosts, vec!["Eta Cas", "Éta Cas", "Oph 11", "Ösel-3", "Zeta Del"]);
    }

    #[test]
    fn test_sort_catalog_labels() {
        let mut labels = vec![
            "Transit",
            "imaging",
            "Astrometry",
            "Radial Velocity",
            "Eclipse Timing Variations",
        ];
        labels.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(
            labels,
            vec![
                "Astrometry",
                "Eclipse Timing Variations",
                "imaging",
                "Radial Velocity",
                "Transit",
            ]
        );
    }
}
