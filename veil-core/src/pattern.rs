//! Pattern alignment and pattern entry rules.
//!
//! A pattern (frequency) is a plain digit string. A tick is *aligned* when
//! every pattern occurs as a contiguous substring of every veil. Matching is
//! ordinary substring containment; there is no pattern syntax.

use std::ops::Range;

use crate::error::{Result, VeilError};

/// Returns true iff every pattern occurs in every veil.
///
/// An empty `patterns` slice is vacuously aligned here; the engine refuses
/// to tick without patterns, so callers never rely on that answer. An empty
/// `veils` slice is vacuously aligned as well.
///
/// # Example
///
/// ```rust
/// use veil_core::pattern::all_aligned;
///
/// let veils = ["9123000456", "4561230000"];
/// assert!(all_aligned(&["123", "456"], &veils));
/// assert!(!all_aligned(&["999"], &veils));
/// ```
pub fn all_aligned<P, V>(patterns: &[P], veils: &[V]) -> bool
where
    P: AsRef<str>,
    V: AsRef<str>,
{
    patterns
        .iter()
        .all(|p| veils.iter().all(|v| v.as_ref().contains(p.as_ref())))
}

/// Strip every non-digit character, as typed input is filtered.
pub fn sanitize_pattern(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Sanitise and check a pattern against the current aperture.
///
/// Rejects input with no digits at all and patterns longer than the
/// aperture, since those could never align.
pub fn validate_pattern(raw: &str, aperture: usize) -> Result<String> {
    let pattern = sanitize_pattern(raw);
    if pattern.is_empty() {
        return Err(VeilError::Pattern("pattern must contain at least one digit".into()));
    }
    if pattern.len() > aperture {
        return Err(VeilError::Pattern(format!(
            "'{}' is longer than the aperture ({} digits)",
            pattern, aperture
        )));
    }
    Ok(pattern)
}

/// True when `pattern` is a non-empty digit string that fits `aperture`.
pub fn is_valid_pattern(pattern: &str, aperture: usize) -> bool {
    !pattern.is_empty() && pattern.len() <= aperture && pattern.bytes().all(|b| b.is_ascii_digit())
}

/// A run of a veil, either covered by some pattern occurrence or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split a veil into matched / unmatched runs for the diagnostic view.
///
/// Every occurrence of every pattern is marked, including overlapping
/// ones, and adjacent marked ranges are merged.
pub fn highlight<'a, P: AsRef<str>>(veil: &'a str, patterns: &[P]) -> Vec<Segment<'a>> {
    if veil.is_empty() {
        return Vec::new();
    }
    if !veil.is_ascii() {
        return vec![Segment { text: veil, matched: false }];
    }
    let mut covered = vec![false; veil.len()];
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            continue;
        }
        for range in occurrences(veil, pattern) {
            covered[range].iter_mut().for_each(|c| *c = true);
        }
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for idx in 1..=veil.len() {
        if idx == veil.len() || covered[idx] != covered[start] {
            segments.push(Segment {
                text: &veil[start..idx],
                matched: covered[start],
            });
            start = idx;
        }
    }
    segments
}

/// All (possibly overlapping) byte ranges where `pattern` occurs.
fn occurrences(veil: &str, pattern: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(pos) = veil.get(from..).and_then(|rest| rest.find(pattern)) {
        let begin = from + pos;
        found.push(begin..begin + pattern.len());
        from = begin + 1;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pattern_single_veil() {
        assert!(all_aligned(&["528"], &["1234528999"]));
        assert!(!all_aligned(&["529"], &["1234528999"]));
    }

    #[test]
    fn test_pattern_equal_to_veil() {
        assert!(all_aligned(&["1234528999"], &["1234528999"]));
    }

    #[test]
    fn test_pattern_longer_than_veil() {
        assert!(!all_aligned(&["12345289990"], &["1234528999"]));
    }

    #[test]
    fn test_no_match_across_veil_boundary() {
        // "9991" only exists if the two veils were concatenated
        assert!(!all_aligned(&["9991"], &["1234528999", "1000000000"]));
    }

    #[test]
    fn test_every_pattern_in_every_veil() {
        let veils = ["9123000000", "0000456111"];
        assert!(!all_aligned(&["123", "456"], &veils));
        let veils = ["9123456000", "0000456123"];
        assert!(all_aligned(&["123", "456"], &veils));
    }

    #[test]
    fn test_vacuous_cases() {
        let none: [&str; 0] = [];
        assert!(all_aligned(&none, &["123"]));
        assert!(all_aligned(&["123"], &none));
    }

    #[test]
    fn test_sanitize_strips_non_digits() {
        assert_eq!(sanitize_pattern("1a2-3 "), "123");
        assert_eq!(sanitize_pattern("abc"), "");
        assert_eq!(sanitize_pattern("٣"), ""); // non-ASCII digits are dropped
    }

    #[test]
    fn test_validate_pattern() {
        assert_eq!(validate_pattern("5-2-8", 6).unwrap(), "528");
        assert!(validate_pattern("xyz", 6).is_err());
        assert!(validate_pattern("1234567", 6).is_err());
        assert_eq!(validate_pattern("123456", 6).unwrap(), "123456");
    }

    #[test]
    fn test_is_valid_pattern() {
        assert!(is_valid_pattern("07", 6));
        assert!(!is_valid_pattern("", 6));
        assert!(!is_valid_pattern("12a", 6));
        assert!(!is_valid_pattern("1234567", 6));
    }

    #[test]
    fn test_highlight_merges_overlaps() {
        let segments = highlight("1212120", &["121"]);
        assert_eq!(
            segments,
            vec![
                Segment { text: "121212", matched: true },
                Segment { text: "0", matched: false },
            ]
        );
    }

    #[test]
    fn test_highlight_multiple_patterns() {
        let segments = highlight("9123000456", &["123", "456"]);
        let texts: Vec<(&str, bool)> = segments.iter().map(|s| (s.text, s.matched)).collect();
        assert_eq!(
            texts,
            vec![("9", false), ("123", true), ("000", false), ("456", true)]
        );
    }

    #[test]
    fn test_highlight_without_match() {
        let segments = highlight("000", &["1"]);
        assert_eq!(segments, vec![Segment { text: "000", matched: false }]);
        assert!(highlight("", &["1"]).is_empty());
    }
}
