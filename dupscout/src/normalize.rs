//! Sentence normalization.
//!
//! A normalized sentence is ASCII-lowercased, keeps only ASCII letters and
//! digits separated by single spaces, and has no leading or trailing space.
//! Hyphens, en-dashes and em-dashes separate words like any other punctuation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const DASHES: [char; 3] = ['-', '–', '—'];

/// Normalized text plus the source position of every normalized character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedText {
    pub text: String,
    /// `map[i]` is the byte offset in the original of the character that produced `text[i]`
    pub map: Vec<usize>,
}

impl NormalizedText {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Canonicalizes `text` for duplicate comparison
pub fn normalize(text: &str) -> String {
    let lowered = text.to_ascii_lowercase().replace(DASHES, " ");
    let stripped = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Same result as [`normalize`], with a map back into `original`.
///
/// Every separator run collapses into one space that records the offset of
/// the first separator of the run. Separators before the first word emit
/// nothing, and a trailing space is dropped from text and map together.
pub fn normalize_with_map(original: &str) -> NormalizedText {
    let mut text = String::with_capacity(original.len());
    let mut map = Vec::with_capacity(original.len());
    let mut prev_space = false;

    for (offset, c) in original.char_indices() {
        if c.is_ascii_alphanumeric() {
            text.push(c.to_ascii_lowercase());
            map.push(offset);
            prev_space = false;
        } else if !prev_space && !text.is_empty() {
            text.push(' ');
            map.push(offset);
            prev_space = true;
        }
    }

    if text.ends_with(' ') {
        text.pop();
        map.pop();
    }

    NormalizedText { text, map }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("Metode KMP untuk pencocokan string."),
            "metode kmp untuk pencocokan string"
        );
        assert_eq!(normalize("  Hello,   World!  "), "hello world");
        assert_eq!(normalize("state-of-the-art"), "state of the art");
        assert_eq!(normalize("a–b—c"), "a b c");
        assert_eq!(normalize("tab\tand\nnewline"), "tab and newline");
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_normalize_with_map() {
        let original = "Hello, World!";
        let normalized = normalize_with_map(original);
        assert_eq!(normalized.text, "hello world");
        assert_eq!(normalized.map, vec![0, 1, 2, 3, 4, 5, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_map_skips_leading_separators() {
        let normalized = normalize_with_map("  -- Rust!!");
        assert_eq!(normalized.text, "rust");
        assert_eq!(normalized.map, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_map_uses_byte_offsets() {
        let original = "naïve — test";
        let normalized = normalize_with_map(original);
        assert_eq!(normalized.text, "na ve test");
        assert_eq!(normalized.text, normalize(original));
        assert_eq!(normalized.map.len(), normalized.text.len());
        // 'ï' is two bytes, the em-dash three
        assert_eq!(normalized.map, vec![0, 1, 2, 4, 5, 6, 11, 12, 13, 14]);
        for &offset in &normalized.map {
            assert!(original.is_char_boundary(offset));
        }
    }

    #[test]
    fn test_map_matches_plain_normalize() {
        for input in [
            "",
            "   ",
            "Penelitian ini menggunakan metode KMP untuk pencocokan string.",
            "end with dash-",
            "UPPER lower 123 — mixed…",
            "\u{00a0}non\u{00a0}breaking\u{00a0}",
        ] {
            let normalized = normalize_with_map(input);
            assert_eq!(normalized.text, normalize(input), "input: {:?}", input);
            assert_eq!(normalized.map.len(), normalized.text.len());
        }
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("It's a  well-known, (classic) example!");
        assert_eq!(once, "it s a well known classic example");
        assert_eq!(normalize(&once), once);
    }
}
