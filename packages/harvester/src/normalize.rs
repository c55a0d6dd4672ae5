//! Normalization and comparison helpers.
//!
//! Callers use these to match freshly extracted articles against previously
//! stored ones: article numbers are compared after [`normalize_article_number`],
//! bodies through [`compare_content`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::SIMILARITY_THRESHOLD;
use crate::types::ContentComparison;

/// A Latin suffix glued to or loosely spaced from its number, with an
/// optional trailing sub-number ("1bis2", "15  ter").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUFFIX_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d)\s*(bis|ter|quater|quinquies|sexies|septies|octies|nonies|decies)\s*(\d*)\b")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Characters dropped by [`normalize_text`].
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '"', '-'];

/// Minimum token length (exclusive) counted by [`compare_content`].
const MIN_TOKEN_CHARS: usize = 2;

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Canonical form of an article number for equality checks.
///
/// # Examples
/// ```
/// use boe_harvester::normalize::normalize_article_number;
///
/// assert_eq!(normalize_article_number("15   Bis"), "15 bis");
/// assert_eq!(normalize_article_number("4quáter"), "4 quater");
/// assert_eq!(normalize_article_number(""), "");
/// ```
#[must_use]
pub fn normalize_article_number(text: &str) -> String {
    let lowered = text.to_lowercase().replace("quáter", "quater");
    let spaced = SUFFIX_SPACING.replace_all(&lowered, "${1} ${2} ${3}");
    collapse_whitespace(&spaced)
}

/// Accent- and punctuation-insensitive form of a text.
///
/// # Examples
/// ```
/// use boe_harvester::normalize::normalize_text;
///
/// assert_eq!(normalize_text("Artículo 1."), "articulo 1");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    collapse_whitespace(&folded)
}

/// Hex SHA-256 of the normalized text.
///
/// Two bodies that differ only in accents, punctuation or spacing hash the same.
#[must_use]
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(normalize_text(text).as_bytes()))
}

/// Decide whether two article bodies are the same legal text.
///
/// The score is `|A ∩ B| / max(|A|, |B|)` over the sets of words longer than
/// two characters, so it is stricter than Jaccard when the sets differ in size.
///
/// # Examples
/// ```
/// use boe_harvester::normalize::compare_content;
///
/// let result = compare_content("Hola mundo.", "hola   mundo");
/// assert!(result.matches);
/// assert_eq!(result.similarity, 100);
/// ```
#[must_use]
pub fn compare_content(a: &str, b: &str) -> ContentComparison {
    let a = normalize_text(a);
    let b = normalize_text(b);

    if a == b {
        return ContentComparison {
            matches: true,
            similarity: 100,
        };
    }

    let words_a = significant_words(&a);
    let words_b = significant_words(&b);
    if words_a.is_empty() || words_b.is_empty() {
        return ContentComparison {
            matches: false,
            similarity: 0,
        };
    }

    let shared = words_a.intersection(&words_b).count();
    let largest = words_a.len().max(words_b.len());
    // shared <= largest, so the ratio stays within 0..=100
    let similarity = (100.0 * shared as f64 / largest as f64).round() as u8;

    ContentComparison {
        matches: similarity > SIMILARITY_THRESHOLD,
        similarity,
    }
}

fn significant_words(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}
