//! Core data types for the harvester.
//!
//! These types represent articles of consolidated Spanish legislation as
//! extracted from BOE pages, plus the knobs and results around them.

use serde::{Deserialize, Serialize};

/// A single article (or disposition) extracted from a consolidated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    /// Display-form identifier (e.g., "15", "15 bis", "1 bis 2", "DA1", "DF").
    pub article_number: String,

    /// Descriptive title following the heading, if any.
    pub title: Option<String>,

    /// Cleaned body text.
    pub content: String,
}

impl ExtractedArticle {
    /// Create a new article.
    #[must_use]
    pub fn new(
        article_number: impl Into<String>,
        title: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            article_number: article_number.into(),
            title,
            content: content.into(),
        }
    }

    /// Whether this entry is a disposition rather than an ordinary article.
    #[must_use]
    pub fn is_disposition(&self) -> bool {
        DispositionKind::from_code(&self.article_number).is_some()
    }
}

/// Options controlling which blocks the extractor recognizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Also extract "Disposición adicional/transitoria/derogatoria/final" blocks.
    pub include_disposiciones: bool,
}

impl ExtractionOptions {
    /// Options with dispositions enabled.
    #[must_use]
    pub fn with_disposiciones() -> Self {
        Self {
            include_disposiciones: true,
        }
    }
}

/// Result of comparing two article bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentComparison {
    /// True when `similarity` exceeds the match threshold.
    pub matches: bool,

    /// Overlap score in 0..=100.
    pub similarity: u8,
}

/// The four kinds of closing provisions, in sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DispositionKind {
    /// Disposición adicional.
    Adicional,
    /// Disposición transitoria.
    Transitoria,
    /// Disposición derogatoria.
    Derogatoria,
    /// Disposición final.
    Final,
}

impl DispositionKind {
    /// Two-letter identifier prefix.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Adicional => "DA",
            Self::Transitoria => "DT",
            Self::Derogatoria => "DD",
            Self::Final => "DF",
        }
    }

    /// Parse the adjective used in headings ("adicional", "Final", ...).
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "adicional" => Some(Self::Adicional),
            "transitoria" => Some(Self::Transitoria),
            "derogatoria" => Some(Self::Derogatoria),
            "final" => Some(Self::Final),
            _ => None,
        }
    }

    /// Recognize an identifier such as "DA3" or "DF" by its prefix.
    #[must_use]
    pub fn from_code(article_number: &str) -> Option<Self> {
        let prefix = article_number.get(..2)?;
        match prefix {
            "DA" => Some(Self::Adicional),
            "DT" => Some(Self::Transitoria),
            "DD" => Some(Self::Derogatoria),
            "DF" => Some(Self::Final),
            _ => None,
        }
    }
}

/// A harvested law: where it came from and what was extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Law {
    /// BOE identifier (e.g., "BOE-A-2015-10565").
    pub boe_id: String,

    /// URL the HTML was fetched from.
    pub url: String,

    /// Extracted articles in sorted order.
    pub articles: Vec<ExtractedArticle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_kind_codes() {
        assert_eq!(DispositionKind::Adicional.code(), "DA");
        assert_eq!(DispositionKind::Final.code(), "DF");
        assert_eq!(
            DispositionKind::from_word("Transitoria"),
            Some(DispositionKind::Transitoria)
        );
        assert_eq!(DispositionKind::from_word("primera"), None);
    }

    #[test]
    fn test_disposition_kind_order() {
        assert!(DispositionKind::Adicional < DispositionKind::Transitoria);
        assert!(DispositionKind::Transitoria < DispositionKind::Derogatoria);
        assert!(DispositionKind::Derogatoria < DispositionKind::Final);
    }

    #[test]
    fn test_is_disposition() {
        assert!(ExtractedArticle::new("DA1", None, "").is_disposition());
        assert!(ExtractedArticle::new("DD", None, "").is_disposition());
        assert!(!ExtractedArticle::new("15 bis", None, "").is_disposition());
    }

    #[test]
    fn test_article_serialization() {
        let article = ExtractedArticle::new("1", Some("Objeto".to_string()), "Texto.");
        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(
            json,
            r#"{"article_number":"1","title":"Objeto","content":"Texto."}"#
        );

        let untitled = ExtractedArticle::new("2", None, "");
        let json = serde_json::to_string(&untitled).unwrap();
        assert!(json.contains(r#""title":null"#));
    }
}
