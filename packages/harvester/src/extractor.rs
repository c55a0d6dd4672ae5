//! Article extraction from BOE consolidated-text HTML.
//!
//! The pipeline is: find `bloque` divs, keep those whose id looks like an
//! article (or disposition), recognize the heading, clean the body, drop
//! repealed articles, deduplicate and sort.
//!
//! Extraction is best-effort. A block whose heading matches no known form
//! is skipped, never reported as an error.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::heading::{is_unica, parse_heading, split_title};
use crate::html::{find_blocks, is_candidate_id, split_heading};
use crate::ordinal::feminine_ordinal_value;
use crate::types::{DispositionKind, ExtractedArticle, ExtractionOptions};

/// Body text of an article that has been repealed.
const REPEALED_MARKERS: &[&str] = &["(Suprimido)", "(SUPRIMIDO)"];

/// Latin suffixes in sort order; anything unlisted sorts after them.
const SUFFIX_RANKS: &[(&str, u8)] = &[
    ("bis", 1),
    ("ter", 2),
    ("quater", 3),
    ("quáter", 3),
    ("quinquies", 4),
    ("sexies", 5),
    ("septies", 6),
    ("octies", 7),
    ("nonies", 8),
    ("decies", 9),
];

const UNKNOWN_SUFFIX_RANK: u8 = 10;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_NUMBER_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\s*([a-záéíóúñ]+))?(?:\s*(\d+))?").expect("valid regex")
});

/// Extract all articles from a consolidated-text page.
///
/// # Examples
/// ```
/// use boe_harvester::extractor::extract_articles_from_boe;
/// use boe_harvester::types::ExtractionOptions;
///
/// let html = r#"<div class="bloque" id="a1"><h5 class="articulo">Artículo 1. Objeto.</h5><p class="parrafo">Contenido del artículo uno.</p></div>"#;
/// let articles = extract_articles_from_boe(html, &ExtractionOptions::default());
///
/// assert_eq!(articles.len(), 1);
/// assert_eq!(articles[0].article_number, "1");
/// assert_eq!(articles[0].title.as_deref(), Some("Objeto"));
/// assert_eq!(articles[0].content, "Contenido del artículo uno.");
/// ```
#[must_use]
pub fn extract_articles_from_boe(html: &str, options: &ExtractionOptions) -> Vec<ExtractedArticle> {
    let mut articles = Vec::new();

    for block in find_blocks(html) {
        if !is_candidate_id(&block.id, options) {
            continue;
        }

        let Some((heading_text, body)) = split_heading(&block.html) else {
            tracing::trace!(id = %block.id, "Skipping empty block");
            continue;
        };

        let Some(heading) = parse_heading(&heading_text, options) else {
            tracing::debug!(id = %block.id, heading = %heading_text, "Skipping block without article heading");
            continue;
        };

        let (title, lead) = split_title(heading.tail());
        let content = match lead {
            Some(lead) if body.is_empty() => lead,
            Some(lead) => format!("{lead}\n{body}"),
            None => body,
        };

        if REPEALED_MARKERS.contains(&content.as_str()) {
            tracing::trace!(id = %block.id, "Skipping repealed article");
            continue;
        }

        articles.push(ExtractedArticle::new(heading.article_number(), title, content));
    }

    let mut articles = dedup_keep_longest(articles);
    sort_articles(&mut articles);

    tracing::debug!(count = articles.len(), "Extracted articles");
    articles
}

/// Collapse entries sharing an `article_number`, keeping the longer content.
///
/// On equal length the first occurrence wins. Output keeps first-seen order.
pub fn dedup_keep_longest(articles: Vec<ExtractedArticle>) -> Vec<ExtractedArticle> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ExtractedArticle> = Vec::with_capacity(articles.len());

    for article in articles {
        match positions.get(&article.article_number) {
            Some(&pos) => {
                if article.content.chars().count() > kept[pos].content.chars().count() {
                    tracing::trace!(
                        article_number = %article.article_number,
                        "Replacing duplicate with longer extraction"
                    );
                    kept[pos] = article;
                }
            }
            None => {
                positions.insert(article.article_number.clone(), kept.len());
                kept.push(article);
            }
        }
    }

    kept
}

/// Ordering key: every ordinary article sorts before every disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Article { base: u32, suffix_rank: u8, sub: u32 },
    Disposition { kind: DispositionKind, ordinal: u32 },
}

impl SortKey {
    /// Derive the key from a display-form article number.
    #[must_use]
    pub fn from_article_number(article_number: &str) -> Self {
        if let Some(kind) = DispositionKind::from_code(article_number) {
            return Self::Disposition {
                kind,
                ordinal: disposition_ordinal(&article_number[2..]),
            };
        }

        let lowered = article_number.trim().to_lowercase();
        let Some(caps) = ARTICLE_NUMBER_PARTS.captures(&lowered) else {
            return Self::Article {
                base: u32::MAX,
                suffix_rank: UNKNOWN_SUFFIX_RANK,
                sub: u32::MAX,
            };
        };

        let base = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(u32::MAX);
        let suffix_rank = caps.get(2).map_or(0, |m| {
            SUFFIX_RANKS
                .iter()
                .find(|(name, _)| *name == m.as_str())
                .map_or(UNKNOWN_SUFFIX_RANK, |(_, rank)| *rank)
        });
        let sub = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);

        Self::Article {
            base,
            suffix_rank,
            sub,
        }
    }
}

/// Ordinal part of a disposition code ("3", "", "unica", "vigesima").
fn disposition_ordinal(rest: &str) -> u32 {
    if rest.is_empty() || is_unica(rest) {
        return 1;
    }
    rest.parse()
        .ok()
        .or_else(|| feminine_ordinal_value(rest))
        .unwrap_or(u32::MAX)
}

/// Compare two article numbers in legal order.
#[must_use]
pub fn compare_article_numbers(a: &str, b: &str) -> Ordering {
    SortKey::from_article_number(a).cmp(&SortKey::from_article_number(b))
}

/// Sort articles in legal order (stable).
pub fn sort_articles(articles: &mut [ExtractedArticle]) {
    articles.sort_by_key(|a| SortKey::from_article_number(&a.article_number));
}
