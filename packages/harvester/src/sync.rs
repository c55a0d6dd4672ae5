//! Planning the sync of a fresh extraction against stored articles.
//!
//! The planner is pure: it decides which rows to insert, update or
//! deactivate, and the caller's persistence layer applies the plan.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::{compare_content, content_hash, normalize_article_number, normalize_text};
use crate::types::ExtractedArticle;

fn default_active() -> bool {
    true
}

/// An article row as previously persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArticle {
    /// Caller's row identifier.
    pub id: String,

    pub article_number: String,

    #[serde(default)]
    pub title: Option<String>,

    pub content: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// An existing row that must be rewritten with fresh content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleUpdate {
    /// Row to update.
    pub id: String,

    /// New values.
    pub article: ExtractedArticle,

    /// Similarity between stored and fresh content (0..=100).
    pub similarity: u8,

    /// The row was inactive and comes back into force.
    pub reactivated: bool,
}

/// Writes needed to bring stored rows in line with an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub inserts: Vec<ExtractedArticle>,
    pub updates: Vec<ArticleUpdate>,
    /// Ids of rows no longer present in the source.
    pub deactivations: Vec<String>,
    /// Number of stored rows that already match.
    pub unchanged: usize,
    /// Number of extracted articles the plan was built from.
    pub total_extracted: usize,
    /// Hash over all extracted contents, in order.
    pub content_hash: String,
}

/// Record of one verification run, stored by the caller alongside the writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub boe_id: String,
    pub total_extracted: usize,
    pub inserted: usize,
    pub updated: usize,
    pub deactivated: usize,
    pub unchanged: usize,
    pub content_hash: String,
    pub verified_at: DateTime<Utc>,
}

impl SyncPlan {
    /// Whether applying the plan would change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deactivations.is_empty()
    }

    /// Summarize the plan for the verification log.
    #[must_use]
    pub fn summary(&self, boe_id: &str) -> VerificationSummary {
        VerificationSummary {
            boe_id: boe_id.to_string(),
            total_extracted: self.total_extracted,
            inserted: self.inserts.len(),
            updated: self.updates.len(),
            deactivated: self.deactivations.len(),
            unchanged: self.unchanged,
            content_hash: self.content_hash.clone(),
            verified_at: Utc::now(),
        }
    }
}

/// Diff extracted articles against stored rows.
///
/// Rows are matched by [`normalize_article_number`]. A matched row is left
/// alone when it is active, its content matches per [`compare_content`] and
/// its title is equal after [`normalize_text`]; otherwise it is updated.
/// Active rows with no extracted counterpart are deactivated, as are extra
/// active rows sharing a number with another row.
#[must_use]
pub fn plan_sync(stored: &[StoredArticle], extracted: &[ExtractedArticle]) -> SyncPlan {
    // Prefer an active row when several share a number.
    let mut by_number: HashMap<String, &StoredArticle> = HashMap::new();
    for row in stored {
        let key = normalize_article_number(&row.article_number);
        let replace = by_number
            .get(&key)
            .map_or(true, |existing| !existing.is_active && row.is_active);
        if replace {
            by_number.insert(key, row);
        }
    }

    let mut plan = SyncPlan {
        total_extracted: extracted.len(),
        content_hash: content_hash(
            &extracted
                .iter()
                .map(|a| a.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        ..SyncPlan::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for article in extracted {
        let key = normalize_article_number(&article.article_number);
        if !seen.insert(key.clone()) {
            continue;
        }

        let Some(row) = by_number.get(&key) else {
            plan.inserts.push(article.clone());
            continue;
        };

        let comparison = compare_content(&row.content, &article.content);
        let titles_match = normalize_text(row.title.as_deref().unwrap_or_default())
            == normalize_text(article.title.as_deref().unwrap_or_default());

        if row.is_active && comparison.matches && titles_match {
            plan.unchanged += 1;
        } else {
            plan.updates.push(ArticleUpdate {
                id: row.id.clone(),
                article: article.clone(),
                similarity: comparison.similarity,
                reactivated: !row.is_active,
            });
        }
    }

    let primary_ids: HashSet<&str> = by_number.values().map(|r| r.id.as_str()).collect();
    for row in stored.iter().filter(|r| r.is_active) {
        let orphaned = !seen.contains(&normalize_article_number(&row.article_number));
        let duplicate = !primary_ids.contains(row.id.as_str());
        if orphaned || duplicate {
            plan.deactivations.push(row.id.clone());
        }
    }

    tracing::debug!(
        inserts = plan.inserts.len(),
        updates = plan.updates.len(),
        deactivations = plan.deactivations.len(),
        unchanged = plan.unchanged,
        "Planned sync"
    );
    plan
}
