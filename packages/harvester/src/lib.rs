//! BOE Harvester - Extract articles from consolidated Spanish legislation.
//!
//! This crate downloads the consolidated text of a law from the Boletín
//! Oficial del Estado (BOE), splits it into articles and dispositions, and
//! compares fresh extractions against previously stored ones.
//!
//! # Example
//!
//! ```
//! use boe_harvester::{extract_articles_from_boe, spanish_text_to_number, ExtractionOptions};
//!
//! assert_eq!(spanish_text_to_number("vigésimo tercero").as_deref(), Some("23"));
//!
//! let html = r#"<div class="bloque" id="a1"><h5 class="articulo">Artículo 1. Objeto.</h5>
//! <p>Esta ley regula el procedimiento.</p></div>"#;
//! let articles = extract_articles_from_boe(html, &ExtractionOptions::default());
//! assert_eq!(articles[0].article_number, "1");
//! assert_eq!(articles[0].title.as_deref(), Some("Objeto"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (ExtractedArticle, Law, ...)
//! - [`error`]: Error types and Result alias
//! - [`ordinal`]: Spanish number words to digits
//! - [`html`]: Block scanning and body cleanup
//! - [`heading`]: Article and disposition heading recognition
//! - [`extractor`]: Article extraction, deduplication and ordering
//! - [`normalize`]: Normalization and content comparison
//! - [`sync`]: Sync planning against stored articles
//! - [`http`]: HTTP client for downloading from the BOE
//! - [`content`]: Consolidated-text downloading
//! - [`harvester`]: Main harvester service
//! - [`output`]: JSON / YAML output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod extractor;
pub mod harvester;
pub mod heading;
pub mod html;
pub mod http;
pub mod normalize;
pub mod ordinal;
pub mod output;
pub mod sync;
pub mod types;

// Re-export main functions
pub use extractor::extract_articles_from_boe;
pub use harvester::download_law;
pub use normalize::{compare_content, normalize_article_number, normalize_text};
pub use ordinal::spanish_text_to_number;
pub use sync::{plan_sync, StoredArticle, SyncPlan};

// Re-export commonly used items
pub use config::validate_boe_id;
pub use error::{HarvesterError, Result};
pub use types::{ContentComparison, ExtractedArticle, ExtractionOptions, Law};
