//! Main harvester service that ties all components together.

use crate::config::{base_url, consolidated_url, validate_boe_id, DEFAULT_MAX_RESPONSE_SIZE};
use crate::content::download_consolidated_html;
use crate::error::Result;
use crate::extractor::extract_articles_from_boe;
use crate::http::create_client;
use crate::types::{ExtractionOptions, Law};

/// Download and extract a law from the BOE website.
///
/// The site root can be overridden with the `BOE_BASE_URL` environment variable.
///
/// # Arguments
/// * `boe_id` - The BOE identifier (e.g., "BOE-A-2015-10565")
/// * `options` - Which blocks to extract
///
/// # Returns
/// A `Law` with the source URL and the extracted articles
pub fn download_law(boe_id: &str, options: &ExtractionOptions) -> Result<Law> {
    download_law_from(&base_url(), boe_id, options, DEFAULT_MAX_RESPONSE_SIZE)
}

/// Download and extract a law from an explicit site root.
pub fn download_law_from(
    base: &str,
    boe_id: &str,
    options: &ExtractionOptions,
    max_size: u64,
) -> Result<Law> {
    validate_boe_id(boe_id)?;

    let client = create_client()?;
    let html = download_consolidated_html(&client, base, boe_id, max_size)?;
    let articles = extract_articles_from_boe(&html, options);

    tracing::info!(
        boe_id,
        articles = articles.len(),
        dispositions = articles.iter().filter(|a| a.is_disposition()).count(),
        "Harvested law"
    );

    Ok(Law {
        boe_id: boe_id.to_string(),
        url: consolidated_url(base, boe_id),
        articles,
    })
}
