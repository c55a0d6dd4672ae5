//! Fetching the consolidated text of a law.
//!
//! BOE serves the whole consolidated text, annexes included, as one page
//! under `/buscar/act.php`.

use reqwest::blocking::Client;

use crate::config::consolidated_url;
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, download_bytes};

/// Fetch the consolidated page of `boe_id` from `base_url` as text.
///
/// Plain HTTP failures are reported as [`HarvesterError::ContentDownload`]
/// so the caller knows which law failed.
pub fn download_consolidated_html(
    client: &Client,
    base_url: &str,
    boe_id: &str,
    max_size: u64,
) -> Result<String> {
    let url = consolidated_url(base_url, boe_id);
    tracing::debug!(%url, "Fetching consolidated text");

    let bytes = download_bytes(client, &url, max_size).map_err(|e| match e {
        HarvesterError::Http(source) => HarvesterError::ContentDownload {
            boe_id: boe_id.to_string(),
            source,
        },
        other => other,
    })?;

    Ok(bytes_to_string(&bytes, boe_id))
}
