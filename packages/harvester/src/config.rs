//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Base URL of the BOE website.
pub const BOE_BASE_URL: &str = "https://www.boe.es";

/// Environment variable that overrides [`BOE_BASE_URL`].
pub const BASE_URL_ENV: &str = "BOE_BASE_URL";

/// HTTP timeout in seconds.
///
/// Consolidated codes (Código Civil, LEC) render as multi-megabyte pages.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (20 MB).
///
/// Can be overridden via the CLI `--max-size` flag.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 20 * 1024 * 1024;

/// Similarity score above which two article bodies count as the same text.
pub const SIMILARITY_THRESHOLD: u8 = 95;

/// BOE ID pattern: BOE-<section letter>-<year>-<number>.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BOE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BOE-[A-Z]-\d{4}-\d{1,6}$").expect("valid regex"));

/// Validate BOE ID format.
///
/// # Examples
/// ```
/// use boe_harvester::config::validate_boe_id;
///
/// assert!(validate_boe_id("BOE-A-2015-10565").is_ok());
/// assert!(validate_boe_id("INVALID").is_err());
/// ```
pub fn validate_boe_id(boe_id: &str) -> Result<()> {
    if BOE_ID_PATTERN.is_match(boe_id) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidBoeId(boe_id.to_string()))
    }
}

/// Base URL to fetch from, honouring the `BOE_BASE_URL` environment variable.
pub fn base_url() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| BOE_BASE_URL.to_string())
}

/// Build the consolidated-text URL for a law.
///
/// # Panics
/// Debug builds panic if `boe_id` doesn't match the expected format.
pub fn consolidated_url(base: &str, boe_id: &str) -> String {
    debug_assert!(
        BOE_ID_PATTERN.is_match(boe_id),
        "boe_id should be validated before calling consolidated_url"
    );
    format!("{base}/buscar/act.php?id={boe_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_boe_id_valid() {
        assert!(validate_boe_id("BOE-A-2015-10565").is_ok());
        assert!(validate_boe_id("BOE-A-1978-31229").is_ok());
        assert!(validate_boe_id("BOE-A-1889-4763").is_ok());
    }

    #[test]
    fn test_validate_boe_id_invalid() {
        assert!(validate_boe_id("").is_err());
        assert!(validate_boe_id("BOE-2015-10565").is_err()); // Missing section
        assert!(validate_boe_id("boe-a-2015-10565").is_err()); // Lowercase
        assert!(validate_boe_id("BOE-A-15-10565").is_err()); // Short year
        assert!(validate_boe_id("BOE-A-2015-10565&x=1").is_err());
    }

    #[test]
    fn test_consolidated_url() {
        assert_eq!(
            consolidated_url(BOE_BASE_URL, "BOE-A-2015-10565"),
            "https://www.boe.es/buscar/act.php?id=BOE-A-2015-10565"
        );
    }
}
