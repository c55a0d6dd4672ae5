//! Error types for the harvester.
//!
//! Extraction itself never fails: unrecognized blocks are skipped. Errors only
//! come from the edges (HTTP, filesystem, serialization, input validation).

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid BOE identifier format.
    #[error("Invalid BOE ID format: '{0}'. Expected BOE-X-YYYY-NNNNN (e.g., BOE-A-2015-10565)")]
    InvalidBoeId(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the consolidated text.
    #[error("Failed to download consolidated text for {boe_id}: {source}")]
    ContentDownload {
        boe_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeded the configured maximum size.
    #[error("Response too large: {size} bytes (max {max} bytes)")]
    ResponseTooLarge { size: u64, max: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
