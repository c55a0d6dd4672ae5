//! HTTP client wrapper for downloading BOE pages.

use std::io::Read;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("boe-harvester/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx responses).
/// Client errors (4xx) and oversized bodies fail immediately.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Maximum accepted body size in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                // Retry on server errors (5xx)
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Don't retry client errors (4xx) - they won't succeed
                let response = response.error_for_status()?;

                if let Some(length) = response.content_length() {
                    if length > max_size {
                        return Err(HarvesterError::ResponseTooLarge {
                            size: length,
                            max: max_size,
                        });
                    }
                }

                return read_capped(response, max_size);
            }
            Err(e) => {
                // Retry on connection/timeout errors
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry
                return Err(HarvesterError::Http(e));
            }
        }
    }

    // All retries exhausted
    Err(HarvesterError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Read a body, failing once it grows past `max_size`.
///
/// At most `max_size + 1` bytes are buffered, so the reported size is a
/// lower bound when the body had no `Content-Length`.
fn read_capped(reader: impl Read, max_size: u64) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    reader.take(max_size.saturating_add(1)).read_to_end(&mut body)?;

    let size = body.len() as u64;
    if size > max_size {
        return Err(HarvesterError::ResponseTooLarge {
            size,
            max: max_size,
        });
    }
    Ok(body)
}

/// Decode a response body as UTF-8, replacing invalid sequences.
///
/// BOE serves UTF-8; a lossy decode is logged rather than failing the harvest.
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => {
            tracing::warn!(what, "Response is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_read_capped_within_limit() {
        let body = read_capped(&b"<html></html>"[..], 13).unwrap();
        assert_eq!(body, b"<html></html>");
    }

    #[test]
    fn test_read_capped_stops_past_limit() {
        let source = vec![b'x'; 4096];
        let result = read_capped(&source[..], 100);
        assert!(matches!(
            result,
            Err(HarvesterError::ResponseTooLarge { size: 101, max: 100 })
        ));
    }

    #[test]
    fn test_bytes_to_string_valid() {
        assert_eq!(bytes_to_string("Artículo".as_bytes(), "test"), "Artículo");
    }

    #[test]
    fn test_bytes_to_string_lossy() {
        let bytes = [b'a', 0xff, b'b'];
        assert_eq!(bytes_to_string(&bytes, "test"), "a\u{fffd}b");
    }
}
