use cravory_core::ValidationError;
use thiserror::Error;

/// Errors surfaced by the HTTP clients in this crate.
///
/// Link resolution never returns these to its callers; it logs them and
/// reports the link as unresolved.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
