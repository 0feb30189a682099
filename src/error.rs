use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while verifying an ATP profile
///
/// Only `ClientBuild` escapes to callers; everything else is folded into a
/// failed `VerificationResult` by the verifier.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("URL is not an allowed ATP profile URL: {0}")]
    InvalidUrlHost(String),

    #[error("ATP site returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("no player name found in profile page")]
    Parse,

    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl VerificationError {
    /// Whether the error happened before or during the fetch, as opposed to
    /// while reading the page
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, VerificationError::Parse)
    }
}
