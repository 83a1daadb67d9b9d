use std::time::Duration;

use thiserror::Error;

/// Failure classes of the quote provider. The quote service logs them and
/// falls back to a synthetic quote, so they never reach its callers.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection, DNS or body read failure.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed: {0}")]
    Status(reqwest::StatusCode),

    /// The body was not JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The provider reported its call budget as spent (`Note` / `Information`).
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The provider answered with an `Error Message`.
    #[error("Provider error: {0}")]
    Api(String),

    /// A 200 response without the expected fields, or with non-numeric values in them.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Soft failures are reported by the provider itself rather than caused by the wire.
    pub fn is_soft_failure(&self) -> bool {
        matches!(self, Self::QuotaExceeded(_) | Self::Api(_))
    }
}
