//! Error types for the market data crate.
//!
//! [`MarketDataError`] is returned by every pricing provider. Callers that
//! layer retries outside the valuation engine can use
//! [`is_transient`](MarketDataError::is_transient) to classify failures.

use thiserror::Error;

/// Errors that can occur while fetching a marketplace price.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider integration is switched off in configuration.
    #[error("Provider disabled: {provider}")]
    Disabled {
        /// The provider that is disabled
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// A provider-specific error occurred (bad status, rejected key, ...).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body matched none of the accepted shapes.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Timeouts, rate limits and network failures are transient. A disabled
    /// provider or a malformed response will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::RateLimited { .. } | Self::Network(_) => true,
            Self::Disabled { .. } | Self::ProviderError { .. } | Self::InvalidResponse { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transient() {
        let error = MarketDataError::Timeout {
            provider: "TRADERA".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_rate_limited_is_transient() {
        let error = MarketDataError::RateLimited {
            provider: "TRADERA".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_disabled_is_not_transient() {
        let error = MarketDataError::Disabled {
            provider: "TRADERA".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_invalid_response_is_not_transient() {
        let error = MarketDataError::InvalidResponse {
            provider: "TRADERA".to_string(),
            message: "missing price".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::ProviderError {
            provider: "TRADERA".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(error.to_string(), "Provider error: TRADERA - HTTP 500");
    }
}
