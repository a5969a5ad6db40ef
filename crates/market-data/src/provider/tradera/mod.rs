//! Tradera pricing provider implementation.
//!
//! Calls a configured valuation endpoint with the item title and parses the
//! response (see [`models`] for the accepted shapes). The provider is inert
//! unless the integration is enabled and a base URL is configured.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{PriceEstimate, PriceQuery};
use crate::provider::PricingProvider;

use models::parse_price_response;

const PROVIDER_ID: &str = "TRADERA";

/// Connection settings for the Tradera pricing endpoint.
#[derive(Clone, Debug)]
pub struct TraderaConfig {
    /// Whether the marketplace integration is switched on
    pub enabled: bool,

    /// Full URL of the pricing endpoint
    pub base_url: String,

    /// Optional key sent as `X-Api-Key`
    pub api_key: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TraderaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Tradera pricing provider.
pub struct TraderaProvider {
    client: Client,
    config: TraderaConfig,
}

impl TraderaProvider {
    /// Create a new provider from configuration.
    pub fn new(config: TraderaConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Make a GET request to the pricing endpoint and return the body.
    async fn fetch(&self, query: &PriceQuery) -> Result<String, MarketDataError> {
        let mut params: Vec<(&str, &str)> = vec![("q", query.title.as_str())];
        if let Some(category) = &query.category {
            params.push(("category", category.as_str()));
        }
        if let Some(condition) = &query.condition {
            params.push(("condition", condition.as_str()));
        }

        let mut request = self.client.get(&self.config.base_url).query(&params);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        debug!("Tradera request for '{}'", query.title);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                timeout_error()
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        // The client timeout also covers reading the body
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                timeout_error()
            } else {
                MarketDataError::Network(e)
            }
        })
    }
}

fn timeout_error() -> MarketDataError {
    MarketDataError::Timeout {
        provider: PROVIDER_ID.to_string(),
    }
}

#[async_trait]
impl PricingProvider for TraderaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.base_url.is_empty()
    }

    async fn get_price_estimate(
        &self,
        query: &PriceQuery,
    ) -> Result<PriceEstimate, MarketDataError> {
        if !self.is_enabled() {
            return Err(MarketDataError::Disabled {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let body = self.fetch(query).await?;
        let parsed = parse_price_response(&body).map_err(|message| {
            warn!("Tradera returned an unparsable body: {}", message);
            MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message,
            }
        })?;

        Ok(PriceEstimate {
            price: parsed.price,
            confidence: parsed.confidence,
            source_url: parsed.source_url,
            provider: PROVIDER_ID.to_string(),
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the endpoint URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/valuation", addr)
    }

    /// Send headers and part of the body, then hold the connection open.
    async fn serve_stalled_body() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = "HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\n{\"price\":";
            socket.write_all(head.as_bytes()).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        format!("http://{}/valuation", addr)
    }

    fn provider_for(base_url: String) -> TraderaProvider {
        TraderaProvider::new(TraderaConfig {
            enabled: true,
            base_url,
            api_key: Some("secret".to_string()),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn test_disabled_provider_returns_disabled() {
        let provider = TraderaProvider::new(TraderaConfig::default());
        assert!(!provider.is_enabled());

        let result = provider.get_price_estimate(&PriceQuery::new("iPhone 12")).await;
        assert!(matches!(result, Err(MarketDataError::Disabled { .. })));
    }

    #[tokio::test]
    async fn test_enabled_without_url_is_disabled() {
        let provider = TraderaProvider::new(TraderaConfig {
            enabled: true,
            ..Default::default()
        });
        assert!(!provider.is_enabled());
    }

    #[tokio::test]
    async fn test_fetches_flat_response() {
        let url = serve_once("200 OK", r#"{"price": 1250, "confidence": 80}"#).await;
        let provider = provider_for(url);

        let estimate = provider
            .get_price_estimate(&PriceQuery::new("iPhone 12"))
            .await
            .unwrap();

        assert_eq!(estimate.price, 1250.0);
        assert!((estimate.confidence - 0.8).abs() < 1e-9);
        assert_eq!(estimate.provider, "TRADERA");
    }

    #[tokio::test]
    async fn test_fetches_nested_response() {
        let url = serve_once(
            "200 OK",
            r#"{"data": {"valuation": "1100", "confidence": "70"}}"#,
        )
        .await;
        let provider = provider_for(url);

        let estimate = provider
            .get_price_estimate(&PriceQuery::new("iPhone 12"))
            .await
            .unwrap();

        assert_eq!(estimate.price, 1100.0);
        assert!((estimate.confidence - 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_server_error_is_provider_error() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let provider = provider_for(url);

        let result = provider.get_price_estimate(&PriceQuery::new("iPhone 12")).await;
        assert!(matches!(result, Err(MarketDataError::ProviderError { .. })));
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported() {
        let url = serve_once("429 Too Many Requests", "{}").await;
        let provider = provider_for(url);

        let result = provider.get_price_estimate(&PriceQuery::new("iPhone 12")).await;
        assert!(matches!(result, Err(MarketDataError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_invalid_response() {
        let url = serve_once("200 OK", r#"{"status": "ok"}"#).await;
        let provider = provider_for(url);

        let result = provider.get_price_estimate(&PriceQuery::new("iPhone 12")).await;
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_body_is_timeout() {
        let url = serve_stalled_body().await;
        let provider = TraderaProvider::new(TraderaConfig {
            enabled: true,
            base_url: url,
            api_key: None,
            timeout: Duration::from_millis(300),
        });

        let result = provider.get_price_estimate(&PriceQuery::new("iPhone 12")).await;
        assert!(matches!(result, Err(MarketDataError::Timeout { .. })));
    }
}
