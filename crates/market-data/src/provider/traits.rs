//! Pricing provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{PriceEstimate, PriceQuery};

/// Trait for marketplace pricing providers.
///
/// Implement this trait to add support for a new marketplace that can quote
/// a resale price for an item description.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use resellbot_market_data::provider::PricingProvider;
///
/// struct MyMarketplace;
///
/// #[async_trait]
/// impl PricingProvider for MyMarketplace {
///     fn id(&self) -> &'static str {
///         "MY_MARKETPLACE"
///     }
///
///     async fn get_price_estimate(
///         &self,
///         query: &PriceQuery,
///     ) -> Result<PriceEstimate, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait PricingProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "TRADERA". Used for logging and
    /// error reporting.
    fn id(&self) -> &'static str;

    /// Whether the provider is configured to be called at all.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Fetch a price estimate for the described item.
    ///
    /// Implementations must not retry internally. Cancellation is the caller's
    /// concern: dropping the returned future aborts the request.
    async fn get_price_estimate(&self, query: &PriceQuery)
        -> Result<PriceEstimate, MarketDataError>;
}
