//! The pluggable valuation methods, one per price signal.

mod database_method;
mod llm_new_price_method;
mod method_traits;
mod sold_ads_method;
mod tradera_method;

pub use database_method::DatabaseValuationMethod;
pub use llm_new_price_method::{LlmNewPriceMethod, DEFAULT_NEW_PRICE_CONFIDENCE};
pub use method_traits::ValuationMethod;
pub use sold_ads_method::SoldAdsValuationMethod;
pub use tradera_method::TraderaValuationMethod;
