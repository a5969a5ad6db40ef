//! Valuation method trait definition.

use async_trait::async_trait;

use crate::errors::Result;
use crate::products::ProductInfo;
use crate::valuation::ValuationInput;
use crate::valuation_types::ValuationMethodKind;

/// One independent strategy for estimating what a product is worth.
///
/// Implementations never retry and never swallow errors: a failed fetch is
/// returned to the caller, who leaves that source out of the compiled set.
/// Cancellation is the caller's concern (drop the future or wrap it in a timeout).
#[async_trait]
pub trait ValuationMethod: Send + Sync {
    /// Which built-in strategy this is.
    fn kind(&self) -> ValuationMethodKind;

    /// Label used for `ValuationInput::valuation_type` and in logs.
    fn name(&self) -> &'static str {
        self.kind().label()
    }

    /// Lower values are evaluated and trusted first.
    fn priority(&self) -> i32 {
        self.kind().priority()
    }

    /// Whether the method is configured to run at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Produce this source's estimate for `product`.
    async fn valuate(&self, product: &ProductInfo) -> Result<ValuationInput>;
}
