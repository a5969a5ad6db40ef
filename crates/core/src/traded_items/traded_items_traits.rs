use super::traded_items_model::TradedItem;
use crate::errors::Result;

/// Read access to the seller's own sales ledger.
pub trait TradedItemRepositoryTrait: Send + Sync {
    /// The seller's closed sales, newest first, at most `limit` rows.
    ///
    /// Any of buy date, sell date and sell price may be missing on a row.
    fn get_sold_traded_items(&self, limit: usize) -> Result<Vec<TradedItem>>;
}
