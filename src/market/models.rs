//! Data models for marketplace listings and price statistics.

use crate::market::price::YANG_PER_WON;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One listing extracted from a results row. Lives in memory for the duration
/// of a crawl pass; persistence adds server/item/seen_at scoping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    /// Plain item name with embedded affix spans removed
    pub item_name: String,
    /// Seller character name, "Unknown" when the cell is absent
    pub seller: String,
    /// Stack size, always >= 1
    pub quantity: i64,
    /// Yang component of the displayed price
    pub price_yang: i64,
    /// Won component of the displayed price
    pub price_won: i64,
    /// Normalized total in yang: won * 100,000,000 + yang
    pub total_yang: i64,
    /// Per-unit price in yang
    pub unit_price: f64,
    /// Affix strings: special (embedded-in-name) first, then standard
    pub bonuses: Vec<String>,
}

impl RawListing {
    /// Builds a listing from its parsed parts, normalizing the price and
    /// guarding the quantity against a zero divisor.
    pub fn new(
        item_name: String,
        seller: String,
        quantity: i64,
        price_yang: i64,
        price_won: i64,
        bonuses: Vec<String>,
    ) -> Self {
        let quantity = quantity.max(1);
        let total_yang = price_won * YANG_PER_WON + price_yang;
        Self {
            item_name,
            seller,
            quantity,
            price_yang,
            price_won,
            total_yang,
            unit_price: total_yang as f64 / quantity as f64,
            bonuses,
        }
    }

    /// Identity used to collapse duplicates observed within one crawl pass.
    pub fn signature(&self) -> (String, String, i64, i64) {
        (self.item_name.clone(), self.seller.clone(), self.total_yang, self.quantity)
    }
}

/// Per-item aggregate computed from the currently persisted listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceStats {
    pub item_name: String,
    pub total_listings: i64,
    /// Minimum unit price in yang, truncated to integer
    pub min_unit_price: i64,
    /// Mean unit price in yang, truncated to integer
    pub avg_unit_price: i64,
}

/// One timestamped point of an item's exported price history.
///
/// Field order matches the export file format consumed by charting tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub avg_unit_price: i64,
    pub min_unit_price: i64,
    pub total_listings: i64,
}
