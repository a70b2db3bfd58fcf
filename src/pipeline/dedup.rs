//! Duplicate collapse within one crawl pass.
//!
//! Paginating a live table can show the same listing twice (rows shifting
//! between page loads). Identity is the (item, seller, total price, quantity)
//! signature; the first occurrence wins.

use crate::market::models::RawListing;
use std::collections::HashSet;

/// Removes later occurrences of already-seen signatures, preserving input
/// order. Idempotent.
pub fn dedup(listings: Vec<RawListing>) -> Vec<RawListing> {
    let mut seen = HashSet::new();
    listings.into_iter().filter(|listing| seen.insert(listing.signature())).collect()
}
