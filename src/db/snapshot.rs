//! Scoped snapshot persistence.
//!
//! Persisted listings for a (server, query-substring) scope always reflect the
//! most recent crawl pass: the scope's prior rows are deleted and the new
//! batch inserted inside one transaction, so a mid-batch failure rolls back
//! and leaves the previous snapshot intact.

use crate::error::Result;
use crate::market::models::RawListing;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Replaces the persisted listings for one (server, query) scope with the
/// just-deduplicated crawl output. Returns the number of listings written.
///
/// Scope membership is case-sensitive containment of `query` in the item
/// name, mirroring the site's own fuzzy search. An empty batch is a valid
/// replace and empties the scope.
pub async fn replace_scope(
    pool: &SqlitePool,
    server_name: &str,
    query: &str,
    listings: &[RawListing],
    seen_at: DateTime<Utc>,
) -> Result<usize> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT OR IGNORE INTO servers (name) VALUES (?)")
        .bind(server_name)
        .execute(&mut *tx)
        .await?;
    let server_id: i64 = sqlx::query_scalar("SELECT id FROM servers WHERE name = ?")
        .bind(server_name)
        .fetch_one(&mut *tx)
        .await?;

    let deleted = sqlx::query(
        "DELETE FROM listings \
         WHERE server_id = ? AND item_id IN (SELECT id FROM items WHERE instr(name, ?) > 0)",
    )
    .bind(server_id)
    .bind(query)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    sqlx::query("DELETE FROM listing_bonuses WHERE listing_id NOT IN (SELECT id FROM listings)")
        .execute(&mut *tx)
        .await?;

    for listing in listings {
        sqlx::query("INSERT OR IGNORE INTO items (name, category) VALUES (?, 'General')")
            .bind(&listing.item_name)
            .execute(&mut *tx)
            .await?;
        let item_id: i64 = sqlx::query_scalar("SELECT id FROM items WHERE name = ?")
            .bind(&listing.item_name)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO listings \
             (server_id, item_id, seller_name, quantity, price_won, price_yang, \
              total_price_yang, seen_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(server_id)
        .bind(item_id)
        .bind(&listing.seller)
        .bind(listing.quantity)
        .bind(listing.price_won)
        .bind(listing.price_yang)
        .bind(listing.total_yang)
        .bind(seen_at)
        .execute(&mut *tx)
        .await?;
        let listing_id = result.last_insert_rowid();

        for bonus in &listing.bonuses {
            if bonus.is_empty() {
                continue;
            }
            sqlx::query(
                "INSERT INTO listing_bonuses (listing_id, bonus_name, bonus_value) \
                 VALUES (?, ?, '')",
            )
            .bind(listing_id)
            .bind(bonus)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    debug!("Scope '{}': deleted {} stale rows", query, deleted);
    info!("Saved {} listings for {} (scope '{}')", listings.len(), server_name, query);
    Ok(listings.len())
}
