//! Price-history aggregation and per-item JSON export.

use crate::error::Result;
use crate::market::models::{HistoryPoint, PriceStats};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Computes per-item price statistics for all persisted listings whose name
/// contains `query`, appends one history point per item, and refreshes each
/// affected item's export file. Returns the appended stats.
pub async fn record(pool: &SqlitePool, query: &str, export_dir: &Path) -> Result<Vec<PriceStats>> {
    // Unit price is integer yang: SQLite integer division truncates, and the
    // mean of those per-listing unit prices is truncated again on store.
    let rows: Vec<(String, i64, i64, f64)> = sqlx::query_as(
        "SELECT i.name, COUNT(*), \
                MIN(l.total_price_yang / l.quantity), \
                AVG(l.total_price_yang / l.quantity) \
         FROM listings l \
         JOIN items i ON l.item_id = i.id \
         WHERE instr(i.name, ?) > 0 AND l.quantity > 0 \
         GROUP BY i.name",
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    let timestamp = Utc::now();
    let mut stats = Vec::with_capacity(rows.len());

    for (item_name, total_listings, min_unit, avg_unit) in rows {
        let entry = PriceStats {
            item_name,
            total_listings,
            min_unit_price: min_unit,
            avg_unit_price: avg_unit as i64,
        };

        sqlx::query(
            "INSERT INTO price_history \
             (item_name, avg_unit_price, min_unit_price, total_listings, timestamp) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&entry.item_name)
        .bind(entry.avg_unit_price)
        .bind(entry.min_unit_price)
        .bind(entry.total_listings)
        .bind(timestamp)
        .execute(pool)
        .await?;

        info!(
            "Recorded history for {}: avg {} yang, min {} yang, count {}",
            entry.item_name, entry.avg_unit_price, entry.min_unit_price, entry.total_listings
        );

        export_item(pool, &entry.item_name, export_dir).await?;
        stats.push(entry);
    }

    Ok(stats)
}

/// Writes the full ordered history of one item to
/// `history_<sanitized_name>.json`. Idempotent overwrite; the pipeline never
/// reads these files back.
pub async fn export_item(pool: &SqlitePool, item_name: &str, export_dir: &Path) -> Result<PathBuf> {
    let rows: Vec<(DateTime<Utc>, i64, i64, i64)> = sqlx::query_as(
        "SELECT timestamp, avg_unit_price, min_unit_price, total_listings \
         FROM price_history \
         WHERE item_name = ? \
         ORDER BY timestamp ASC",
    )
    .bind(item_name)
    .fetch_all(pool)
    .await?;

    let points: Vec<HistoryPoint> = rows
        .into_iter()
        .map(|(timestamp, avg_unit_price, min_unit_price, total_listings)| HistoryPoint {
            timestamp,
            avg_unit_price,
            min_unit_price,
            total_listings,
        })
        .collect();

    std::fs::create_dir_all(export_dir)?;
    let path = export_dir.join(format!("history_{}.json", sanitize_item_name(item_name)));
    std::fs::write(&path, serde_json::to_string_pretty(&points)?)?;

    debug!("Exported {} history points to {}", points.len(), path.display());
    Ok(path)
}

/// Filesystem-safe transliteration of an item name: keep alphanumerics plus
/// space/hyphen/underscore, trim, then spaces become underscores.
pub fn sanitize_item_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}
