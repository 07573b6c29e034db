//! Read-only queries against the inventory tables.

use sqlx::PgPool;
use stockwatch_core::alerting::LowStockProduct;
use stockwatch_core::types::DbId;

use crate::models::inventory::ProductRow;

/// Low-stock projections over the `products` table. The alerting engine
/// never mutates inventory.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Products with `0 < quantity <= threshold` for a merchant, lowest
    /// quantity first.
    pub async fn low_stock_products(
        pool: &PgPool,
        merchant_id: DbId,
        threshold: i32,
    ) -> Result<Vec<LowStockProduct>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity, price FROM products \
             WHERE merchant_id = $1 AND quantity > 0 AND quantity <= $2 \
             ORDER BY quantity, id",
        )
        .bind(merchant_id)
        .bind(threshold)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
