//! Inventory projection models.

use sqlx::FromRow;
use stockwatch_core::alerting::LowStockProduct;
use stockwatch_core::types::DbId;

/// Projection of a `products` row as read by the inventory queries.
///
/// The alerting engine consumes [`LowStockProduct`]; this struct exists only
/// to keep sqlx row mapping out of the core crate.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

impl From<ProductRow> for LowStockProduct {
    fn from(row: ProductRow) -> Self {
        LowStockProduct {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            price: row.price,
        }
    }
}
