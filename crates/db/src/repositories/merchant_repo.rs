//! Read-only queries against the `merchants` directory table.

use sqlx::PgPool;
use stockwatch_core::types::DbId;

/// Lookups into the merchant directory. The alerting engine never mutates
/// merchants.
pub struct MerchantRepo;

impl MerchantRepo {
    /// True when a merchant with the given id exists.
    pub async fn exists(pool: &PgPool, merchant_id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM merchants WHERE id = $1")
                .bind(merchant_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// The merchant's shop name, or `None` for an unknown id.
    pub async fn shop_name(pool: &PgPool, merchant_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT shop_name FROM merchants WHERE id = $1")
            .bind(merchant_id)
            .fetch_optional(pool)
            .await
    }
}
