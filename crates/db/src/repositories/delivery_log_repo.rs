//! Repository for the `alert_delivery_log` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use stockwatch_core::types::DbId;

use crate::models::delivery_log::AlertDeliveryLog;

/// Column list for `alert_delivery_log` queries.
const COLUMNS: &str = "id, merchant_id, alert_date, alerts_sent_count, product_ids, created_at";

/// Provides access to the daily delivery log, the idempotency record for
/// alert cycles.
pub struct DeliveryLogRepo;

impl DeliveryLogRepo {
    /// True when a log row exists for the merchant on the given date.
    pub async fn exists_for_day(
        pool: &PgPool,
        merchant_id: DbId,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM alert_delivery_log WHERE merchant_id = $1 AND alert_date = $2",
        )
        .bind(merchant_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Record a completed alert cycle for the day.
    ///
    /// Upserts on `(merchant_id, alert_date)`: a concurrent duplicate cycle
    /// folds into the existing row by summing the sent count and unioning
    /// the product ids, preserving the one-row-per-day invariant.
    pub async fn record(
        pool: &PgPool,
        merchant_id: DbId,
        date: NaiveDate,
        alerts_sent: i32,
        product_ids: &[DbId],
    ) -> Result<AlertDeliveryLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO alert_delivery_log \
                (merchant_id, alert_date, alerts_sent_count, product_ids) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (merchant_id, alert_date) DO UPDATE SET \
                alerts_sent_count = alert_delivery_log.alerts_sent_count \
                    + EXCLUDED.alerts_sent_count, \
                product_ids = ARRAY(SELECT DISTINCT unnest(\
                    alert_delivery_log.product_ids || EXCLUDED.product_ids) ORDER BY 1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertDeliveryLog>(&query)
            .bind(merchant_id)
            .bind(date)
            .bind(alerts_sent)
            .bind(product_ids)
            .fetch_one(pool)
            .await
    }

    /// Fetch the log row for a merchant and date, if any.
    pub async fn get_for_day(
        pool: &PgPool,
        merchant_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<AlertDeliveryLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alert_delivery_log \
             WHERE merchant_id = $1 AND alert_date = $2"
        );
        sqlx::query_as::<_, AlertDeliveryLog>(&query)
            .bind(merchant_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }
}
