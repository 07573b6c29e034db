//! Repository for the `alerts` table.

use sqlx::PgPool;
use stockwatch_core::types::DbId;

use crate::models::alert::{Alert, NewAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str = "id, merchant_id, alert_type, title, body, product_id, is_ai_enhanced, \
    original_body, metadata, is_read, read_at, created_at";

/// Provides CRUD operations for alerts. All reads and mutations are scoped
/// by merchant so one tenant can never touch another's alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert, returning the stored row.
    pub async fn create(pool: &PgPool, alert: &NewAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts \
                (merchant_id, alert_type, title, body, product_id, is_ai_enhanced, \
                 original_body, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert.merchant_id)
            .bind(&alert.alert_type)
            .bind(&alert.title)
            .bind(&alert.body)
            .bind(alert.product_id)
            .bind(alert.is_ai_enhanced)
            .bind(&alert.original_body)
            .bind(&alert.metadata)
            .fetch_one(pool)
            .await
    }

    /// List alerts for a merchant, newest first.
    ///
    /// When `unread_only` is `true`, only alerts with `is_read = false` are
    /// returned.
    pub async fn list_for_merchant(
        pool: &PgPool,
        merchant_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let filter = if unread_only { "AND is_read = false" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE merchant_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(merchant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total alerts for a merchant, honouring the unread filter.
    pub async fn count_for_merchant(
        pool: &PgPool,
        merchant_id: DbId,
        unread_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let filter = if unread_only { "AND is_read = false" } else { "" };
        let query = format!("SELECT COUNT(*) FROM alerts WHERE merchant_id = $1 {filter}");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(merchant_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Fetch a single alert scoped to its owning merchant.
    pub async fn find_by_id(
        pool: &PgPool,
        alert_id: DbId,
        merchant_id: DbId,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1 AND merchant_id = $2");
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(merchant_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a single alert as read.
    ///
    /// Returns `true` if the alert was found for the given merchant and
    /// updated, `false` otherwise.
    pub async fn mark_read(
        pool: &PgPool,
        alert_id: DbId,
        merchant_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alerts \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND merchant_id = $2 AND is_read = false",
        )
        .bind(alert_id)
        .bind(merchant_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread alerts as read for a merchant.
    ///
    /// Returns the number of alerts that were marked read.
    pub async fn mark_all_read(pool: &PgPool, merchant_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alerts \
             SET is_read = true, read_at = NOW() \
             WHERE merchant_id = $1 AND is_read = false",
        )
        .bind(merchant_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread alerts for a merchant.
    pub async fn unread_count(pool: &PgPool, merchant_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE merchant_id = $1 AND is_read = false",
        )
        .bind(merchant_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
