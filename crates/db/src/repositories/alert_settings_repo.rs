//! Repository for the `merchant_alert_settings` table.

use sqlx::PgPool;
use stockwatch_core::settings::{
    default_daily_time, DEFAULT_CRITICAL_STOCK_THRESHOLD, DEFAULT_LOW_STOCK_THRESHOLD,
};
use stockwatch_core::types::DbId;

use crate::models::alert_settings::{MerchantAlertSettings, UpdateAlertSettings};

/// Column list for `merchant_alert_settings` queries.
const COLUMNS: &str = "id, merchant_id, enabled, low_stock_threshold, critical_stock_threshold, \
    ai_enhanced, daily_time, email_enabled, email, created_at, updated_at";

/// Provides CRUD operations for merchant alert settings.
pub struct AlertSettingsRepo;

impl AlertSettingsRepo {
    /// Get the settings row for a merchant, creating it with defaults on
    /// first access.
    ///
    /// Uses `INSERT ... ON CONFLICT DO UPDATE` with a no-op assignment so a
    /// single round-trip returns the row whether or not it already existed.
    pub async fn get_or_create(
        pool: &PgPool,
        merchant_id: DbId,
    ) -> Result<MerchantAlertSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO merchant_alert_settings \
                (merchant_id, enabled, low_stock_threshold, critical_stock_threshold, \
                 ai_enhanced, daily_time) \
             VALUES ($1, true, $2, $3, true, $4) \
             ON CONFLICT (merchant_id) DO UPDATE SET merchant_id = EXCLUDED.merchant_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MerchantAlertSettings>(&query)
            .bind(merchant_id)
            .bind(DEFAULT_LOW_STOCK_THRESHOLD)
            .bind(DEFAULT_CRITICAL_STOCK_THRESHOLD)
            .bind(default_daily_time())
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update, touching `updated_at`.
    ///
    /// Uses `COALESCE` to only overwrite fields that are `Some` in the
    /// input. Threshold validation is the caller's responsibility and must
    /// run against the merged result before this call.
    pub async fn update(
        pool: &PgPool,
        merchant_id: DbId,
        input: &UpdateAlertSettings,
    ) -> Result<MerchantAlertSettings, sqlx::Error> {
        let query = format!(
            "UPDATE merchant_alert_settings SET \
                enabled = COALESCE($2, enabled), \
                low_stock_threshold = COALESCE($3, low_stock_threshold), \
                critical_stock_threshold = COALESCE($4, critical_stock_threshold), \
                ai_enhanced = COALESCE($5, ai_enhanced), \
                daily_time = COALESCE($6, daily_time), \
                email_enabled = COALESCE($7, email_enabled), \
                email = COALESCE($8, email), \
                updated_at = NOW() \
             WHERE merchant_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MerchantAlertSettings>(&query)
            .bind(merchant_id)
            .bind(input.enabled)
            .bind(input.low_stock_threshold)
            .bind(input.critical_stock_threshold)
            .bind(input.ai_enhanced)
            .bind(input.daily_time)
            .bind(input.email_enabled)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Snapshot of all merchants with alerting enabled.
    ///
    /// No ordering guarantee beyond a stable id sort for log readability.
    pub async fn list_enabled(pool: &PgPool) -> Result<Vec<MerchantAlertSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM merchant_alert_settings \
             WHERE enabled = true \
             ORDER BY merchant_id"
        );
        sqlx::query_as::<_, MerchantAlertSettings>(&query)
            .fetch_all(pool)
            .await
    }
}
