//! Merchant alert settings models and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockwatch_core::types::{DbId, Timestamp};

/// A row from the `merchant_alert_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MerchantAlertSettings {
    pub id: DbId,
    pub merchant_id: DbId,
    pub enabled: bool,
    pub low_stock_threshold: i32,
    pub critical_stock_threshold: i32,
    pub ai_enhanced: bool,
    pub daily_time: NaiveTime,
    pub email_enabled: bool,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partial updates to merchant alert settings.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAlertSettings {
    pub enabled: Option<bool>,
    pub low_stock_threshold: Option<i32>,
    pub critical_stock_threshold: Option<i32>,
    pub ai_enhanced: Option<bool>,
    pub daily_time: Option<NaiveTime>,
    pub email_enabled: Option<bool>,
    pub email: Option<String>,
}
