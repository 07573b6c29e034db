//! Daily alert delivery log models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use stockwatch_core::types::{DbId, Timestamp};

/// A row from the `alert_delivery_log` table.
///
/// At most one row exists per merchant per calendar date; its presence is
/// the idempotency signal that the alert cycle already ran that day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertDeliveryLog {
    pub id: DbId,
    pub merchant_id: DbId,
    pub alert_date: NaiveDate,
    pub alerts_sent_count: i32,
    pub product_ids: Vec<DbId>,
    pub created_at: Timestamp,
}
