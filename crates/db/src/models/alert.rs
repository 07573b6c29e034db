//! Alert entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stockwatch_core::types::{DbId, Timestamp};

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub merchant_id: DbId,
    pub alert_type: String,
    pub title: String,
    pub body: String,
    /// Set only when the alert concerns exactly one product.
    pub product_id: Option<DbId>,
    pub is_ai_enhanced: bool,
    /// The deterministic text the AI version replaced, kept for audit.
    pub original_body: Option<String>,
    pub metadata: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Insert DTO for a new alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub merchant_id: DbId,
    pub alert_type: String,
    pub title: String,
    pub body: String,
    pub product_id: Option<DbId>,
    pub is_ai_enhanced: bool,
    pub original_body: Option<String>,
    pub metadata: serde_json::Value,
}
