//! Low-stock classification and daily due-window logic.
//!
//! Pure functions only; the caller fetches products and settings from the
//! database and passes them in.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::types::DbId;

/// Alert type stored on every row produced by this engine.
pub const ALERT_TYPE_LOW_STOCK: &str = "low_stock";

/// Tolerance around the merchant's preferred daily time, in minutes.
pub const DUE_WINDOW_TOLERANCE_MINUTES: i32 = 2;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Urgency classification for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertUrgency {
    /// Quantity at or below the low threshold but above the critical one.
    Low,
    /// Quantity at or below the critical threshold.
    Critical,
}

/// Read-only projection of a product at or below the low-stock threshold.
#[derive(Debug, Clone, Serialize)]
pub struct LowStockProduct {
    pub id: DbId,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Split low-stock products into critical and regular groups.
///
/// Returns `(critical, regular)`. A product is critical when its quantity is
/// at or below `critical_threshold`.
pub fn partition_by_urgency(
    products: Vec<LowStockProduct>,
    critical_threshold: i32,
) -> (Vec<LowStockProduct>, Vec<LowStockProduct>) {
    products
        .into_iter()
        .partition(|p| p.quantity <= critical_threshold)
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> i32 {
    time.hour() as i32 * 60 + time.minute() as i32
}

/// True when `now_minutes` falls within the tolerance window around
/// `target_minutes`.
///
/// Both values are minutes of day; the distance wraps at midnight so a
/// target of 23:59 matches a current time of 00:01.
pub fn within_daily_window(now_minutes: i32, target_minutes: i32) -> bool {
    let diff = (now_minutes - target_minutes).abs();
    diff.min(MINUTES_PER_DAY - diff) <= DUE_WINDOW_TOLERANCE_MINUTES
}
