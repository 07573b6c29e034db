//! Merchant alert settings defaults and validation rules.
//!
//! Defaults here are the source of truth for lazily created settings rows;
//! the matching column defaults in the migration exist only as a safety net.

use chrono::NaiveTime;

use crate::error::CoreError;

/// Quantity at or below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Quantity at or below which a low-stock product counts as critical.
pub const DEFAULT_CRITICAL_STOCK_THRESHOLD: i32 = 2;

/// Inclusive range for the low-stock threshold.
pub const LOW_STOCK_THRESHOLD_RANGE: (i32, i32) = (1, 100);

/// Inclusive range for the critical-stock threshold.
pub const CRITICAL_STOCK_THRESHOLD_RANGE: (i32, i32) = (1, 50);

/// Default preferred delivery time for the daily alert cycle.
pub fn default_daily_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("valid time")
}

/// Validate a low/critical threshold pair.
///
/// The pair is checked as a whole: both values must be in range and the
/// critical threshold must be strictly below the low threshold.
pub fn validate_thresholds(low: i32, critical: i32) -> Result<(), CoreError> {
    let (low_min, low_max) = LOW_STOCK_THRESHOLD_RANGE;
    if !(low_min..=low_max).contains(&low) {
        return Err(CoreError::Validation(format!(
            "low_stock_threshold must be between {low_min} and {low_max}, got {low}"
        )));
    }

    let (crit_min, crit_max) = CRITICAL_STOCK_THRESHOLD_RANGE;
    if !(crit_min..=crit_max).contains(&critical) {
        return Err(CoreError::Validation(format!(
            "critical_stock_threshold must be between {crit_min} and {crit_max}, got {critical}"
        )));
    }

    if critical >= low {
        return Err(CoreError::Validation(format!(
            "critical_stock_threshold ({critical}) must be lower than low_stock_threshold ({low})"
        )));
    }

    Ok(())
}

/// Basic shape check for a notification email address.
///
/// Deliverability is not verified here; email sending itself is handled
/// outside this system.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "Invalid email address: {email}"
        )));
    }
    Ok(())
}
