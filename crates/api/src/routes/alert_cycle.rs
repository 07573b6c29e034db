//! Route definitions for the alert cycle endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::alert_cycle;
use crate::state::AppState;

/// Routes for the tenant-facing poll, manual trigger, and admin batch run.
///
/// ```text
/// POST /merchants/{merchant_id}/alert-cycle/check-due -> check_due
/// POST /merchants/{merchant_id}/alert-cycle/trigger   -> trigger_now
/// POST /admin/alert-cycle/trigger-all                 -> trigger_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/merchants/{merchant_id}/alert-cycle/check-due",
            post(alert_cycle::check_due),
        )
        .route(
            "/merchants/{merchant_id}/alert-cycle/trigger",
            post(alert_cycle::trigger_now),
        )
        .route(
            "/admin/alert-cycle/trigger-all",
            post(alert_cycle::trigger_all),
        )
}
