//! Route definitions for the merchant alerts resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes for `/merchants/{merchant_id}/alerts`.
///
/// ```text
/// GET    /merchants/{merchant_id}/alerts                  -> list_alerts
/// GET    /merchants/{merchant_id}/alerts/unread-count     -> unread_count
/// POST   /merchants/{merchant_id}/alerts/read-all         -> mark_all_read
/// GET    /merchants/{merchant_id}/alerts/{alert_id}       -> get_alert
/// POST   /merchants/{merchant_id}/alerts/{alert_id}/read  -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/merchants/{merchant_id}/alerts", get(alert::list_alerts))
        .route(
            "/merchants/{merchant_id}/alerts/unread-count",
            get(alert::unread_count),
        )
        .route(
            "/merchants/{merchant_id}/alerts/read-all",
            post(alert::mark_all_read),
        )
        .route(
            "/merchants/{merchant_id}/alerts/{alert_id}",
            get(alert::get_alert),
        )
        .route(
            "/merchants/{merchant_id}/alerts/{alert_id}/read",
            post(alert::mark_read),
        )
}
