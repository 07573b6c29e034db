//! Route definitions for the alerting API.

pub mod alert_cycle;
pub mod alert_settings;
pub mod alerts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /merchants/{merchant_id}/alert-settings           GET, PUT
///
/// /merchants/{merchant_id}/alerts                   GET
/// /merchants/{merchant_id}/alerts/unread-count      GET
/// /merchants/{merchant_id}/alerts/read-all          POST
/// /merchants/{merchant_id}/alerts/{alert_id}        GET
/// /merchants/{merchant_id}/alerts/{alert_id}/read   POST
///
/// /merchants/{merchant_id}/alert-cycle/check-due    POST
/// /merchants/{merchant_id}/alert-cycle/trigger      POST
/// /admin/alert-cycle/trigger-all                    POST
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(alert_settings::router())
        .merge(alerts::router())
        .merge(alert_cycle::router())
}
