//! Route definitions for the merchant alert-settings resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::alert_settings;
use crate::state::AppState;

/// Routes for `/merchants/{merchant_id}/alert-settings`.
///
/// ```text
/// GET  /merchants/{merchant_id}/alert-settings -> get_settings
/// PUT  /merchants/{merchant_id}/alert-settings -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/merchants/{merchant_id}/alert-settings",
        get(alert_settings::get_settings).put(alert_settings::update_settings),
    )
}
