//! Handlers for the merchant alerts resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stockwatch_core::error::CoreError;
use stockwatch_core::types::DbId;
use stockwatch_db::repositories::AlertRepo;

use crate::error::AppResult;
use crate::handlers::alert_settings::ensure_merchant_exists;
use crate::state::AppState;

/// Query parameters for `GET /merchants/{merchant_id}/alerts`.
#[derive(Debug, Deserialize)]
pub struct AlertListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    /// If `true`, return only unread alerts. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// Maximum page size for alert listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for alert listing.
const DEFAULT_LIMIT: i64 = 20;

/// GET /api/v1/merchants/{merchant_id}/alerts
///
/// List the merchant's alerts, newest first, with pagination metadata and
/// the current unread count.
pub async fn list_alerts(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
    Query(params): Query<AlertListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;
    let unread_only = params.unread_only.unwrap_or(false);

    let alerts =
        AlertRepo::list_for_merchant(&state.pool, merchant_id, unread_only, limit, offset).await?;
    let total = AlertRepo::count_for_merchant(&state.pool, merchant_id, unread_only).await?;
    let unread_count = AlertRepo::unread_count(&state.pool, merchant_id).await?;

    let has_more = offset + (alerts.len() as i64) < total;

    Ok(Json(serde_json::json!({
        "data": {
            "alerts": alerts,
            "has_more": has_more,
            "unread_count": unread_count,
        }
    })))
}

/// GET /api/v1/merchants/{merchant_id}/alerts/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let count = AlertRepo::unread_count(&state.pool, merchant_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}

/// GET /api/v1/merchants/{merchant_id}/alerts/{alert_id}
///
/// Fetch a single alert. Returns 404 when the alert does not exist or is
/// owned by another merchant.
pub async fn get_alert(
    State(state): State<AppState>,
    Path((merchant_id, alert_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let alert = AlertRepo::find_by_id(&state.pool, alert_id, merchant_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        })?;

    Ok(Json(serde_json::json!({ "data": alert })))
}

/// POST /api/v1/merchants/{merchant_id}/alerts/{alert_id}/read
///
/// Mark a single alert as read. Returns 204 No Content on success, or 404
/// if the alert does not belong to the merchant or is already read.
pub async fn mark_read(
    State(state): State<AppState>,
    Path((merchant_id, alert_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let found = AlertRepo::mark_read(&state.pool, alert_id, merchant_id).await?;

    if !found {
        return Err(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }
        .into());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/merchants/{merchant_id}/alerts/read-all
///
/// Mark all of the merchant's alerts as read. Returns the number of alerts
/// that were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let count = AlertRepo::mark_all_read(&state.pool, merchant_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}
