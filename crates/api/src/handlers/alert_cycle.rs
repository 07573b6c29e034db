//! Handlers for the alert cycle endpoints (due-check, manual trigger, batch).

use axum::extract::{Path, State};
use axum::Json;
use stockwatch_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::alert_settings::ensure_merchant_exists;
use crate::state::AppState;

/// POST /api/v1/merchants/{merchant_id}/alert-cycle/check-due
///
/// The tenant-facing poll: runs the cycle when the merchant is inside its
/// daily window and unprocessed, otherwise reports the next due time.
pub async fn check_due(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let outcome = state.engine.run_cycle_if_due(merchant_id).await?;

    Ok(Json(serde_json::json!({ "data": outcome })))
}

/// POST /api/v1/merchants/{merchant_id}/alert-cycle/trigger
///
/// Manual/test trigger: bypasses the due-check but still respects the
/// once-per-day delivery log.
pub async fn trigger_now(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let created = state.engine.trigger_for_merchant(merchant_id).await?;

    tracing::info!(merchant_id, created, "Manual alert cycle triggered");

    Ok(Json(serde_json::json!({
        "data": { "created": created }
    })))
}

/// POST /api/v1/admin/alert-cycle/trigger-all
///
/// Batch entry point for operator- or cron-triggered runs across all
/// enabled merchants. Access restriction is the deployment's concern; the
/// route lives under `/admin` for that purpose.
pub async fn trigger_all(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let created = state.engine.process_all_enabled().await?;

    Ok(Json(serde_json::json!({
        "data": { "created": created }
    })))
}
