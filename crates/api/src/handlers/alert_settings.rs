//! Handlers for merchant alert settings.

use axum::extract::{Path, State};
use axum::Json;
use stockwatch_core::error::CoreError;
use stockwatch_core::settings;
use stockwatch_core::types::DbId;
use stockwatch_db::models::alert_settings::UpdateAlertSettings;
use stockwatch_db::repositories::{AlertSettingsRepo, MerchantRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/merchants/{merchant_id}/alert-settings
///
/// Return the merchant's settings, creating the default row on first read.
pub async fn get_settings(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let settings = AlertSettingsRepo::get_or_create(&state.pool, merchant_id).await?;

    Ok(Json(serde_json::json!({ "data": settings })))
}

/// PUT /api/v1/merchants/{merchant_id}/alert-settings
///
/// Apply only the provided fields. Threshold validation runs against the
/// merged result, so a single invalid partial field is rejected and no
/// partial update occurs.
pub async fn update_settings(
    State(state): State<AppState>,
    Path(merchant_id): Path<DbId>,
    Json(input): Json<UpdateAlertSettings>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_merchant_exists(&state, merchant_id).await?;

    let current = AlertSettingsRepo::get_or_create(&state.pool, merchant_id).await?;

    let low = input.low_stock_threshold.unwrap_or(current.low_stock_threshold);
    let critical = input
        .critical_stock_threshold
        .unwrap_or(current.critical_stock_threshold);
    settings::validate_thresholds(low, critical)?;

    if let Some(ref email) = input.email {
        settings::validate_email(email)?;
    }

    let updated = AlertSettingsRepo::update(&state.pool, merchant_id, &input).await?;

    tracing::info!(merchant_id, "Alert settings updated");

    Ok(Json(serde_json::json!({ "data": updated })))
}

/// Return `NotFound` when the merchant id is unknown upstream.
pub(crate) async fn ensure_merchant_exists(
    state: &AppState,
    merchant_id: DbId,
) -> Result<(), AppError> {
    if MerchantRepo::exists(&state.pool, merchant_id).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Merchant",
            id: merchant_id,
        }
        .into())
    }
}
