//! Integration tests for the alert cycle endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_merchant, create_product, post_empty, set_daily_time_off_window,
    set_daily_time_to_now,
};
use sqlx::PgPool;
use stockwatch_db::repositories::AlertSettingsRepo;

// ---------------------------------------------------------------------------
// check-due
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn check_due_inside_window_processes_the_cycle(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    create_product(&pool, merchant_id, "Espresso Beans", 1).await;
    create_product(&pool, merchant_id, "Filters", 4).await;

    AlertSettingsRepo::get_or_create(&pool, merchant_id)
        .await
        .unwrap();
    set_daily_time_to_now(&pool, merchant_id).await;

    let app = common::build_test_app(pool);

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/check-due"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["due"], true);
    // One critical single plus one grouped alert.
    assert_eq!(json["data"]["created"], 2);

    // A second poll the same day reports processed, creates nothing.
    let response = post_empty(
        app,
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/check-due"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["due"], false);
    assert_eq!(json["data"]["created"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn check_due_outside_window_reports_next_due_time(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    create_product(&pool, merchant_id, "Espresso Beans", 1).await;

    AlertSettingsRepo::get_or_create(&pool, merchant_id)
        .await
        .unwrap();
    set_daily_time_off_window(&pool, merchant_id).await;

    let app = common::build_test_app(pool);

    let response = post_empty(
        app,
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/check-due"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["due"], false);
    assert_eq!(json["data"]["created"], 0);
    assert!(json["data"]["next_due_at"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn check_due_for_unknown_merchant_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_empty(app, "/api/v1/merchants/404/alert-cycle/check-due").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// trigger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn trigger_bypasses_window_but_dedups_daily(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    create_product(&pool, merchant_id, "Espresso Beans", 1).await;

    AlertSettingsRepo::get_or_create(&pool, merchant_id)
        .await
        .unwrap();
    set_daily_time_off_window(&pool, merchant_id).await;

    let app = common::build_test_app(pool);

    // Outside the window, the manual trigger still runs the cycle.
    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/trigger"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 1);

    // But the daily dedup still applies.
    let response = post_empty(
        app,
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/trigger"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 0);
}

// ---------------------------------------------------------------------------
// admin trigger-all
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn trigger_all_processes_every_enabled_merchant(pool: PgPool) {
    let first = create_merchant(&pool, "First").await;
    let second = create_merchant(&pool, "Second").await;
    create_product(&pool, first, "A", 1).await;
    create_product(&pool, second, "B", 4).await;

    AlertSettingsRepo::get_or_create(&pool, first).await.unwrap();
    AlertSettingsRepo::get_or_create(&pool, second).await.unwrap();

    let app = common::build_test_app(pool);

    let response = post_empty(app.clone(), "/api/v1/admin/alert-cycle/trigger-all").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 2);

    // Idempotent across the day: a second run creates nothing.
    let response = post_empty(app, "/api/v1/admin/alert-cycle/trigger-all").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 0);
}
