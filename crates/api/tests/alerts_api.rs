//! Integration tests for the merchant alerts endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_merchant, create_product, get, post_empty};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn empty_listing_has_no_more_pages(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/merchants/{merchant_id}/alerts")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["alerts"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["has_more"], false);
    assert_eq!(json["data"]["unread_count"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn listing_paginates_newest_first(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    // Three critical products produce three individual alerts.
    create_product(&pool, merchant_id, "A", 1).await;
    create_product(&pool, merchant_id, "B", 1).await;
    create_product(&pool, merchant_id, "C", 2).await;
    let app = common::build_test_app(pool);

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/trigger"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["created"], 3);

    let response = get(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alerts?page=1&limit=2"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["alerts"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["has_more"], true);
    assert_eq!(json["data"]["unread_count"], 3);

    let response = get(
        app,
        &format!("/api/v1/merchants/{merchant_id}/alerts?page=2&limit=2"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["alerts"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["has_more"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn listing_for_unknown_merchant_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/merchants/404/alerts").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Read state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn mark_all_read_clears_unread_count_and_sets_read_at(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    create_product(&pool, merchant_id, "A", 1).await;
    create_product(&pool, merchant_id, "B", 1).await;
    create_product(&pool, merchant_id, "C", 1).await;
    let app = common::build_test_app(pool);

    post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/trigger"),
    )
    .await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alerts/read-all"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 3);

    let response = get(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alerts/unread-count"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);

    // Every alert carries a read timestamp now.
    let response = get(app, &format!("/api/v1/merchants/{merchant_id}/alerts")).await;
    let json = body_json(response).await;
    for alert in json["data"]["alerts"].as_array().unwrap() {
        assert_eq!(alert["is_read"], true);
        assert!(alert["read_at"].is_string());
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn mark_read_flow(pool: PgPool) {
    let merchant_id = create_merchant(&pool, "Corner Shop").await;
    create_product(&pool, merchant_id, "A", 1).await;
    let app = common::build_test_app(pool);

    post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alert-cycle/trigger"),
    )
    .await;

    let response = get(app.clone(), &format!("/api/v1/merchants/{merchant_id}/alerts")).await;
    let json = body_json(response).await;
    let alert_id = json["data"]["alerts"][0]["id"].as_i64().unwrap();

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alerts/{alert_id}/read"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Already read: a repeat is a 404 per the scoped-update contract.
    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{merchant_id}/alerts/{alert_id}/read"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(
        app,
        &format!("/api/v1/merchants/{merchant_id}/alerts/unread-count"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

// ---------------------------------------------------------------------------
// Scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn alerts_are_scoped_to_their_merchant(pool: PgPool) {
    let owner = create_merchant(&pool, "Owner").await;
    let intruder = create_merchant(&pool, "Intruder").await;
    create_product(&pool, owner, "A", 1).await;
    let app = common::build_test_app(pool);

    post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{owner}/alert-cycle/trigger"),
    )
    .await;

    let response = get(app.clone(), &format!("/api/v1/merchants/{owner}/alerts")).await;
    let json = body_json(response).await;
    let alert_id = json["data"]["alerts"][0]["id"].as_i64().unwrap();

    // Another merchant can neither fetch nor mark the alert.
    let response = get(
        app.clone(),
        &format!("/api/v1/merchants/{intruder}/alerts/{alert_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/merchants/{intruder}/alerts/{alert_id}/read"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees it unread.
    let response = get(
        app,
        &format!("/api/v1/merchants/{owner}/alerts/{alert_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_read"], false);
}
