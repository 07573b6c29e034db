//! Shared helpers for the HTTP integration tests.
//!
//! The app under test is built with the same [`build_app_router`] the binary
//! uses, so every request here crosses the production middleware stack. The
//! engine runs without a text-generation provider; no test touches the
//! network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use stockwatch_alerting::{AlertEngine, ContentGenerator, SystemClock};
use stockwatch_api::config::ServerConfig;
use stockwatch_api::router::build_app_router;
use stockwatch_api::state::AppState;
use stockwatch_core::types::DbId;

/// `ServerConfig` for tests; never read from the environment so a developer's
/// `.env` cannot change test behaviour.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        heartbeat_interval_secs: 60,
    }
}

/// Build the application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let engine = Arc::new(AlertEngine::new(
        pool.clone(),
        ContentGenerator::disabled(),
        Arc::new(SystemClock),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine,
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with an empty body against the app.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a PUT request with a JSON body against the app.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Insert a merchant row, returning its id.
pub async fn create_merchant(pool: &PgPool, shop_name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO merchants (shop_name) VALUES ($1) RETURNING id")
        .bind(shop_name)
        .fetch_one(pool)
        .await
        .expect("insert merchant")
}

/// Insert a product row, returning its id.
pub async fn create_product(pool: &PgPool, merchant_id: DbId, name: &str, quantity: i32) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO products (merchant_id, name, quantity, price) \
         VALUES ($1, $2, $3, 9.99) RETURNING id",
    )
    .bind(merchant_id)
    .bind(name)
    .bind(quantity)
    .fetch_one(pool)
    .await
    .expect("insert product")
}

/// Point the merchant's daily time at the current UTC minute so a check-due
/// call lands inside the tolerance window.
pub async fn set_daily_time_to_now(pool: &PgPool, merchant_id: DbId) {
    sqlx::query(
        "UPDATE merchant_alert_settings \
         SET daily_time = (NOW() AT TIME ZONE 'UTC')::time \
         WHERE merchant_id = $1",
    )
    .bind(merchant_id)
    .execute(pool)
    .await
    .expect("update daily_time");
}

/// Move the merchant's daily time three hours away from now so a check-due
/// call is guaranteed to miss the window.
pub async fn set_daily_time_off_window(pool: &PgPool, merchant_id: DbId) {
    sqlx::query(
        "UPDATE merchant_alert_settings \
         SET daily_time = ((NOW() + interval '3 hours') AT TIME ZONE 'UTC')::time \
         WHERE merchant_id = $1",
    )
    .bind(merchant_id)
    .execute(pool)
    .await
    .expect("update daily_time");
}
