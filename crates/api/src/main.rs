use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockwatch_alerting::{AlertEngine, ContentGenerator, Heartbeat, SystemClock};
use stockwatch_api::config::ServerConfig;
use stockwatch_api::router::build_app_router;
use stockwatch_api::state::AppState;
use stockwatch_textgen::TextGenClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Configuration loaded");

    let pool = connect_database().await;

    let clock = Arc::new(SystemClock);
    let engine = Arc::new(AlertEngine::new(
        pool.clone(),
        content_generator(),
        clock.clone(),
    ));

    // The heartbeat is liveness only; tenant polls and the admin batch
    // endpoint drive the actual alert cycles.
    let heartbeat_cancel = tokio_util::sync::CancellationToken::new();
    let heartbeat =
        Heartbeat::new(clock).with_interval(Duration::from_secs(config.heartbeat_interval_secs));
    let heartbeat_handle = tokio::spawn(heartbeat.run(heartbeat_cancel.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Connections are drained; stop the background ticker before exit.
    heartbeat_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), heartbeat_handle).await;
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockwatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate the database, panicking on any failure.
/// A server that cannot reach its database should not come up.
async fn connect_database() -> stockwatch_db::DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = stockwatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    stockwatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    stockwatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    pool
}

/// Content generator backed by the provider when one is configured.
///
/// A missing `TEXTGEN_API_KEY` is not an error: the engine then produces
/// deterministic alert text for every merchant regardless of their
/// enhancement opt-in.
fn content_generator() -> ContentGenerator {
    match TextGenClient::from_env() {
        Some(client) => {
            tracing::info!(model = client.model(), "Text-generation provider configured");
            ContentGenerator::new(Arc::new(client))
        }
        None => {
            tracing::info!("No text-generation provider configured, using deterministic content");
            ContentGenerator::disabled()
        }
    }
}

/// Resolve when the process is asked to stop.
///
/// SIGINT covers interactive use, SIGTERM covers process managers; whichever
/// arrives first starts the graceful drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
