use std::sync::Arc;

use stockwatch_alerting::AlertEngine;

use crate::config::ServerConfig;

/// State handed to every handler via `State<AppState>`.
///
/// Cloning is cheap: the pool is internally reference-counted and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: stockwatch_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Alerting engine shared by handlers and background tasks.
    pub engine: Arc<AlertEngine>,
}
