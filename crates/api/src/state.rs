use std::sync::Arc;

use fplmate_advice::AdvicePipeline;
use fplmate_fpl::FplClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fplmate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-only FPL API client.
    pub fpl: Arc<FplClient>,
    /// Generative advice pipeline.
    pub advice: Arc<AdvicePipeline>,
}
