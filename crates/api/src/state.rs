use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::QuoteRateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ermel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-IP limiter guarding quote submissions.
    pub quote_limiter: Arc<QuoteRateLimiter>,
}

impl AppState {
    pub fn new(pool: ermel_db::DbPool, config: ServerConfig) -> Self {
        let quote_limiter = Arc::new(QuoteRateLimiter::per_hour(
            config.quote_rate_limit_per_hour,
        ));
        Self {
            pool,
            config: Arc::new(config),
            quote_limiter,
        }
    }
}
