use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::config::AppConfig;

/// Shared application state handed to every handler and middleware layer.
///
/// All dependencies are injected here at startup; no component reads
/// process-global state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let tokens = TokenService::new(&config.jwt);
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }
}
