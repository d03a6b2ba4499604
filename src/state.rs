use std::sync::Arc;

use crate::auth::AccessTokenService;
use crate::config::ServerConfig;

/// Shared token server state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<AccessTokenService>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let tokens = AccessTokenService::new(&config);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}
