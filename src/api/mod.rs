pub mod health;
pub mod token;

use axum::Router;

use crate::state::AppState;

/// Create the token server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(token::token_routes())
        .merge(health::health_routes())
        .with_state(state)
}
