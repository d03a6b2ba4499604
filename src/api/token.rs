use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};

use crate::error::Result;
use crate::models::TokenQuery;
use crate::state::AppState;

/// Token routes
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/token", get(issue_token))
}

/// GET /token?identity=<identity> - plain-text access token
async fn issue_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<String> {
    let token = state.tokens.generate_token(&query.identity)?;
    tracing::info!(identity = %query.identity.trim(), "Issued access token");
    Ok(token)
}
