use serde::{Deserialize, Serialize};

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // identity
    pub jti: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// `GET /token` query
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub identity: String,
}
