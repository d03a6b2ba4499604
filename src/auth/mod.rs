use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::models::Claims;

/// Mints access tokens for room participants. The identity is taken as given.
#[derive(Clone)]
pub struct AccessTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: u64,
    issuer: String,
}

impl AccessTokenService {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_seconds: config.jwt_expiry_seconds,
            issuer: config.jwt_issuer.clone(),
        }
    }

    /// Generate a token for `identity`; every call yields a distinct token
    pub fn generate_token(&self, identity: &str) -> Result<String> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(AppError::BadRequest("identity is required".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.expiry_seconds as i64,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::JwtError(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
