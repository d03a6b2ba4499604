use std::env;
use std::path::PathBuf;

/// Client-side configuration for the join flow
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the token endpoint host, e.g. `http://localhost:3000`
    pub token_url: String,
    /// JSON file backing the durable device store
    pub device_store_path: PathBuf,
    /// User agent of the runtime, used for mobile detection
    pub user_agent: Option<String>,
    /// Query string of the page the flow was started from
    pub page_query: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let token_url =
            env::var("TOKEN_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        if !token_url.starts_with("http://") && !token_url.starts_with("https://") {
            return Err(ConfigError::InvalidTokenUrl(token_url));
        }

        Ok(Config {
            token_url,
            device_store_path: env::var("DEVICE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".roomjoin/devices.json")),
            user_agent: env::var("USER_AGENT").ok(),
            page_query: env::var("PAGE_QUERY").unwrap_or_default(),
        })
    }
}

/// Token server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub jwt_issuer: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(ServerConfig {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?,
            jwt_expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "14400".to_string())
                .parse()
                .unwrap_or(14400),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "roomjoin".to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("JWT_SECRET environment variable is required")]
    MissingJwtSecret,
    #[error("TOKEN_URL must be an http(s) URL, got {0}")]
    InvalidTokenUrl(String),
}
