//! Access token retrieval for a join attempt.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::JoinError;

/// Issues a fresh access token per join attempt; tokens are never cached
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self, identity: &str) -> Result<String, JoinError>;
}

/// `GET {base_url}/token?identity=<identity>`, body is the token
#[derive(Clone)]
pub struct HttpTokenClient {
    client: Client,
    base_url: String,
}

impl HttpTokenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/token", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TokenSource for HttpTokenClient {
    async fn fetch_token(&self, identity: &str) -> Result<String, JoinError> {
        let res = self
            .client
            .get(self.endpoint())
            .query(&[("identity", identity)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::warn!(status, identity, "Token request rejected");
            return Err(JoinError::TokenStatus { status });
        }

        let token = res.text().await?;
        let token = token.trim();
        if token.is_empty() {
            return Err(JoinError::TokenTransport(
                "Token endpoint returned an empty body".to_string(),
            ));
        }

        tracing::debug!(identity, "Fetched access token");
        Ok(token.to_string())
    }
}
