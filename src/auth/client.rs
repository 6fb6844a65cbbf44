use super::types::{AccessToken, TokenResponse};
use crate::{Error, Result, config::ClientCredentials, http::status_text};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire_access_token(&self) -> Result<AccessToken>;
}

/// Client-credentials grant against the forms service's OAuth endpoint.
pub struct OAuthClient {
    http: reqwest::Client,
    credentials: ClientCredentials,
    token_url: String,
}

impl OAuthClient {
    pub fn new(
        http: reqwest::Client,
        credentials: ClientCredentials,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            token_url: token_url.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for OAuthClient {
    async fn acquire_access_token(&self) -> Result<AccessToken> {
        debug!(
            "Requesting access token for client {}",
            self.credentials.client_id
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret()),
        ];

        let response = self.http.post(&self.token_url).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Token endpoint responded with {}", status);
            return Err(Error::TokenAcquisition {
                status: status_text(status),
            });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Token endpoint returned an unreadable body: {}", e);
            Error::TokenAcquisition {
                status: "malformed token response".to_string(),
            }
        })?;

        if token.access_token.is_empty() {
            return Err(Error::TokenAcquisition {
                status: "empty access token".to_string(),
            });
        }

        debug!(
            "Received access token (type: {:?}, expires in: {:?}s)",
            token.token_type, token.expires_in
        );

        Ok(AccessToken::new(token.access_token))
    }
}
