use super::FormsServiceConfig;
use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// OAuth client credentials with the secret already decoded.
///
/// Built once at startup so a malformed secret stops the process instead
/// of failing every request.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_config(config: &FormsServiceConfig) -> Result<Self> {
        let decoded = STANDARD.decode(config.client_secret_base64.trim())?;
        let secret = String::from_utf8(decoded)
            .map_err(|_| Error::config("CLIENT_SECRET_BASE64 does not decode to UTF-8"))?;

        if secret.is_empty() {
            return Err(Error::config("CLIENT_SECRET_BASE64 decodes to an empty secret"));
        }

        Ok(Self::new(config.client_id.clone(), secret))
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
