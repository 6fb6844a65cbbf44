mod credentials;
mod types;

pub use credentials::ClientCredentials;
pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path, |key| env::var(key).ok()).await
}

/// Reads the optional YAML file at `config_path`, overlays the variables
/// returned by `lookup` and validates the result.
pub async fn load_from<F>(config_path: impl AsRef<Path>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = config_path.as_ref();

    let mut config = if config_path.exists() {
        debug!("Loading configuration from: {}", config_path.display());
        let config_str = tokio::fs::read_to_string(config_path).await?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!(
            "No configuration file at {}, using defaults and environment",
            config_path.display()
        );
        Config::default()
    };

    config.apply_overrides(lookup)?;
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Applies environment-style overrides. `lookup` returns the value of a
    /// variable, or `None` when unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(client_id) = lookup("CLIENT_ID") {
            self.forms.client_id = client_id;
        }
        if let Some(secret) = lookup("CLIENT_SECRET_BASE64") {
            self.forms.client_secret_base64 = secret;
        }
        if let Some(token_url) = lookup("TOKEN_URL") {
            self.forms.token_url = token_url;
        }
        if let Some(service_url) = lookup("FORM_SERVICE_URL") {
            self.forms.service_url = service_url;
        }
        if let Some(language) = lookup("DEFAULT_LANGUAGE") {
            self.forms.default_language = language;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.forms.validate()
    }
}

impl FormsServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::config("CLIENT_ID must be set"));
        }
        require_https("TOKEN_URL", &self.token_url)?;
        require_https("FORM_SERVICE_URL", &self.service_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(Error::config("connect_timeout_secs must be greater than zero"));
        }
        if self.default_language.trim().is_empty() {
            return Err(Error::config("default_language must not be empty"));
        }
        // Decoding here surfaces a bad secret before the server binds.
        ClientCredentials::from_config(self)?;
        Ok(())
    }

    /// Full URL of the PDF render operation.
    pub fn render_url(&self) -> String {
        format!("{}/v1/adsRender/pdf", self.service_url.trim_end_matches('/'))
    }
}

fn require_https(name: &str, url: &str) -> Result<()> {
    if url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{} must start with https:// (got '{}')",
            name, url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn valid_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("CLIENT_ID", "sb-client"),
            // "s3cr3t"
            ("CLIENT_SECRET_BASE64", "czNjcjN0"),
            ("TOKEN_URL", "https://auth.example.com/oauth/token"),
            ("FORM_SERVICE_URL", "https://forms.example.com/"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.forms.default_language, "en_US");
        assert_eq!(config.forms.timeout_secs, 30);
        assert_eq!(config.forms.connect_timeout_secs, 10);
    }

    #[test]
    fn test_env_overrides_and_validation() {
        let mut config = Config::default();
        config.apply_overrides(env_from(&valid_env())).unwrap();

        assert_eq!(config.forms.client_id, "sb-client");
        assert_eq!(config.forms.token_url, "https://auth.example.com/oauth/token");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.forms.render_url(),
            "https://forms.example.com/v1/adsRender/pdf"
        );
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env_from(&[("PORT", "9090")])).unwrap();
        assert_eq!(config.server.port, 9090);

        let result = config.apply_overrides(env_from(&[("PORT", "not-a-port")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_plain_http_urls() {
        let mut env = valid_env();
        env[2] = ("TOKEN_URL", "http://auth.example.com/oauth/token");

        let mut config = Config::default();
        config.apply_overrides(env_from(&env)).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TOKEN_URL"));
    }

    #[rstest]
    #[case(0, 10, "timeout_secs")]
    #[case(30, 0, "connect_timeout_secs")]
    fn test_rejects_zero_timeouts(
        #[case] timeout_secs: u64,
        #[case] connect_timeout_secs: u64,
        #[case] field: &str,
    ) {
        let mut config = Config::default();
        config.apply_overrides(env_from(&valid_env())).unwrap();
        config.forms.timeout_secs = timeout_secs;
        config.forms.connect_timeout_secs = connect_timeout_secs;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(field));
    }

    #[test]
    fn test_rejects_bad_secret() {
        let mut env = valid_env();
        env[1] = ("CLIENT_SECRET_BASE64", "not base64!!");

        let mut config = Config::default();
        config.apply_overrides(env_from(&env)).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_client_id() {
        let mut config = Config::default();
        config
            .apply_overrides(env_from(&valid_env()[1..]))
            .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CLIENT_ID"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
server:
  port: 3000
  logs:
    level: debug
forms:
  client_id: yaml-client
  client_secret_base64: czNjcjN0
  token_url: https://auth.example.com/oauth/token
  service_url: https://forms.example.com
  timeout_secs: 5
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.logs.level, "debug");
        assert_eq!(config.forms.client_id, "yaml-client");
        assert_eq!(config.forms.timeout_secs, 5);
        assert_eq!(config.forms.connect_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = Config::default();
        config.apply_overrides(env_from(&valid_env())).unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("czNjcjN0"));
        assert!(rendered.contains("<redacted>"));
    }
}
