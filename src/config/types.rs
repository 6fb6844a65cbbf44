use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub forms: FormsServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Connection settings for the OAuth token endpoint and the remote
/// forms rendering service.
#[derive(Clone, Serialize, Deserialize)]
pub struct FormsServiceConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret_base64: String,
    #[serde(default)]
    pub token_url: String,
    #[serde(default)]
    pub service_url: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for FormsServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormsServiceConfig")
            .field("client_id", &self.client_id)
            .field("client_secret_base64", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("service_url", &self.service_url)
            .field("default_language", &self.default_language)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FormsServiceConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret_base64: String::new(),
            token_url: String::new(),
            service_url: String::new(),
            default_language: default_language(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    "en_US".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
