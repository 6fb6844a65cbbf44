use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to get access token: {status}")]
    TokenAcquisition { status: String },

    #[error("Failed to render PDF: {status}")]
    Render { status: String },

    #[error("Failed to render PDF")]
    EmptyRenderResult,

    #[error("Failed to convert data to XML: {0}")]
    XmlConversion(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn xml(msg: impl Into<String>) -> Self {
        Self::XmlConversion(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Errors raised by the forms service itself, whose message is safe to
    /// hand back to the browser.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::TokenAcquisition { .. } | Self::Render { .. } | Self::EmptyRenderResult
        )
    }

    /// Errors caused by the caller's payload.
    pub fn is_client_input(&self) -> bool {
        matches!(self, Self::XmlConversion(_) | Self::InvalidRequest(_))
    }
}
