use crate::{Result, config::FormsServiceConfig};
use reqwest::StatusCode;
use std::time::Duration;

/// Builds the shared outbound client used for both the token and the
/// render calls.
pub fn build_client(config: &FormsServiceConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}

/// Reason phrase for a status, falling back to the numeric code.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
