use serde::{Deserialize, Serialize};

/// Payload for the forms service's PDF render operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub xdp_template: String,
    pub xml_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    #[serde(default)]
    pub file_content: Option<String>,
}

/// Remote template identifier, `<customer>/<language>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn new(customer: &str, language: &str) -> Self {
        Self(format!("{}/{}", customer, language))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
