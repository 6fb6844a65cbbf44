use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MSG_SUCCESS: &str = "PDF generated successfully!";
pub const MSG_MISSING_DATA: &str = "Missing required data";
pub const MSG_XML_FAILED: &str = "Failed to convert data to XML";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred while generating the PDF";

/// The customer a submission belongs to. Selects the template namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of `POST /api/renderPDF`.
///
/// `form_data` maps the customer name to the filled form, e.g.
/// `{ "acme": { "participant": "John Doe", ... } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub customer_data: Option<CustomerData>,
    #[serde(default)]
    pub form_data: Option<Value>,
}

/// The only value returned to the browser. `pdf_blob` is empty on every
/// failure path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub pdf_blob: String,
    pub message: String,
}

impl RenderResult {
    pub fn success(pdf_blob: impl Into<String>) -> Self {
        Self {
            pdf_blob: pdf_blob.into(),
            message: MSG_SUCCESS.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            pdf_blob: String::new(),
            message: message.into(),
        }
    }
}
