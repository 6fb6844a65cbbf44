use super::types::{RenderRequest, RenderResponse, TemplateName};
use crate::{Error, Result, auth::AccessToken, http::status_text};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_ENCODING};
use tracing::{debug, warn};

#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Renders `base64_xml` with the named template and returns the
    /// base64 PDF content.
    async fn render_document(
        &self,
        token: &AccessToken,
        base64_xml: &str,
        template: &TemplateName,
    ) -> Result<String>;
}

/// Client for the forms service's `adsRender/pdf` operation.
pub struct AdsRenderClient {
    http: reqwest::Client,
    render_url: String,
}

impl AdsRenderClient {
    pub fn new(http: reqwest::Client, render_url: impl Into<String>) -> Self {
        Self {
            http,
            render_url: render_url.into(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for AdsRenderClient {
    async fn render_document(
        &self,
        token: &AccessToken,
        base64_xml: &str,
        template: &TemplateName,
    ) -> Result<String> {
        if token.is_empty() {
            return Err(Error::internal("render called without an access token"));
        }

        debug!("Rendering PDF with template {}", template);

        let request = RenderRequest {
            xdp_template: template.to_string(),
            xml_data: base64_xml.to_string(),
        };

        let response = self
            .http
            .post(&self.render_url)
            .query(&[("templateSource", "storageName"), ("Tracelevel", "2")])
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(CONTENT_ENCODING, "utf-8")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Render endpoint responded with {} for {}", status, template);
            return Err(Error::Render {
                status: status_text(status),
            });
        }

        let body = response.text().await?;
        let rendered: RenderResponse = serde_json::from_str(&body)?;

        match rendered.file_content {
            Some(content) if !content.is_empty() => {
                debug!("Rendered PDF ({} base64 chars)", content.len());
                Ok(content)
            }
            _ => {
                warn!("Render endpoint returned no file content for {}", template);
                Err(Error::EmptyRenderResult)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    fn create_client(server: &MockServer) -> AdsRenderClient {
        AdsRenderClient::new(
            reqwest::Client::new(),
            format!("{}/v1/adsRender/pdf", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_render_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/adsRender/pdf"))
            .and(query_param("templateSource", "storageName"))
            .and(query_param("Tracelevel", "2"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({
                "xdpTemplate": "acme/en_US",
                "xmlData": "PGE+YjwvYT4="
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"fileContent": "QUJD"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let pdf = create_client(&server)
            .render_document(
                &AccessToken::new("tok"),
                "PGE+YjwvYT4=",
                &TemplateName::new("acme", "en_US"),
            )
            .await
            .unwrap();

        assert_eq!(pdf, "QUJD");
    }

    #[tokio::test]
    async fn test_render_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = create_client(&server)
            .render_document(
                &AccessToken::new("tok"),
                "eA==",
                &TemplateName::new("unknown", "de_DE"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to render PDF: Not Found");
    }

    #[tokio::test]
    async fn test_missing_file_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fileContent": ""})))
            .mount(&server)
            .await;

        let err = create_client(&server)
            .render_document(
                &AccessToken::new("tok"),
                "eA==",
                &TemplateName::new("acme", "en_US"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyRenderResult));
    }

    #[tokio::test]
    async fn test_empty_token_never_calls_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = create_client(&server)
            .render_document(
                &AccessToken::new(""),
                "eA==",
                &TemplateName::new("acme", "en_US"),
            )
            .await;

        assert!(result.is_err());
    }
}
