use super::{
    fsm::{RequestEvent, RequestState, RequestStateMachine},
    types::*,
};
use crate::{
    Error, Result,
    auth::TokenProvider,
    render::{DocumentRenderer, TemplateName, xml},
};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Template selection is `<customer name>/<language>`; the forms service
/// decides whether it exists.
pub fn derive_template_name(customer: &CustomerData, language: &str) -> TemplateName {
    TemplateName::new(&customer.name, language)
}

/// Terminal state of one request together with the body sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub state: RequestState,
    pub result: RenderResult,
}

impl RenderOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            state: RequestState::Rejected,
            result: RenderResult::failure(message),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: RequestState::Failed,
            result: RenderResult::failure(message),
        }
    }

    pub fn succeeded(pdf_blob: impl Into<String>) -> Self {
        Self {
            state: RequestState::Succeeded,
            result: RenderResult::success(pdf_blob),
        }
    }
}

fn rejection_message(error: &Error) -> String {
    match error {
        Error::InvalidRequest(message) => message.clone(),
        _ => MSG_XML_FAILED.to_string(),
    }
}

/// Token exchange followed by the render call, one fresh token per request.
#[derive(Clone)]
pub struct RenderPipeline {
    tokens: Arc<dyn TokenProvider>,
    renderer: Arc<dyn DocumentRenderer>,
    default_language: String,
}

impl RenderPipeline {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        renderer: Arc<dyn DocumentRenderer>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            tokens,
            renderer,
            default_language: default_language.into(),
        }
    }

    pub async fn process(&self, envelope: RequestEnvelope) -> RenderOutcome {
        let request_id = Uuid::new_v4();
        let span = info_span!("render_pdf", %request_id);

        async move {
            let mut fsm = RequestStateMachine::new();
            let outcome = match self.drive(&mut fsm, envelope).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Request lifecycle error: {}", e);
                    RenderOutcome::failed(MSG_UNEXPECTED)
                }
            };

            if fsm.is_terminal() {
                match fsm.last_error() {
                    Some(reason) => warn!(
                        "Request finished in {:?}: {}",
                        fsm.current_state(),
                        reason
                    ),
                    None => debug!("Request finished in {:?}", fsm.current_state()),
                }
            }

            outcome
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &self,
        fsm: &mut RequestStateMachine,
        envelope: RequestEnvelope,
    ) -> Result<RenderOutcome> {
        let (template, xml_data) = match self.prepare(envelope) {
            Ok(prepared) => prepared,
            Err(e) if e.is_client_input() => {
                fsm.fail(RequestEvent::ValidationFailed, e.to_string())?;
                return Ok(RenderOutcome::rejected(rejection_message(&e)));
            }
            Err(e) => return Err(e),
        };

        fsm.transition(RequestEvent::ValidationPassed)?;
        info!("Rendering PDF with template {}", template);

        match self.render(&template, &xml_data).await {
            Ok(pdf_blob) => {
                fsm.transition(RequestEvent::PdfRendered)?;
                info!("PDF generated for template {}", template);
                Ok(RenderOutcome::succeeded(pdf_blob))
            }
            Err(e) => {
                error!("PDF generation failed for template {}: {}", template, e);
                let message = if e.is_upstream() {
                    e.to_string()
                } else {
                    MSG_UNEXPECTED.to_string()
                };
                fsm.fail(RequestEvent::PipelineFailed, e.to_string())?;
                Ok(RenderOutcome::failed(message))
            }
        }
    }

    /// Checks the envelope and converts the form data. Nothing leaves the
    /// process until this succeeds.
    fn prepare(&self, envelope: RequestEnvelope) -> Result<(TemplateName, String)> {
        let (customer, form_data) = match (envelope.customer_data, envelope.form_data) {
            (Some(customer), Some(form_data)) => (customer, form_data),
            _ => return Err(Error::invalid_request(MSG_MISSING_DATA)),
        };

        let xml_data = xml::to_base64_xml(&form_data)?;

        let language = envelope
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.default_language.clone());
        debug!("Customer {} ({}) validated", customer.id, customer.name);

        Ok((derive_template_name(&customer, &language), xml_data))
    }

    async fn render(&self, template: &TemplateName, xml_data: &str) -> Result<String> {
        let token = self.tokens.acquire_access_token().await?;
        let pdf_blob = self
            .renderer
            .render_document(&token, xml_data, template)
            .await?;

        if pdf_blob.is_empty() {
            return Err(Error::EmptyRenderResult);
        }
        Ok(pdf_blob)
    }
}
