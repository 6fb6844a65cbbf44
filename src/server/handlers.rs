use super::types::HealthResponse;
use crate::pipeline::{
    MSG_INVALID_BODY, RenderOutcome, RenderPipeline, RenderResult, RequestEnvelope, RequestState,
};
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: RenderPipeline,
}

/// `POST /api/renderPDF`. The body is parsed as JSON whatever its
/// content type, since the browser form posts a bare string body.
pub async fn render_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<RenderResult>) {
    info!("Received render request ({} bytes)", body.len());

    let envelope: RequestEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("Rejecting unparseable render request: {}", e);
            return into_response(RenderOutcome::rejected(MSG_INVALID_BODY));
        }
    };

    into_response(state.pipeline.process(envelope).await)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn into_response(outcome: RenderOutcome) -> (StatusCode, Json<RenderResult>) {
    (status_for(outcome.state), Json(outcome.result))
}

pub fn status_for(state: RequestState) -> StatusCode {
    match state {
        RequestState::Succeeded => StatusCode::OK,
        RequestState::Rejected => StatusCode::BAD_REQUEST,
        RequestState::Received | RequestState::Validated | RequestState::Failed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
