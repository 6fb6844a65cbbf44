pub mod handlers;
mod types;

pub use types::HealthResponse;

use crate::{
    Result,
    auth::OAuthClient,
    config::{ClientCredentials, Config},
    http,
    pipeline::RenderPipeline,
    render::AdsRenderClient,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Wires the token and render clients from configuration. The client
/// secret is decoded here, once.
pub fn build_pipeline(config: &Config) -> Result<RenderPipeline> {
    let credentials = ClientCredentials::from_config(&config.forms)?;
    let http = http::build_client(&config.forms)?;

    let tokens = OAuthClient::new(http.clone(), credentials, config.forms.token_url.clone());
    let renderer = AdsRenderClient::new(http, config.forms.render_url());

    Ok(RenderPipeline::new(
        Arc::new(tokens),
        Arc::new(renderer),
        config.forms.default_language.clone(),
    ))
}

pub fn router(pipeline: RenderPipeline) -> Router {
    Router::new()
        .route("/api/renderPDF", post(handlers::render_pdf))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { pipeline })
}

pub async fn run(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let app = router(pipeline);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
