use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`
use training_form_renderer::{
    config::{Config, FormsServiceConfig, LogsConfig, ServerConfig},
    server,
};
use wiremock::MockServer;

pub const TOKEN_PATH: &str = "/oauth/token";
pub const RENDER_PATH: &str = "/v1/adsRender/pdf";

/// Configuration pointing both outbound calls at a mock server.
pub fn create_test_config(mock: &MockServer) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        forms: FormsServiceConfig {
            client_id: "sb-client".to_string(),
            // "s3cr3t"
            client_secret_base64: "czNjcjN0".to_string(),
            token_url: format!("{}{}", mock.uri(), TOKEN_PATH),
            service_url: mock.uri(),
            default_language: "en_US".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
    }
}

pub fn create_test_app(mock: &MockServer) -> Router {
    create_test_app_with(&create_test_config(mock))
}

pub fn create_test_app_with(config: &Config) -> Router {
    let pipeline = server::build_pipeline(config).expect("pipeline should build");
    server::router(pipeline)
}

/// The end-to-end training request used throughout the tests.
pub fn sample_envelope() -> Value {
    json!({
        "language": "en_US",
        "customerData": { "id": 1, "name": "acme", "description": "" },
        "formData": {
            "acme": {
                "participant": "John Doe",
                "createdOn": "2024-05-01",
                "courseType": "external",
                "courseName": "X",
                "courseCost": 10,
                "costCurrency": "USD",
                "onlyStartEndDates": true,
                "schoolName": "Open University",
                "programme": "Leadership",
                "grantCertificate": true,
                "courseTheme": "Management",
                "readAndAccepted": true,
                "attachments": ["quote.pdf"],
                "securityDomain": "internal",
                "attendanceEmail": false
            }
        }
    })
}

pub async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/renderPDF")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
