//! HTTP surface: the JSON API plus the embedded form UI.

use crate::studio::{StateSnapshot, Studio};
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use promodeck_core::{BriefRequest, PromodeckError, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(RustEmbed)]
#[folder = "ui/"]
struct Assets;

/// The studio web server.
pub struct StudioServer {
    studio: Arc<Studio>,
}

/// Incoming form payload. Creativity defaults to the slider midpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateForm {
    period: String,
    features: String,
    #[serde(default = "default_creativity")]
    creativity: u8,
    #[serde(default)]
    api_key: Option<String>,
}

fn default_creativity() -> u8 {
    5
}

impl StudioServer {
    pub fn new(studio: Arc<Studio>) -> Self {
        Self { studio }
    }

    /// Build the router. Exposed separately so tests can drive it directly.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/state", get(get_state))
            .route("/api/generate", post(post_generate))
            .route("/api/copy", post(post_copy))
            .fallback(static_handler)
            .layer(CorsLayer::permissive())
            .with_state(Arc::clone(&self.studio))
    }

    /// Bind and serve until shutdown.
    pub async fn start(self, port: u16) -> Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
        tracing::info!("Promodeck studio available at http://localhost:{}", port);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

async fn get_state(State(studio): State<Arc<Studio>>) -> Json<StateSnapshot> {
    Json(studio.snapshot().await)
}

async fn post_generate(
    State(studio): State<Arc<Studio>>,
    Json(form): Json<GenerateForm>,
) -> Response {
    // Validation failures never reach the session: the submission is
    // rejected here with nothing dispatched.
    let request = match BriefRequest::new(form.period, form.features, form.creativity) {
        Ok(request) => match form.api_key {
            Some(key) if !key.trim().is_empty() => request.with_api_key(key),
            _ => request,
        },
        Err(err) => return error_response(&err),
    };

    match studio.generate(request).await {
        Ok(Some(brief)) => (StatusCode::OK, Json(brief)).into_response(),
        Ok(None) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "a generation is already in flight" })),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_copy(State(studio): State<Arc<Studio>>) -> Response {
    match studio.copy_text().await {
        Ok(Some(text)) => {
            (StatusCode::OK, Json(serde_json::json!({ "text": text }))).into_response()
        }
        Ok(None) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "no brief to copy" })),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &PromodeckError) -> Response {
    let status = match err {
        PromodeckError::MissingApiKey => StatusCode::UNAUTHORIZED,
        PromodeckError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PromodeckError::NetworkError(_)
        | PromodeckError::ProviderError(_)
        | PromodeckError::MalformedBrief(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if path.is_empty() || path == "index.html" {
        return index_html().await;
    }

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => index_html().await,
    }
}

async fn index_html() -> Response {
    match Assets::get("index.html") {
        Some(content) => Html(content.data).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
