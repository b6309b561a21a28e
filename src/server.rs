//! HTTP surface of the Dream Service: `POST /dream` and nothing else.

use crate::ai::ImageGenerationService;
use crate::error::ErrorKind;
use crate::models::{DreamResponse, PromptRequest};
use crate::Error;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Body sent when no better explanation is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Dependencies handed to every request; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ImageGenerationService>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageGenerationService>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dream", post(dream))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

/// `POST /dream`: forward the prompt to the provider and relay its image reference.
pub async fn dream(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PromptRequest>, JsonRejection>,
) -> std::result::Result<Json<DreamResponse>, DreamFailure> {
    // Only unreadable bodies stop here; a missing prompt goes on to the provider.
    let Json(request) =
        payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    info!(
        "Dream requested (prompt: {} chars)",
        request.prompt.chars().count()
    );

    let image = state.provider.generate_image(&request.prompt).await?;
    info!("Dream ready");

    Ok(Json(DreamResponse { image }))
}

/// Any failure while handling `/dream`. Always rendered as a 500 with a text body.
#[derive(Debug)]
pub struct DreamFailure(pub Error);

impl From<Error> for DreamFailure {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl DreamFailure {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    /// Text returned to the caller: the provider's message or the fallback.
    pub fn public_message(&self) -> String {
        self.0
            .provider_message()
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string()
    }
}

impl IntoResponse for DreamFailure {
    fn into_response(self) -> Response {
        error!("Dream failed ({} error): {}", self.kind(), self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}
