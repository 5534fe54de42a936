use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;

use super::dto::{CreateVideoRequest, HealthResponse};
use super::error::ApiError;
use super::state::AppState;
use crate::job;

pub const DOWNLOAD_NAME: &str = "generated_video.mp4";

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build a slideshow MP4 from the posted images and music track.
///
/// The pipeline is synchronous and encode-dominated, so it runs on the
/// blocking pool; one job occupies one worker to completion.
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(reject_payload)?;

    if req.images.is_empty() {
        return Err(ApiError::BadRequest(
            "no images provided or invalid format".to_string(),
        ));
    }

    tracing::info!(images = req.images.len(), "received create-video request");

    let config = state.config.clone();
    let video = tokio::task::spawn_blocking(move || {
        job::render_slideshow(&config, &req.images, &req.music)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("video job panicked: {e}")))??;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
        )
        .header(header::CONTENT_LENGTH, video.len())
        .body(Body::from(video))
        .unwrap())
}

/// Keep the body-limit rejection as 413; everything else (non-JSON body,
/// missing fields, wrong shapes) is a plain 400.
fn reject_payload(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("request body too large".to_string())
    } else {
        ApiError::BadRequest(format!("invalid request: {}", rejection.body_text()))
    }
}
