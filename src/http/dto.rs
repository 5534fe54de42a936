use serde::{Deserialize, Serialize};

/// `POST /create-video` request body.
///
/// `images` is an ordered, non-empty list of base64 payloads (bare or
/// data-URI-prefixed); `music` is a single base64 audio payload.
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub images: Vec<String>,
    pub music: String,
}

/// Uniform error body for every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /health` body. Liveness only, no dependency checks.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
