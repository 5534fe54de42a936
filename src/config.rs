use crate::error::{SlidereelError, SlidereelResult};

/// Immutable service configuration, built once at startup and passed down
/// explicitly. Nothing here is negotiable per request.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Output frame width in pixels (portrait by default).
    pub frame_width: u32,
    /// Output frame height in pixels.
    pub frame_height: u32,
    /// How long each image is shown, in seconds.
    pub seconds_per_image: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Hard cap on the HTTP request body, enforced before JSON parsing.
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_width: 1080,
            frame_height: 1920,
            seconds_per_image: 10,
            fps: 24,
            max_body_bytes: 100 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> SlidereelResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(SlidereelError::validation(
                "frame width/height must be non-zero",
            ));
        }
        if self.frame_width % 2 != 0 || self.frame_height % 2 != 0 {
            // yuv420p output requires even dimensions.
            return Err(SlidereelError::validation(
                "frame width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.seconds_per_image == 0 {
            return Err(SlidereelError::validation(
                "seconds_per_image must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(SlidereelError::validation("fps must be non-zero"));
        }
        if self.max_body_bytes == 0 {
            return Err(SlidereelError::validation("max_body_bytes must be non-zero"));
        }
        Ok(())
    }
}
