#![forbid(unsafe_code)]

//! slidereel: an HTTP service that turns a batch of base64 images plus a
//! music track into a slideshow MP4.
//!
//! The pipeline is sequential per request: decode images → letterbox onto a
//! fixed portrait frame → fit the music track to the exact video length →
//! mux everything with the system `ffmpeg`.

pub mod audio;
pub mod compose;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod http;
pub mod job;

pub use config::AppConfig;
pub use error::{SlidereelError, SlidereelResult};
