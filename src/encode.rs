use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::audio::{MIX_CHANNELS, MIX_SAMPLE_RATE};
use crate::error::{SlidereelError, SlidereelResult};

/// ffmpeg image2 pattern for composited frames inside a workspace.
pub const FRAME_PATTERN: &str = "frame_%04d.jpg";

/// Path of the `index`-th composited frame inside `dir` (insertion order).
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:04}.jpg"))
}

#[derive(Clone, Debug)]
pub struct AssembleConfig {
    /// Directory holding `frame_%04d.jpg` files, indexed from zero.
    pub frames_dir: PathBuf,
    /// Number of frame files present.
    pub frame_count: usize,
    /// Raw f32le PCM at the mix rate, already fitted to the video length.
    pub audio_pcm_path: PathBuf,
    pub out_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Seconds each source image is displayed.
    pub seconds_per_image: u32,
    /// Output frame rate; ffmpeg duplicates frames to reach it.
    pub fps: u32,
}

impl AssembleConfig {
    /// Request validation happened long before this point, so every failure
    /// here is an encoder fault and maps to a processing error, never a 400.
    pub fn validate(&self) -> SlidereelResult<()> {
        if self.frame_count == 0 {
            return Err(SlidereelError::encode("no frames to assemble"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SlidereelError::encode(
                "assemble width/height must be non-zero",
            ));
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(SlidereelError::encode(
                "assemble width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.seconds_per_image == 0 {
            return Err(SlidereelError::encode("seconds_per_image must be non-zero"));
        }
        if self.fps == 0 {
            return Err(SlidereelError::encode("fps must be non-zero"));
        }
        Ok(())
    }

    /// Exact total video duration in seconds.
    pub fn video_duration_sec(&self) -> f64 {
        (self.frame_count as u64 * u64::from(self.seconds_per_image)) as f64
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Mux the frame sequence and fitted audio into a single progressive MP4.
///
/// One system `ffmpeg` invocation: the image2 demuxer reads each JPEG at a
/// rate of one frame per display window, and the encoder duplicates frames
/// up to the output fps. h264 + yuv420p + aac for broad compatibility.
pub fn assemble(cfg: &AssembleConfig) -> SlidereelResult<()> {
    cfg.validate()?;

    if !is_ffmpeg_on_path() {
        return Err(SlidereelError::encode(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let output = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error"])
        .args(["-framerate", &format!("1/{}", cfg.seconds_per_image), "-i"])
        .arg(cfg.frames_dir.join(FRAME_PATTERN))
        .args([
            "-f",
            "f32le",
            "-ar",
            &MIX_SAMPLE_RATE.to_string(),
            "-ac",
            &MIX_CHANNELS.to_string(),
            "-i",
        ])
        .arg(&cfg.audio_pcm_path)
        .args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-r",
            &cfg.fps.to_string(),
            "-c:a",
            "aac",
            "-shortest",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path)
        .output()
        .map_err(|e| {
            SlidereelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SlidereelError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
