use std::path::{Path, PathBuf};

use image::RgbImage;
use tempfile::TempDir;

use crate::audio;
use crate::compose;
use crate::config::AppConfig;
use crate::decode;
use crate::encode::{self, AssembleConfig};
use crate::error::{SlidereelError, SlidereelResult};

/// Per-request scratch directory with guaranteed cleanup.
///
/// Every request gets its own uniquely-named directory; nothing in it
/// outlives the job. `close` releases it explicitly so deletion failures
/// can be logged; dropping the workspace is the backstop.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> SlidereelResult<Self> {
        let dir = TempDir::with_prefix("slidereel-")
            .map_err(|e| SlidereelError::Other(anyhow::anyhow!("failed to create workspace: {e}")))?;
        tracing::debug!(path = %dir.path().display(), "created workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the workspace. Failure to clean up is logged, never surfaced.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(path = %path.display(), error = %e, "could not delete workspace");
        } else {
            tracing::debug!(path = %path.display(), "deleted workspace");
        }
    }
}

/// Run the whole pipeline for one request: decode and composite every image,
/// fit the music track to the resulting video length, mux, and return the
/// MP4 bytes. The workspace is released on every exit path.
#[tracing::instrument(skip_all, fields(images = images.len()))]
pub fn render_slideshow(
    cfg: &AppConfig,
    images: &[String],
    music: &str,
) -> SlidereelResult<Vec<u8>> {
    let workspace = Workspace::create()?;
    let result = run_pipeline(cfg, images, music, workspace.path());
    workspace.close();
    result
}

fn run_pipeline(
    cfg: &AppConfig,
    images: &[String],
    music: &str,
    workdir: &Path,
) -> SlidereelResult<Vec<u8>> {
    let music_path = stage_music(music, workdir)?;

    let frame_count = composite_images(cfg, images, workdir)?;
    let target_sec = (frame_count as u64 * u64::from(cfg.seconds_per_image)) as f64;
    tracing::info!(frames = frame_count, duration_sec = target_sec, "frame sequence ready");

    let track = audio::decode_audio(&music_path)?;
    tracing::info!(
        audio_sec = track.duration_sec(),
        target_sec,
        "fitting audio to video length"
    );
    let fitted = audio::fit_to_duration(&track, target_sec)?;
    let pcm_path = workdir.join("audio_fitted.pcm");
    audio::write_pcm(&fitted, &pcm_path)?;

    let out_path = workdir.join("output.mp4");
    let assemble_cfg = AssembleConfig {
        frames_dir: workdir.to_path_buf(),
        frame_count,
        audio_pcm_path: pcm_path,
        out_path: out_path.clone(),
        width: cfg.frame_width,
        height: cfg.frame_height,
        seconds_per_image: cfg.seconds_per_image,
        fps: cfg.fps,
    };
    encode::assemble(&assemble_cfg)?;

    let bytes = std::fs::read(&out_path).map_err(|e| {
        SlidereelError::encode(format!("failed to read '{}': {e}", out_path.display()))
    })?;
    tracing::info!(bytes = bytes.len(), "video assembled");
    Ok(bytes)
}

/// Decode the music payload and stage it for ffmpeg, which probes the
/// container format from the bytes themselves.
fn stage_music(music: &str, workdir: &Path) -> SlidereelResult<PathBuf> {
    let bytes = decode::decode_base64(music)
        .map_err(|e| SlidereelError::audio(format!("invalid music payload: {e:#}")))?;
    let path = workdir.join("music_input.bin");
    std::fs::write(&path, &bytes).map_err(|e| {
        SlidereelError::audio(format!("failed to stage music '{}': {e}", path.display()))
    })?;
    Ok(path)
}

/// Decode and composite every image, writing survivors as a contiguous
/// zero-indexed JPEG sequence. Returns how many frames were written.
///
/// A failing image is skipped, not fatal, whether it failed to decode or to
/// persist; the job only fails when nothing survives. The surviving frames
/// keep their relative input order.
fn composite_images(cfg: &AppConfig, images: &[String], workdir: &Path) -> SlidereelResult<usize> {
    let results: Vec<SlidereelResult<RgbImage>> = images
        .iter()
        .map(|payload| {
            decode::decode_image(payload)
                .map(|img| compose::compose_frame(&img, cfg.frame_width, cfg.frame_height))
        })
        .collect();

    let mut frame_count = 0usize;
    for (index, result) in results.into_iter().enumerate() {
        let path = encode::frame_path(workdir, frame_count);
        match result.and_then(|frame| compose::save_frame_jpeg(&frame, &path)) {
            Ok(()) => {
                frame_count += 1;
                tracing::info!(index, total = images.len(), "processed image");
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping image");
            }
        }
    }

    if frame_count == 0 {
        return Err(SlidereelError::encode("no valid images could be processed"));
    }
    Ok(frame_count)
}
