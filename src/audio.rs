use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use crate::error::{SlidereelError, SlidereelResult};

pub const MIX_SAMPLE_RATE: u32 = 48_000;
pub const MIX_CHANNELS: u16 = 2;

/// Decoded audio as interleaved f32 samples.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    pub sample_rate: u32,
    pub channels: u16,
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of per-channel sample frames.
    pub fn frames(&self) -> usize {
        self.interleaved_f32.len() / self.channels as usize
    }

    pub fn duration_sec(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Decode any audio container/codec `ffmpeg` understands into interleaved
/// f32 PCM at the mix rate.
///
/// We intentionally shell out to the system `ffmpeg` rather than linking
/// native decoder libraries; the assembler already requires it on PATH.
pub fn decode_audio(source_path: &Path) -> SlidereelResult<AudioPcm> {
    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(source_path)
        .args([
            "-f",
            "f32le",
            "-ac",
            &MIX_CHANNELS.to_string(),
            "-ar",
            &MIX_SAMPLE_RATE.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| SlidereelError::audio(format!("failed to run ffmpeg: {e}")))?;

    if !out.status.success() {
        return Err(SlidereelError::audio(format!(
            "ffmpeg could not decode '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let mut interleaved_f32 = Vec::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        interleaved_f32.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    if interleaved_f32.is_empty() {
        return Err(SlidereelError::audio(format!(
            "'{}' decoded to zero audio samples",
            source_path.display()
        )));
    }

    Ok(AudioPcm {
        sample_rate: MIX_SAMPLE_RATE,
        channels: MIX_CHANNELS,
        interleaved_f32,
    })
}

/// Fit `pcm` to exactly `target_sec` seconds.
///
/// Shorter input is repeated gaplessly and cut at the target; longer input
/// is trimmed to its prefix; an exact match passes through unchanged.
pub fn fit_to_duration(pcm: &AudioPcm, target_sec: f64) -> SlidereelResult<AudioPcm> {
    if pcm.interleaved_f32.is_empty() {
        return Err(SlidereelError::audio("cannot fit empty audio track"));
    }
    if !target_sec.is_finite() || target_sec <= 0.0 {
        return Err(SlidereelError::audio(format!(
            "target duration must be positive, got {target_sec}"
        )));
    }

    let target_frames = (target_sec * f64::from(pcm.sample_rate)).round() as usize;
    let target_samples = target_frames * pcm.channels as usize;

    let interleaved_f32 = if pcm.interleaved_f32.len() >= target_samples {
        pcm.interleaved_f32[..target_samples].to_vec()
    } else {
        pcm.interleaved_f32
            .iter()
            .copied()
            .cycle()
            .take(target_samples)
            .collect()
    };

    Ok(AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32,
    })
}

/// Write PCM as raw little-endian f32 for ffmpeg's `f32le` demuxer.
pub fn write_pcm(pcm: &AudioPcm, path: &Path) -> SlidereelResult<()> {
    let file = std::fs::File::create(path).map_err(|e| {
        SlidereelError::audio(format!("failed to create '{}': {e}", path.display()))
    })?;
    let mut writer = std::io::BufWriter::new(file);
    for sample in &pcm.interleaved_f32 {
        writer.write_all(&sample.to_le_bytes()).map_err(|e| {
            SlidereelError::audio(format!("failed to write '{}': {e}", path.display()))
        })?;
    }
    writer.flush().map_err(|e| {
        SlidereelError::audio(format!("failed to flush '{}': {e}", path.display()))
    })?;
    Ok(())
}
