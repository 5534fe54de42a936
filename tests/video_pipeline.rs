//! End-to-end pipeline tests. These shell out to `ffmpeg`/`ffprobe` and are
//! skipped when the tools are not on PATH.

use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use base64::Engine as _;

use slidereel::job::render_slideshow;
use slidereel::{AppConfig, SlidereelError};

fn ffmpeg_tools_available() -> bool {
    let ffmpeg_ok = Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    let ffprobe_ok = Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    ffmpeg_ok && ffprobe_ok
}

/// Small frame and short display window keep the encode cheap.
fn test_config() -> AppConfig {
    AppConfig {
        frame_width: 108,
        frame_height: 192,
        seconds_per_image: 2,
        fps: 24,
        ..AppConfig::default()
    }
}

fn png_base64(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 60, 20]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    base64::engine::general_purpose::STANDARD.encode(&buf)
}

fn synth_music_base64(dir: &Path, seconds: f64) -> anyhow::Result<String> {
    let wav_path = dir.join("tone.wav");
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=220:sample_rate=48000",
            "-t",
            &seconds.to_string(),
            "-c:a",
            "pcm_s16le",
        ])
        .arg(&wav_path)
        .status()?;
    anyhow::ensure!(status.success(), "ffmpeg failed creating tone.wav");

    let bytes = std::fs::read(&wav_path)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
}

struct ProbedVideo {
    duration_sec: f64,
    width: u32,
    height: u32,
    has_audio: bool,
}

fn probe_video(path: &Path) -> anyhow::Result<ProbedVideo> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()?;
    anyhow::ensure!(out.status.success(), "ffprobe failed");

    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    let streams = parsed["streams"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("no streams in ffprobe output"))?;
    let video = streams
        .iter()
        .find(|s| s["codec_type"] == "video")
        .ok_or_else(|| anyhow::anyhow!("no video stream"))?;

    Ok(ProbedVideo {
        duration_sec: parsed["format"]["duration"]
            .as_str()
            .and_then(|d| d.parse().ok())
            .unwrap_or(0.0),
        width: video["width"].as_u64().unwrap_or(0) as u32,
        height: video["height"].as_u64().unwrap_or(0) as u32,
        has_audio: streams.iter().any(|s| s["codec_type"] == "audio"),
    })
}

#[test]
fn slideshow_duration_tracks_surviving_frames() -> anyhow::Result<()> {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not available");
        return Ok(());
    }

    let scratch = tempfile::tempdir()?;
    let cfg = test_config();

    // Four payloads, one of them garbage: three frames survive, so the video
    // runs 3 x 2 = 6 seconds and the 2.5s track is looped and cut to match.
    let images = vec![
        png_base64(64, 48),
        "definitely-not-an-image".to_string(),
        png_base64(48, 64),
        format!("data:image/png;base64,{}", png_base64(108, 192)),
    ];
    let music = synth_music_base64(scratch.path(), 2.5)?;

    let video = render_slideshow(&cfg, &images, &music)?;

    // Progressive MP4: ftyp box right after the 4-byte size.
    assert_eq!(&video[4..8], b"ftyp");

    let out_path = scratch.path().join("out.mp4");
    std::fs::write(&out_path, &video)?;
    let probed = probe_video(&out_path)?;

    assert_eq!(probed.width, cfg.frame_width);
    assert_eq!(probed.height, cfg.frame_height);
    assert!(probed.has_audio);
    // One frame-tick of tolerance plus aac priming slack.
    assert!(
        (probed.duration_sec - 6.0).abs() < 0.25,
        "expected ~6s, got {}s",
        probed.duration_sec
    );

    Ok(())
}

#[test]
fn audio_longer_than_video_is_trimmed() -> anyhow::Result<()> {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not available");
        return Ok(());
    }

    let scratch = tempfile::tempdir()?;
    let cfg = test_config();

    let images = vec![png_base64(30, 40)];
    let music = synth_music_base64(scratch.path(), 10.0)?;

    let video = render_slideshow(&cfg, &images, &music)?;
    let out_path = scratch.path().join("out.mp4");
    std::fs::write(&out_path, &video)?;
    let probed = probe_video(&out_path)?;

    assert!(
        (probed.duration_sec - 2.0).abs() < 0.25,
        "expected ~2s, got {}s",
        probed.duration_sec
    );
    Ok(())
}

#[test]
fn undecodable_music_fails_the_job() -> anyhow::Result<()> {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not available");
        return Ok(());
    }

    let cfg = test_config();
    let images = vec![png_base64(8, 8)];
    // Valid base64, but the bytes are not audio.
    let music = base64::engine::general_purpose::STANDARD.encode(b"this is not an audio file");

    let err = render_slideshow(&cfg, &images, &music).unwrap_err();
    assert!(matches!(err, SlidereelError::Audio(_)));
    Ok(())
}
