use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::RgbImage;

use crate::error::SlidereelResult;

const JPEG_QUALITY: u8 = 85;

/// Scaled dimensions for fitting `src` inside `dst` without distortion.
///
/// The image is scaled so that one axis matches the target exactly and the
/// other fits inside it; the remainder is padding. Rounded, clamped to the
/// target on the matched axis and to 1px minimum on the other.
pub fn fit_dimensions(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    let img_ratio = f64::from(src_w) / f64::from(src_h);
    let target_ratio = f64::from(dst_w) / f64::from(dst_h);

    if img_ratio > target_ratio {
        // Relatively wider than the target: width fills, height letterboxes.
        let new_h = (f64::from(dst_w) / img_ratio).round() as u32;
        (dst_w, new_h.clamp(1, dst_h))
    } else {
        // Relatively taller (or equal): height fills, width pillarboxes.
        let new_w = (f64::from(dst_h) * img_ratio).round() as u32;
        (new_w.clamp(1, dst_w), dst_h)
    }
}

/// Resize `src` to fit `dst_w x dst_h` preserving aspect ratio, centered on
/// a black canvas of exactly the target dimensions.
pub fn compose_frame(src: &RgbImage, dst_w: u32, dst_h: u32) -> RgbImage {
    let (scaled_w, scaled_h) = fit_dimensions(src.width(), src.height(), dst_w, dst_h);
    let scaled = image::imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);

    let mut canvas = RgbImage::from_pixel(dst_w, dst_h, image::Rgb([0, 0, 0]));
    let x_offset = i64::from((dst_w - scaled_w) / 2);
    let y_offset = i64::from((dst_h - scaled_h) / 2);
    image::imageops::replace(&mut canvas, &scaled, x_offset, y_offset);
    canvas
}

/// Persist a composited frame as JPEG at the path the assembler will read.
///
/// Failures here are filesystem faults, not decode faults; they carry their
/// own message shape and the caller applies the per-image skip policy.
pub fn save_frame_jpeg(frame: &RgbImage, path: &Path) -> SlidereelResult<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder
        .encode_image(frame)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
