use anyhow::Context as _;
use base64::Engine as _;
use image::RgbImage;

use crate::error::{SlidereelError, SlidereelResult};

/// Strip a `data:...;base64,` header if one is present.
///
/// Payloads arrive either as bare base64 or as a full data URI; we split on
/// the first comma and keep the remainder. A string without a comma is
/// treated as bare base64.
pub fn strip_data_uri(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((header, rest)) if header.starts_with("data:") => rest,
        _ => payload,
    }
}

/// Decode a base64 payload (optionally data-URI-prefixed) into raw bytes.
///
/// Error classification is up to the caller: images map this to
/// `ImageDecode`, the music track maps it to `Audio`.
pub fn decode_base64(payload: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = strip_data_uri(payload.trim());
    base64::engine::general_purpose::STANDARD
        .decode(trimmed)
        .context("invalid base64 payload")
}

/// Decode a base64 image payload into an RGB bitmap.
///
/// Alpha and palette modes are normalized to RGB8; alpha is dropped.
pub fn decode_image(payload: &str) -> SlidereelResult<RgbImage> {
    let bytes =
        decode_base64(payload).map_err(|e| SlidereelError::image_decode(format!("{e:#}")))?;
    let dyn_img = image::load_from_memory(&bytes)
        .map_err(|e| SlidereelError::image_decode(format!("unrecognized image data: {e}")))?;
    Ok(dyn_img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use base64::Engine as _;

    use super::*;

    fn png_base64(width: u32, height: u32) -> String {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        base64::engine::general_purpose::STANDARD.encode(&buf)
    }

    #[test]
    fn strips_data_uri_header_only_when_present() {
        assert_eq!(strip_data_uri("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_uri("QUJD"), "QUJD");
        // A comma inside plain base64-ish input without a data: header stays put.
        assert_eq!(strip_data_uri("QU,JD"), "QU,JD");
    }

    #[test]
    fn decode_image_bare_and_prefixed() {
        let b64 = png_base64(3, 2);
        let img = decode_image(&b64).unwrap();
        assert_eq!(img.dimensions(), (3, 2));

        let prefixed = format!("data:image/png;base64,{b64}");
        let img = decode_image(&prefixed).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
    }

    #[test]
    fn decode_image_drops_alpha() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 128]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);

        let rgb = decode_image(&b64).unwrap();
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([200, 100, 50]));
    }

    #[test]
    fn decode_image_rejects_garbage() {
        assert!(matches!(
            decode_image("not base64!!!"),
            Err(SlidereelError::ImageDecode(_))
        ));

        let b64 = base64::engine::general_purpose::STANDARD.encode(b"definitely not an image");
        assert!(matches!(
            decode_image(&b64),
            Err(SlidereelError::ImageDecode(_))
        ));
    }
}
