//! Raster encoding and decoding on top of the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{ExportError, PipelineResult};
use crate::format::ExportFormat;

/// Encode RGBA pixels.
///
/// `quality` is in `0.0..=1.0` and only affects JPEG; WebP is written
/// lossless and PNG ignores it. JPEG has no alpha channel, so pixels are
/// composited over `matte` first.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder rejects the image.
pub fn encode_rgba(
    image: &RgbaImage,
    format: ExportFormat,
    quality: f32,
    matte: [u8; 3],
) -> PipelineResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut buf = Cursor::new(Vec::new());

    let written = match format {
        ExportFormat::Png => {
            PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
                .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        }
        ExportFormat::Jpg => {
            let rgb = flatten_onto(image, matte);
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality)).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Webp => WebPEncoder::new_lossless(&mut buf).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };

    written.map_err(|e| ExportError::Encode(format!("{format} encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Decode any supported raster into RGBA pixels.
///
/// # Errors
///
/// Returns [`ExportError::Decode`] if the bytes are not a decodable image.
pub fn decode_rgba(bytes: &[u8]) -> PipelineResult<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| ExportError::Decode(format!("Failed to decode image: {e}")))
}

/// Decode any supported raster and re-encode it as PNG.
///
/// # Errors
///
/// Returns an error if decoding or encoding fails.
pub fn reencode_as_png(bytes: &[u8]) -> PipelineResult<Vec<u8>> {
    let image = decode_rgba(bytes)?;
    encode_rgba(&image, ExportFormat::Png, 1.0, [255, 255, 255])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Alpha-composite RGBA pixels over an opaque matte, producing RGB bytes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn flatten_onto(image: &RgbaImage, matte: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.as_raw().len() / 4 * 3);
    for pixel in image.as_raw().chunks_exact(4) {
        let alpha = f32::from(pixel[3]) / 255.0;
        let inv = 1.0 - alpha;
        for channel in 0..3 {
            let blended = f32::from(pixel[channel]).mul_add(alpha, f32::from(matte[channel]) * inv);
            rgb.push(blended.round() as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, 128, if x % 2 == 0 { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_png_round_trip_keeps_pixels() {
        let image = sample(8, 4);
        let png = encode_rgba(&image, ExportFormat::Png, 1.0, [255, 255, 255]).expect("png");
        assert_eq!(ExportFormat::from_magic_bytes(&png), Some(ExportFormat::Png));
        assert_eq!(decode_rgba(&png).expect("decode"), image);
    }

    #[test]
    fn test_jpeg_magic_and_size() {
        let jpeg =
            encode_rgba(&sample(16, 16), ExportFormat::Jpg, 0.8, [255, 255, 255]).expect("jpg");
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(decode_rgba(&jpeg).expect("decode").dimensions(), (16, 16));
    }

    #[test]
    fn test_webp_magic() {
        let webp = encode_rgba(&sample(4, 4), ExportFormat::Webp, 0.9, [0, 0, 0]).expect("webp");
        assert_eq!(ExportFormat::from_magic_bytes(&webp), Some(ExportFormat::Webp));
    }

    #[test]
    fn test_flatten_transparent_pixel_takes_matte() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 0]));
        assert_eq!(flatten_onto(&image, [200, 100, 50]), vec![200, 100, 50]);

        let opaque = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        assert_eq!(flatten_onto(&opaque, [200, 100, 50]), vec![10, 20, 30]);
    }

    #[test]
    fn test_jpeg_quality_clamped() {
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.92), 92);
        assert_eq!(jpeg_quality(1.5), 100);
    }

    #[test]
    fn test_reencode_jpeg_as_png() {
        let jpeg =
            encode_rgba(&sample(8, 8), ExportFormat::Jpg, 0.9, [255, 255, 255]).expect("jpg");
        let png = reencode_as_png(&jpeg).expect("png");
        assert_eq!(ExportFormat::from_magic_bytes(&png), Some(ExportFormat::Png));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode_rgba(b"not an image"), Err(ExportError::Decode(_))));
    }
}
