//! Normalizes uploaded images before transmission to the model: EXIF
//! orientation applied, width bounded, re-encoded as JPEG. Deterministic
//! for identical input bytes.

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::domain::EncodedImage;

pub const MAX_WIDTH: u32 = 1_400;
pub const JPEG_QUALITY: u8 = 80;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("unreadable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decodes an uploaded image, corrects EXIF orientation, downsizes to at
/// most [`MAX_WIDTH`] px wide (never upscales), and re-encodes as JPEG at
/// quality [`JPEG_QUALITY`].
pub fn normalize_image(data: &[u8]) -> Result<EncodedImage, NormalizeError> {
    let decoded = image::load_from_memory(data)?;
    let oriented = apply_exif_orientation(data, decoded);
    encode_normalized(oriented)
}

/// Resize-and-encode tail shared with the page renderer, whose rasterized
/// pages carry no EXIF.
pub(super) fn encode_normalized(image: DynamicImage) -> Result<EncodedImage, NormalizeError> {
    let image = bound_width(image);

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    Ok(EncodedImage::new("image/jpeg", bytes))
}

fn bound_width(image: DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width <= MAX_WIDTH {
        return image;
    }
    let scaled_height = ((height as u64 * MAX_WIDTH as u64) / width as u64).max(1) as u32;
    image.resize(MAX_WIDTH, scaled_height, FilterType::Lanczos3)
}

/// EXIF orientation tag 274; value 1 (or anything unreadable) is a no-op.
fn apply_exif_orientation(data: &[u8], image: DynamicImage) -> DynamicImage {
    let orientation = exif::Reader::new()
        .read_from_container(&mut Cursor::new(data))
        .ok()
        .and_then(|meta| {
            meta.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1);

    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([10, 120, 200, 255]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn small_image_is_reencoded_without_resizing() {
        let normalized = normalize_image(&png_bytes(100, 60)).unwrap();
        assert_eq!(normalized.mime, "image/jpeg");
        let decoded = image::load_from_memory(&normalized.bytes).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 60);
    }

    #[test]
    fn wide_image_is_bounded_to_max_width() {
        let normalized = normalize_image(&png_bytes(2800, 1000)).unwrap();
        let decoded = image::load_from_memory(&normalized.bytes).unwrap();
        assert_eq!(decoded.width(), MAX_WIDTH);
        assert_eq!(decoded.height(), 500);
    }

    #[test]
    fn normalization_is_deterministic() {
        let input = png_bytes(300, 200);
        assert_eq!(normalize_image(&input).unwrap(), normalize_image(&input).unwrap());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(normalize_image(b"not an image").is_err());
    }
}
