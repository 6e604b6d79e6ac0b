use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("The uploaded image could not be decoded.")]
    UndecodableImage,
    #[error("Failed to re-encode the image: {0}")]
    EncodeFailed(String),
}

/// Sniffs the media type from magic bytes. `infer` does not know HEIC/HEIF
/// brands, so those are checked against the ftyp box first.
pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

/// Strips a `data:<mime>;base64,` prefix, returning the bare payload. Values
/// without a prefix pass through untouched.
pub fn strip_data_uri(value: &str) -> &str {
    if value.starts_with("data:") {
        value.splitn(2, ',').nth(1).unwrap_or("")
    } else {
        value
    }
}

/// Bounds the upload before it is sent upstream: images wider than
/// `max_width` are scaled down proportionally (height rounded to the nearest
/// pixel), then everything is re-encoded as JPEG at the given quality
/// regardless of the input format.
pub fn downscale_image(data: &[u8], max_width: u32, quality: u8) -> Result<Vec<u8>, MediaError> {
    let img = image::load_from_memory(data).map_err(|_| MediaError::UndecodableImage)?;

    let img = if img.width() > max_width {
        let height = (img.height() as f64 * max_width as f64 / img.width() as f64)
            .round()
            .max(1.0) as u32;
        img.resize_exact(max_width, height, FilterType::Lanczos3)
    } else {
        img
    };

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|err| MediaError::EncodeFailed(err.to_string()))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn wide_image_is_scaled_to_max_width() {
        let input = png_bytes(2000, 1000);
        let output = downscale_image(&input, 1024, 80).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.width(), 1024);
        // round(1000 * 1024 / 2000)
        assert_eq!(decoded.height(), 512);
    }

    #[test]
    fn scaled_height_rounds_to_nearest_pixel() {
        let input = png_bytes(1500, 1000);
        let output = downscale_image(&input, 1024, 80).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.width(), 1024);
        // round(1000 * 1024 / 1500) = round(682.67)
        assert_eq!(decoded.height(), 683);
    }

    #[test]
    fn narrow_image_keeps_its_dimensions() {
        let input = png_bytes(640, 480);
        let output = downscale_image(&input, 1024, 80).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.width(), 640);
        assert_eq!(decoded.height(), 480);
    }

    #[test]
    fn output_is_jpeg_regardless_of_input_format() {
        let output = downscale_image(&png_bytes(100, 100), 1024, 80).unwrap();
        assert_eq!(&output[0..2], &[0xFF, 0xD8]);
        assert_eq!(detect_mime_type(&output).as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn undecodable_input_is_rejected() {
        let result = downscale_image(b"definitely not an image", 1024, 80);
        assert!(matches!(result, Err(MediaError::UndecodableImage)));
    }

    #[test]
    fn strips_data_uri_prefix() {
        assert_eq!(strip_data_uri("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri("data:image/jpeg;base64,Zm9v"), "Zm9v");
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
    }
}
