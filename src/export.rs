//! Flattened image export.
//!
//! Exports always composite the raster buffer over an opaque background so
//! that erased regions never come out transparent.

use crate::draw::{Color, RasterBuffer};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quality used when a caller passes a non-finite value.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Encoded image formats supported by [`export_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless
    #[serde(alias = "image/png")]
    Png,
    /// Lossy, quality-parameterized
    #[serde(alias = "jpg", alias = "image/jpeg")]
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

/// How the encoded bytes are handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEncoding {
    /// Raw encoded bytes.
    Blob,
    /// `data:<mime>;base64,<payload>` string.
    DataUrl,
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportedImage {
    Blob(Vec<u8>),
    DataUrl(String),
}

impl ExportedImage {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ExportedImage::Blob(bytes) => Some(bytes.as_slice()),
            ExportedImage::DataUrl(_) => None,
        }
    }

    pub fn as_data_url(&self) -> Option<&str> {
        match self {
            ExportedImage::Blob(_) => None,
            ExportedImage::DataUrl(url) => Some(url.as_str()),
        }
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Flattens `buffer` over `background` and encodes it.
///
/// `quality` ranges over 0.0..=1.0 and is clamped; it only affects lossy
/// formats.
pub fn export_image(
    buffer: &RasterBuffer,
    background: Color,
    format: ExportFormat,
    quality: f32,
    encoding: ExportEncoding,
) -> Result<ExportedImage, ExportError> {
    let bytes = encode_flattened(buffer, background, format, quality)?;
    Ok(match encoding {
        ExportEncoding::Blob => ExportedImage::Blob(bytes),
        ExportEncoding::DataUrl => ExportedImage::DataUrl(data_url(format, &bytes)),
    })
}

/// Flattens `buffer` over `background` and returns the encoded bytes.
pub fn encode_flattened(
    buffer: &RasterBuffer,
    background: Color,
    format: ExportFormat,
    quality: f32,
) -> Result<Vec<u8>, ExportError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySurface { width, height });
    }

    let bytes = encode(buffer.flatten_over(background), format, quality)?;
    log::debug!(
        "Exported {}x{} surface as {} ({} bytes)",
        width,
        height,
        format.mime_type(),
        bytes.len()
    );
    Ok(bytes)
}

/// Builds a `data:` URL for already-encoded bytes.
pub fn data_url(format: ExportFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Maps the 0.0..=1.0 quality scale onto the JPEG encoder's 1..=100.
pub fn jpeg_quality(quality: f32) -> u8 {
    let quality = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        DEFAULT_QUALITY
    };
    ((quality * 100.0).round() as u8).max(1)
}

fn encode(image: RgbaImage, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    let (width, height) = image.dimensions();
    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut out).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};
    use base64::Engine as _;

    #[test]
    fn png_blob_has_signature_and_is_opaque() {
        let buffer = RasterBuffer::new(4, 3);
        let exported =
            export_image(&buffer, WHITE, ExportFormat::Png, 1.0, ExportEncoding::Blob).unwrap();
        let bytes = exported.as_bytes().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn jpeg_data_url_has_prefix() {
        let buffer = RasterBuffer::filled(8, 8, BLACK);
        let exported = export_image(
            &buffer,
            WHITE,
            ExportFormat::Jpeg,
            0.5,
            ExportEncoding::DataUrl,
        )
        .unwrap();
        let url = exported.as_data_url().unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let payload = STANDARD
            .decode(&url["data:image/jpeg;base64,".len()..])
            .unwrap();
        assert_eq!(&payload[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn empty_surface_is_rejected() {
        let buffer = RasterBuffer::new(0, 10);
        let err = export_image(&buffer, WHITE, ExportFormat::Png, 1.0, ExportEncoding::Blob)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::EmptySurface {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn jpeg_quality_mapping_clamps() {
        assert_eq!(jpeg_quality(0.8), 80);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(7.0), 100);
        assert_eq!(jpeg_quality(f32::NAN), 80);
    }

    #[test]
    fn format_names_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: ExportFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"jpg\"").unwrap();
        assert_eq!(parsed.format, ExportFormat::Jpeg);
        let parsed: Wrapper = toml::from_str("format = \"image/png\"").unwrap();
        assert_eq!(parsed.format, ExportFormat::Png);
    }
}
