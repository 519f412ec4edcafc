//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the library; no OpenCV, no system codecs.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::ImageReader::with_guessed_format` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Colour → luma | `image::DynamicImage::to_luma8` |
//! | Resize | `image::imageops::resize` with the configured filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend, ImageInfo};
use super::calculations::within_pixel_limit;
use super::params::{ColorMode, ResizeParams, TargetSize};
use image::codecs::jpeg::JpegEncoder;
use image::error::ImageError;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, imageops};
use std::io::Cursor;

/// Formats whose decoders are compiled in.
const DECODABLE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Tiff,
    ImageFormat::WebP,
];

/// Longest side a baseline JPEG can describe.
const MAX_JPEG_SIDE: u32 = u16::MAX as u32;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap the input in a reader with its format sniffed from content.
fn reader(data: &[u8]) -> Result<(ImageReader<Cursor<&[u8]>>, ImageFormat), BackendError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| BackendError::Decode(format!("Failed to read input: {e}")))?;
    let format = reader
        .format()
        .filter(|f| DECODABLE_FORMATS.contains(f))
        .ok_or_else(|| BackendError::Decode("Unrecognised image format".to_string()))?;
    Ok((reader, format))
}

fn classify(err: ImageError) -> BackendError {
    match err {
        ImageError::Limits(e) => BackendError::ResourceLimit(e.to_string()),
        ImageError::Encoding(e) => BackendError::Encode(e.to_string()),
        ImageError::Parameter(e) => BackendError::ProcessingFailed(e.to_string()),
        other => BackendError::Decode(other.to_string()),
    }
}

/// Refuse a resample whose buffers would not fit the pixel budget.
///
/// `imageops::resize` samples vertically first, into a `source.width × rows`
/// float buffer, then horizontally into the target. Every buffer along the
/// way must stay within `max_pixels`, and the target must be encodable.
fn check_resample_budget(
    source: Dimensions,
    size: TargetSize,
    max_pixels: u64,
) -> Result<(), BackendError> {
    if size.width > MAX_JPEG_SIDE || size.height > MAX_JPEG_SIDE {
        return Err(BackendError::ResourceLimit(format!(
            "{}x{} exceeds the JPEG side limit of {MAX_JPEG_SIDE}",
            size.width, size.height
        )));
    }
    let intermediate_rows = TargetSize {
        width: source.width,
        height: size.height,
    };
    let intermediate_cols = TargetSize {
        width: size.width,
        height: source.height,
    };
    for stage in [intermediate_rows, intermediate_cols, size] {
        if stage.pixels() > max_pixels {
            return Err(BackendError::ResourceLimit(format!(
                "resampling {}x{} to {}x{} needs a {}x{} buffer, over {max_pixels} pixels",
                source.width, source.height, size.width, size.height, stage.width, stage.height
            )));
        }
    }
    Ok(())
}

/// Decode to a three-channel colour image, refusing oversized work before
/// the full decode allocates anything.
fn load_image(data: &[u8], params: &ResizeParams) -> Result<DynamicImage, BackendError> {
    let info = identify_bytes(data)?;
    let Dimensions { width, height } = info.dimensions;
    if width == 0 || height == 0 {
        return Err(BackendError::Decode("Image has no pixels".to_string()));
    }
    let max_pixels = params.max_decoded_pixels;
    if !within_pixel_limit(width, height, max_pixels) {
        return Err(BackendError::ResourceLimit(format!(
            "{width}x{height} exceeds {max_pixels} decoded pixels"
        )));
    }
    check_resample_budget(info.dimensions, params.size, max_pixels)?;

    let (reader, _) = reader(data)?;
    let img = reader.decode().map_err(classify)?;
    Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
}

fn identify_bytes(data: &[u8]) -> Result<ImageInfo, BackendError> {
    let (reader, format) = reader(data)?;
    let (width, height) = reader.into_dimensions().map_err(classify)?;
    Ok(ImageInfo {
        format,
        dimensions: Dimensions { width, height },
    })
}

/// Resample into the target size and encode as JPEG.
fn resize_and_encode(img: &DynamicImage, params: &ResizeParams) -> Result<Vec<u8>, BackendError> {
    let (width, height) = (params.size.width, params.size.height);
    let filter = params.filter.filter_type();
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, params.quality.as_u8());

    match params.color {
        ColorMode::Color => {
            let resized = imageops::resize(&img.to_rgb8(), width, height, filter);
            encoder
                .write_image(resized.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(classify)?;
        }
        ColorMode::Grayscale => {
            let resized = imageops::resize(&img.to_luma8(), width, height, filter);
            encoder
                .write_image(resized.as_raw(), width, height, ExtendedColorType::L8)
                .map_err(classify)?;
        }
    }

    if out.is_empty() {
        return Err(BackendError::Encode("Encoder produced no bytes".to_string()));
    }
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn identify(&self, data: &[u8]) -> Result<ImageInfo, BackendError> {
        identify_bytes(data)
    }

    fn resize(&self, data: &[u8], params: &ResizeParams) -> Result<Vec<u8>, BackendError> {
        let img = load_image(data, params)?;
        log::debug!(
            "decoded {}x{}, resizing to {}x{} ({:?})",
            img.width(),
            img.height(),
            params.size.width,
            params.size.height,
            params.color
        );
        resize_and_encode(&img, params)
    }
}
