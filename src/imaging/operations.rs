//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_fit_dimensions;
use super::params::{ResizeParams, TargetSize};
use crate::config::BridgeConfig;
use image::ImageFormat;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, data: &[u8]) -> Result<(u32, u32)> {
    let info = backend.identify(data)?;
    Ok((info.dimensions.width, info.dimensions.height))
}

/// Whether `data` is JPEG or PNG content.
///
/// Only these two formats are accepted for previews; the resize pipeline
/// itself decodes a wider set.
pub fn is_supported_format(data: &[u8]) -> bool {
    matches!(
        image::guess_format(data),
        Ok(ImageFormat::Jpeg | ImageFormat::Png)
    )
}

/// Plan a preview operation without executing it.
///
/// With `keep_aspect` off the preview is exactly the configured box; with it
/// on, the source is scaled to fit inside the box.
pub fn plan_preview(source_dims: (u32, u32), config: &BridgeConfig) -> ResizeParams {
    let bound = (config.preview.width, config.preview.height);
    let (width, height) = if config.preview.keep_aspect {
        calculate_fit_dimensions(source_dims, bound)
    } else {
        bound
    };

    config.resize_params(TargetSize { width, height })
}

/// Create a JPEG preview of `data`.
///
/// Rejects anything that is not JPEG or PNG before touching the backend.
pub fn create_preview(
    backend: &impl ImageBackend,
    data: &[u8],
    config: &BridgeConfig,
) -> Result<Vec<u8>> {
    if !is_supported_format(data) {
        return Err(BackendError::Decode(
            "Previews require JPEG or PNG input".to_string(),
        ));
    }
    let dims = get_dimensions(backend, data)?;
    let params = plan_preview(dims, config);
    backend.resize(data, &params)
}
