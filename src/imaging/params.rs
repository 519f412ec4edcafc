//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`pipeline`](crate::pipeline) (which validates the
//! caller's request) and the [`backend`](super::backend) (which does the actual
//! pixel work). This separation allows swapping backends (e.g. for testing
//! with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 95). Clamped on construction.
//! - [`Filter`] — Interpolation kernel used for resampling (default bilinear).
//! - [`ColorMode`] — Whether the output keeps colour or is reduced to one luma channel.
//! - [`TargetSize`] — Validated output dimensions.
//! - [`ResizeParams`] — Full specification for one decode → resize → encode pass.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Quality as the encoder expects it.
    pub fn as_u8(self) -> u8 {
        self.0.clamp(1, 100) as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Resampling kernel.
///
/// The exact kernel is not part of the output contract; only the output
/// dimensions are. `Triangle` is bilinear interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl Filter {
    pub fn filter_type(self) -> FilterType {
        match self {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Channel layout of the resized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Three-channel RGB output.
    #[default]
    Color,
    /// Single 8-bit luma channel; colour is converted before resampling.
    Grayscale,
}

/// Output dimensions after validation. `width` is columns, `height` is rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn pixels(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Parameters for a single resize pass over an in-memory image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeParams {
    pub size: TargetSize,
    pub quality: Quality,
    pub filter: Filter,
    pub color: ColorMode,
    /// Upper bound on decoded pixels, checked against the header before decode.
    pub max_decoded_pixels: u64,
}
