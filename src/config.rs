//! Bridge configuration module.
//!
//! Handles loading and validating `config.toml` files. The C ABI always runs
//! with the stock defaults; config files are read only by the CLI and by Rust
//! callers who build their own [`Bridge`](crate::Bridge).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 95                   # JPEG quality (0-100)
//!
//! [resize]
//! filter = "triangle"            # nearest | triangle | catmullrom | gaussian | lanczos3
//! color = "color"                # color | grayscale
//!
//! [limits]
//! max_input_bytes = 67108864     # Largest accepted encoded input
//! max_decoded_pixels = 100000000 # Largest source image or resample buffer
//! max_output_pixels = 100000000  # Largest accepted rows x cols
//!
//! [preview]
//! width = 100
//! height = 100
//! keep_aspect = false            # true = fit inside the box instead of stretching
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{ColorMode, Filter, Quality, ResizeParams, TargetSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Bridge configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// JPEG encoder settings.
    pub output: OutputConfig,
    /// Resampling settings.
    pub resize: ResizeConfig,
    /// Resource limits applied before any pixel work.
    pub limits: LimitsConfig,
    /// Preview generation settings.
    pub preview: PreviewConfig,
}

impl BridgeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 0-100".into(),
            ));
        }
        if self.limits.max_input_bytes == 0 {
            return Err(ConfigError::Validation(
                "limits.max_input_bytes must be non-zero".into(),
            ));
        }
        if self.limits.max_decoded_pixels == 0 || self.limits.max_output_pixels == 0 {
            return Err(ConfigError::Validation(
                "limits pixel counts must be non-zero".into(),
            ));
        }
        if self.preview.width == 0 || self.preview.height == 0 {
            return Err(ConfigError::Validation(
                "preview dimensions must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Resize parameters for `size` under this configuration.
    pub fn resize_params(&self, size: TargetSize) -> ResizeParams {
        ResizeParams {
            size,
            quality: Quality::new(self.output.quality),
            filter: self.resize.filter,
            color: self.resize.color,
            max_decoded_pixels: self.limits.max_decoded_pixels,
        }
    }
}

/// JPEG encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Quality 0-100; 0 is clamped up to 1 at encode time.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

/// Resampling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: Filter,
    pub color: ColorMode,
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_input_bytes: usize,
    pub max_decoded_pixels: u64,
    pub max_output_pixels: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 64 * 1024 * 1024,
            max_decoded_pixels: 100_000_000,
            max_output_pixels: 100_000_000,
        }
    }
}

/// Preview generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
    pub keep_aspect: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            keep_aspect: false,
        }
    }
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<BridgeConfig, ConfigError> {
    let config: BridgeConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// User values are laid over the stock defaults, unknown keys are rejected,
/// and the result is validated.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-bridge configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

[output]
# JPEG quality, 0-100.
quality = 95

[resize]
# Resampling kernel: nearest, triangle (bilinear), catmullrom, gaussian, lanczos3.
filter = "triangle"
# "color" keeps RGB; "grayscale" converts to one luma channel before resizing.
color = "color"

[limits]
# Encoded inputs larger than this are refused before decoding.
max_input_bytes = 67108864
# Source images, and every resample buffer, must stay within this many pixels.
max_decoded_pixels = 100000000
# Requested rows x cols larger than this are refused before decoding.
max_output_pixels = 100000000

[preview]
width = 100
height = 100
# false stretches to exactly width x height; true fits inside the box.
keep_aspect = false
"##
}
