//! Image processing — pure Rust, in memory.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resize → JPEG** | `imageops::resize` (bilinear by default) + `JpegEncoder` |
//! | **Preview** | exact 100×100 box, or fit-inside with `keep_aspect` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, ImageInfo};
pub use calculations::{target_size, within_pixel_limit};
pub use operations::{create_preview, get_dimensions, is_supported_format};
pub use params::{ColorMode, Filter, Quality, ResizeParams, TargetSize};
pub use rust_backend::RustBackend;
