//! Shared test utilities for the image-bridge test suite.
//!
//! Provides in-memory image fixtures and a recording sink callback.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let mut recorder = Recorder::default();
//! let mut bridge = Bridge::new();
//! unsafe { bridge.register_raw(recorder.handle(), Some(Recorder::callback)) }.unwrap();
//!
//! bridge.resize(&encode_test_jpeg(4, 4), 2, 2).unwrap();
//! assert_eq!(recorder.calls, 1);
//! ```

use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::ffi::c_void;

// =========================================================================
// Image fixtures
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// A small valid JPEG with the given dimensions.
pub fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// A small valid PNG with the given dimensions.
pub fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&gradient(width, height))
}

/// A PNG filled with pure red.
pub fn solid_red_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&RgbImage::from_pixel(width, height, image::Rgb([255, 0, 0])))
}

/// A small valid TIFF with the given dimensions.
pub fn encode_test_tiff(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut out = std::io::Cursor::new(Vec::new());
    image::codecs::tiff::TiffEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out.into_inner()
}

fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Bytes no decoder recognises.
pub fn garbage_bytes() -> Vec<u8> {
    b"this is not an image, just some text pretending".to_vec()
}

// =========================================================================
// Recording sink
// =========================================================================

/// Destination that counts deliveries and keeps every byte it receives.
#[derive(Default, Debug)]
pub struct Recorder {
    pub calls: usize,
    pub bytes: Vec<u8>,
}

impl Recorder {
    pub fn handle(&mut self) -> *mut c_void {
        (self as *mut Self).cast()
    }

    /// # Safety
    /// `handle` must come from [`Recorder::handle`] on a live recorder.
    pub unsafe extern "C" fn callback(handle: *mut c_void, data: *const u8, len: usize) {
        let recorder = unsafe { &mut *handle.cast::<Recorder>() };
        recorder.calls += 1;
        if !data.is_null() && len > 0 {
            recorder
                .bytes
                .extend_from_slice(unsafe { std::slice::from_raw_parts(data, len) });
        }
    }
}
