//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::TargetSize;

/// Convert caller-supplied rows/cols into a target size.
///
/// Returns `None` if either dimension is zero or negative.
///
/// # Examples
/// ```
/// # use image_bridge::imaging::target_size;
/// let size = target_size(2, 3).unwrap();
/// assert_eq!((size.width, size.height), (3, 2));
///
/// assert!(target_size(0, 3).is_none());
/// assert!(target_size(2, -1).is_none());
/// ```
pub fn target_size(rows: i32, cols: i32) -> Option<TargetSize> {
    let height = u32::try_from(rows).ok().filter(|&h| h > 0)?;
    let width = u32::try_from(cols).ok().filter(|&w| w > 0)?;
    Some(TargetSize { width, height })
}

/// Whether `width × height` stays within `max_pixels`.
pub fn within_pixel_limit(width: u32, height: u32, max_pixels: u64) -> bool {
    (width as u64)
        .checked_mul(height as u64)
        .is_some_and(|pixels| pixels <= max_pixels)
}

/// Calculate dimensions that fit inside a bounding box while keeping the
/// source aspect ratio.
///
/// One dimension matches the box exactly, the other is smaller or equal.
/// Neither result dimension is ever zero.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bound` - Bounding box dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fit dimensions
pub fn calculate_fit_dimensions(source: (u32, u32), bound: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bound;

    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }

    let src_aspect = src_w as f64 / src_h as f64;
    let box_aspect = max_w as f64 / max_h as f64;

    if src_aspect > box_aspect {
        // Source is wider: width matches, height shrinks
        let w = max_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(1))
    } else {
        // Source is taller: height matches, width shrinks
        let h = max_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(1), h)
    }
}
