//! The resize pipeline.
//!
//! ```text
//! sink check → input check → decode → resize → encode → deliver
//! ```
//!
//! Each stage aborts the rest on failure, and nothing reaches the sink unless
//! every earlier stage succeeded. Panics raised by the imaging code are caught
//! here and reported as [`BridgeError::Pipeline`].

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::imaging::{ImageBackend, RustBackend, TargetSize, target_size};
use crate::sink::OutputSink;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Decode → resize → encode over a backend, under one configuration.
pub struct Pipeline<B: ImageBackend = RustBackend> {
    backend: B,
    config: BridgeConfig,
}

impl Pipeline<RustBackend> {
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_backend(RustBackend::new(), config)
    }
}

impl Default for Pipeline<RustBackend> {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl<B: ImageBackend> Pipeline<B> {
    pub fn with_backend(backend: B, config: BridgeConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Check the input buffer and requested dimensions.
    ///
    /// Malformed arguments are [`BridgeError::InvalidInput`]; well-formed
    /// requests that exceed a configured limit are [`BridgeError::Pipeline`].
    pub fn validate(&self, input: &[u8], rows: i32, cols: i32) -> Result<TargetSize, BridgeError> {
        if input.is_empty() {
            return Err(BridgeError::InvalidInput("empty input buffer".into()));
        }
        let size = target_size(rows, cols).ok_or_else(|| {
            BridgeError::InvalidInput(format!("target {rows}x{cols} must be positive"))
        })?;

        let limits = &self.config.limits;
        if input.len() > limits.max_input_bytes {
            return Err(BridgeError::Pipeline(format!(
                "input of {} bytes exceeds {} byte limit",
                input.len(),
                limits.max_input_bytes
            )));
        }
        if size.pixels() > limits.max_output_pixels {
            return Err(BridgeError::Pipeline(format!(
                "target {rows}x{cols} exceeds {} output pixels",
                limits.max_output_pixels
            )));
        }
        Ok(size)
    }

    /// Decode, resize and encode. Panics inside the backend become
    /// [`BridgeError::Pipeline`].
    pub fn process(&self, input: &[u8], size: TargetSize) -> Result<Vec<u8>, BridgeError> {
        let params = self.config.resize_params(size);
        match panic::catch_unwind(AssertUnwindSafe(|| self.backend.resize(input, &params))) {
            Ok(result) => Ok(result?),
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                log::error!("imaging panicked: {msg}");
                Err(BridgeError::Pipeline(format!("imaging panicked: {msg}")))
            }
        }
    }

    /// Run every stage and hand the JPEG bytes to `sink`.
    ///
    /// `input` is `None` when the caller passed a null pointer or a
    /// non-positive length. Returns the number of bytes delivered.
    pub fn deliver_resized(
        &self,
        sink: Option<&OutputSink<'_>>,
        input: Option<&[u8]>,
        rows: i32,
        cols: i32,
    ) -> Result<usize, BridgeError> {
        let sink = sink.ok_or(BridgeError::SinkNotRegistered)?;
        let input = input
            .ok_or_else(|| BridgeError::InvalidInput("null or empty input buffer".into()))?;
        let size = self.validate(input, rows, cols)?;

        log::debug!(
            "resizing {} input bytes to {}x{}",
            input.len(),
            size.width,
            size.height
        );
        let encoded = self.process(input, size)?;

        sink.deliver(&encoded);
        log::debug!("delivered {} bytes", encoded.len());
        Ok(encoded.len())
    }
}

/// Borrow a foreign buffer; `None` for a null pointer or a length of zero or less.
///
/// # Safety
/// When `ptr` is non-null and `len` positive, `ptr` must point at `len`
/// readable bytes that stay valid and unmodified for `'a`.
pub unsafe fn borrow_input<'a>(ptr: *const u8, len: i32) -> Option<&'a [u8]> {
    if ptr.is_null() || len <= 0 {
        return None;
    }
    // SAFETY: non-null and positive length checked above; validity is the
    // caller's contract.
    Some(unsafe { std::slice::from_raw_parts(ptr, len as usize) })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
