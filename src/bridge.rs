//! Explicit bridge context: one sink slot plus one pipeline.
//!
//! Rust callers build a [`Bridge`] and pass it around instead of sharing
//! process-wide state. The C ABI in [`ffi`](crate::ffi) keeps a single global
//! sink for compatibility with existing foreign callers.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::imaging::{ImageBackend, RustBackend};
use crate::pipeline::{Pipeline, borrow_input};
use crate::sink::{OutputSink, SinkCallback, SinkState};
use std::ffi::c_void;

pub struct Bridge<'s, B: ImageBackend = RustBackend> {
    sink: Option<OutputSink<'s>>,
    pipeline: Pipeline<B>,
}

impl<'s> Bridge<'s, RustBackend> {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self::with_backend(RustBackend::new(), config)
    }
}

impl Default for Bridge<'_, RustBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, B: ImageBackend> Bridge<'s, B> {
    pub fn with_backend(backend: B, config: BridgeConfig) -> Self {
        Self {
            sink: None,
            pipeline: Pipeline::with_backend(backend, config),
        }
    }

    /// Register `sink`, replacing any earlier registration.
    pub fn register(&mut self, sink: OutputSink<'s>) {
        if self.sink.is_some() {
            log::debug!("replacing registered sink with {:?}", sink.handle());
        }
        self.sink = Some(sink);
    }

    /// Register foreign pointers. Nothing changes if either is null.
    ///
    /// # Safety
    /// See [`OutputSink::from_raw`].
    pub unsafe fn register_raw(
        &mut self,
        handle: *mut c_void,
        callback: Option<SinkCallback>,
    ) -> Result<(), BridgeError> {
        let sink = unsafe { OutputSink::from_raw(handle, callback) }?;
        self.register(sink);
        Ok(())
    }

    pub fn state(&self) -> SinkState {
        SinkState::of(self.sink.as_ref())
    }

    pub fn is_registered(&self) -> bool {
        self.state() == SinkState::Registered
    }

    /// Resize `input` to `rows × cols` and deliver the JPEG to the registered
    /// sink. Returns the number of bytes delivered.
    pub fn resize(&self, input: &[u8], rows: i32, cols: i32) -> Result<usize, BridgeError> {
        self.pipeline
            .deliver_resized(self.sink.as_ref(), Some(input), rows, cols)
    }

    /// Like [`resize`](Self::resize) but over a foreign buffer.
    ///
    /// # Safety
    /// See [`borrow_input`].
    pub unsafe fn resize_raw(
        &self,
        input: *const u8,
        input_len: i32,
        rows: i32,
        cols: i32,
    ) -> Result<usize, BridgeError> {
        let input = unsafe { borrow_input(input, input_len) };
        self.pipeline
            .deliver_resized(self.sink.as_ref(), input, rows, cols)
    }
}

/// Resize `input` to `rows × cols` and return the JPEG bytes.
pub fn resize_image(
    input: &[u8],
    rows: u32,
    cols: u32,
    config: &BridgeConfig,
) -> Result<Vec<u8>, BridgeError> {
    let rows = i32::try_from(rows)
        .map_err(|_| BridgeError::InvalidInput(format!("{rows} rows out of range")))?;
    let cols = i32::try_from(cols)
        .map_err(|_| BridgeError::InvalidInput(format!("{cols} cols out of range")))?;

    let mut out = Vec::new();
    let mut bridge = Bridge::with_config(config.clone());
    bridge.register(OutputSink::for_vec(&mut out));
    bridge.resize(input, rows, cols)?;
    drop(bridge);
    Ok(out)
}
