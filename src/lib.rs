//! # Image Bridge
//!
//! Decode an encoded image, resize it, re-encode it as JPEG, and hand the bytes
//! back to a foreign caller through a registered callback.
//!
//! # Protocol
//!
//! ```text
//! register_output(handle, callback)        once, or again to replace the sink
//! resize(bytes, len, rows, cols)           any number of times
//!   └─ callback(handle, jpeg_ptr, jpeg_len) exactly once per successful call
//! ```
//!
//! The caller owns the destination handle; the bridge only borrows it. The
//! JPEG buffer handed to the callback is freed as soon as the callback returns,
//! so the callback must copy it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ffi`] | `extern "C"` entry points, process-wide sink, panic barrier |
//! | [`bridge`] | [`Bridge`] context object for Rust callers |
//! | [`pipeline`] | Stage ordering: sink check → input check → decode → resize → encode → deliver |
//! | [`sink`] | [`OutputSink`]: destination handle + callback |
//! | [`imaging`] | Pure-Rust decode/resize/encode behind the [`ImageBackend`](imaging::ImageBackend) trait |
//! | [`config`] | `config.toml` loading and validation |
//! | [`error`] | [`BridgeError`] and the integer [`Status`] codes |
//!
//! # Design Decisions
//!
//! ## Colour Is Kept By Default
//!
//! The output is three-channel unless `resize.color = "grayscale"` is
//! configured, in which case the decoded image is converted to one luma
//! channel before resampling.
//!
//! ## No Global State For Rust Callers
//!
//! Only the C ABI keeps a process-wide sink. Rust code owns a [`Bridge`] whose
//! sink lifetime is checked by the borrow checker.

pub mod bridge;
pub mod config;
pub mod error;
pub mod ffi;
pub mod imaging;
pub mod pipeline;
pub mod sink;

pub use bridge::{Bridge, resize_image};
pub use config::BridgeConfig;
pub use error::{BridgeError, Status};
pub use sink::{OutputSink, SinkCallback, SinkState};

#[cfg(test)]
pub(crate) mod test_helpers;
