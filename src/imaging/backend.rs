//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and resize. Both work on in-memory encoded bytes; nothing
//! touches the filesystem.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, no system
//! libraries. Everything is statically linked into the shared library.

use super::params::ResizeParams;
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Input bytes are not a recognised or well-formed image.
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Resource limit exceeded: {0}")]
    ResourceLimit(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Header-level facts about an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub dimensions: Dimensions,
}

/// Trait for image processing backends.
///
/// Every backend must implement both operations so the pipeline stays
/// backend-agnostic.
pub trait ImageBackend {
    /// Sniff the format and read dimensions without a full decode.
    fn identify(&self, data: &[u8]) -> Result<ImageInfo, BackendError>;

    /// Decode `data`, resample to `params.size` and return JPEG bytes.
    fn resize(&self, data: &[u8], params: &ResizeParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{ColorMode, Filter, Quality, TargetSize};
    use std::sync::Mutex;

    /// What the mock should do when `resize` is called.
    #[derive(Debug, Clone, Default)]
    pub enum MockOutcome {
        /// Return these bytes.
        Bytes(Vec<u8>),
        /// Return a decode error.
        DecodeError,
        /// Return an encode error.
        EncodeError,
        /// Panic inside the backend.
        Panic,
        /// Return a fixed 4-byte payload.
        #[default]
        Default,
    }

    /// Mock backend that records operations without decoding anything.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<ImageInfo>>,
        pub outcome: MockOutcome,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(usize),
        Resize {
            input_len: usize,
            width: u32,
            height: u32,
            quality: u32,
            color: ColorMode,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_outcome(outcome: MockOutcome) -> Self {
            Self {
                outcome,
                ..Self::default()
            }
        }

        pub fn with_info(info: Vec<ImageInfo>) -> Self {
            Self {
                identify_results: Mutex::new(info),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, data: &[u8]) -> Result<ImageInfo, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(data.len()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::Decode("No mock image info".to_string()))
        }

        fn resize(&self, data: &[u8], params: &ResizeParams) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                input_len: data.len(),
                width: params.size.width,
                height: params.size.height,
                quality: params.quality.value(),
                color: params.color,
            });
            match &self.outcome {
                MockOutcome::Bytes(bytes) => Ok(bytes.clone()),
                MockOutcome::DecodeError => Err(BackendError::Decode("mock".to_string())),
                MockOutcome::EncodeError => Err(BackendError::Encode("mock".to_string())),
                MockOutcome::Panic => panic!("mock backend panic"),
                MockOutcome::Default => Ok(vec![0xFF, 0xD8, 0xFF, 0xD9]),
            }
        }
    }

    pub fn params(width: u32, height: u32) -> ResizeParams {
        ResizeParams {
            size: TargetSize { width, height },
            quality: Quality::default(),
            filter: Filter::default(),
            color: ColorMode::default(),
            max_decoded_pixels: u64::MAX,
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_info(vec![ImageInfo {
            format: ImageFormat::Png,
            dimensions: Dimensions {
                width: 800,
                height: 600,
            },
        }]);

        let result = backend.identify(&[1, 2, 3]).unwrap();
        assert_eq!(result.dimensions.width, 800);
        assert_eq!(result.format, ImageFormat::Png);

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Identify(3)]);
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        let out = backend.resize(&[0; 10], &params(20, 10)).unwrap();
        assert_eq!(out, vec![0xFF, 0xD8, 0xFF, 0xD9]);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                input_len: 10,
                width: 20,
                height: 10,
                quality: 95,
                ..
            }
        ));
    }

    #[test]
    fn mock_identify_without_results_errors() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.identify(&[]),
            Err(BackendError::Decode(_))
        ));
    }
}
