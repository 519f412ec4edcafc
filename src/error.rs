//! Boundary error type and the integer status codes it maps to.
//!
//! Every failure inside the bridge ends up as one [`BridgeError`]; the C ABI
//! only ever sees [`BridgeError::status`].

use crate::imaging::BackendError;
use thiserror::Error;

/// Status codes returned across the C ABI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    /// Sink not registered, or registration with a null argument.
    Configuration = -1,
    InvalidInput = -2,
    DecodeFailed = -3,
    PipelineFailure = -4,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("output sink is not registered")]
    SinkNotRegistered,
    #[error("registration requires a non-null {0}")]
    NullArgument(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("pipeline failure: {0}")]
    Pipeline(String),
}

impl BridgeError {
    pub fn status(&self) -> Status {
        match self {
            BridgeError::SinkNotRegistered | BridgeError::NullArgument(_) => Status::Configuration,
            BridgeError::InvalidInput(_) => Status::InvalidInput,
            BridgeError::Decode(_) => Status::DecodeFailed,
            BridgeError::Pipeline(_) => Status::PipelineFailure,
        }
    }
}

impl From<BackendError> for BridgeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decode(msg) => BridgeError::Decode(msg),
            other => BridgeError::Pipeline(other.to_string()),
        }
    }
}

/// Collapse a result into the status code handed to foreign callers.
pub fn status_of<T>(result: &Result<T, BridgeError>) -> i32 {
    match result {
        Ok(_) => Status::Ok.code(),
        Err(e) => e.status().code(),
    }
}
