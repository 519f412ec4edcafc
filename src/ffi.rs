//! C ABI.
//!
//! ```c
//! typedef void (*output_callback)(void *handle, const uint8_t *data, size_t len);
//!
//! int32_t register_output(void *handle, output_callback callback);
//! int32_t resize(const uint8_t *input, int32_t input_len, int32_t rows, int32_t cols);
//! ```
//!
//! Status codes are listed on [`Status`](crate::Status). The process keeps one
//! sink slot; `register_output` overwrites it and nothing ever clears it.
//! Both functions run inside a panic barrier, so no unwind crosses into the
//! caller.
//!
//! Calls are not meant to be concurrent. The slot sits behind a mutex that is
//! held only while the sink is read or replaced, never while an image is
//! processed or the callback runs.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, status_of};
use crate::pipeline::{Pipeline, borrow_input, panic_message};
use crate::sink::{OutputSink, SinkCallback, SinkState};
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static SINK: Mutex<Option<OutputSink<'static>>> = Mutex::new(None);

static PIPELINE: LazyLock<Pipeline> = LazyLock::new(|| Pipeline::new(BridgeConfig::default()));

fn sink_slot() -> MutexGuard<'static, Option<OutputSink<'static>>> {
    SINK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registration state of the process-wide sink.
pub fn sink_state() -> SinkState {
    SinkState::of(sink_slot().as_ref())
}

/// Run `f` behind a panic barrier and turn the outcome into a status code.
fn guarded(op: &str, f: impl FnOnce() -> Result<(), BridgeError>) -> i32 {
    let result = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let msg = panic_message(payload.as_ref());
        log::error!("{op} panicked: {msg}");
        Err(BridgeError::Pipeline(format!("{op} panicked: {msg}")))
    });
    if let Err(e) = &result {
        log::warn!("{op} failed ({}): {e}", e.status().code());
    }
    status_of(&result)
}

/// Store `handle` and `callback` as the process-wide output sink.
///
/// Returns `0`, or `-1` if either argument is null (nothing is stored).
///
/// # Safety
/// `callback` must accept `handle` and copy the bytes it is given before
/// returning. Both must stay valid until replaced by another registration.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn register_output(
    handle: *mut c_void,
    callback: Option<SinkCallback>,
) -> i32 {
    guarded("register_output", || {
        let sink = unsafe { OutputSink::from_raw(handle, callback) }?;
        *sink_slot() = Some(sink);
        log::debug!("registered output sink {handle:?}");
        Ok(())
    })
}

/// Decode `input`, resize it to `rows × cols`, encode it as JPEG and pass the
/// bytes to the registered callback.
///
/// Returns `0` on success, `-1` if no sink is registered, `-2` for invalid
/// arguments, `-3` if the bytes are not a decodable image and `-4` for any
/// other failure. The callback is only invoked on success.
///
/// # Safety
/// `input` must point at `input_len` readable bytes for the duration of the
/// call, or be null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn resize(input: *const u8, input_len: i32, rows: i32, cols: i32) -> i32 {
    guarded("resize", || {
        let sink = *sink_slot();
        let input = unsafe { borrow_input(input, input_len) };
        PIPELINE
            .deliver_resized(sink.as_ref(), input, rows, cols)
            .map(drop)
    })
}
