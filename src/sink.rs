//! Output sink: the caller's destination handle plus the callback that copies
//! encoded bytes into it.
//!
//! The bridge never owns the destination. An [`OutputSink`] only borrows it, for
//! `'a` when built from Rust and for as long as the foreign caller promises when
//! built from raw pointers.

use crate::error::BridgeError;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

/// Callback that receives the destination handle, a pointer to the encoded
/// bytes and their count. It must copy the bytes before returning; the buffer
/// is freed as soon as it does.
pub type SinkCallback = unsafe extern "C" fn(handle: *mut c_void, data: *const u8, len: usize);

/// Registration state of a sink slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    Unregistered,
    Registered,
}

impl SinkState {
    pub fn of(sink: Option<&OutputSink<'_>>) -> Self {
        match sink {
            Some(_) => SinkState::Registered,
            None => SinkState::Unregistered,
        }
    }
}

/// A registered destination handle and its callback. Both are always non-null.
#[derive(Clone, Copy)]
pub struct OutputSink<'a> {
    handle: NonNull<c_void>,
    callback: SinkCallback,
    _destination: PhantomData<&'a mut ()>,
}

// The handle is only dereferenced by the callback, which the registering
// caller vouched for; moving the pair between threads is up to that caller.
unsafe impl Send for OutputSink<'_> {}

impl std::fmt::Debug for OutputSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl OutputSink<'static> {
    /// Build a sink from foreign pointers, rejecting nulls.
    ///
    /// # Safety
    /// `callback` must be safe to call with `handle` and any byte slice for as
    /// long as the sink stays registered.
    pub unsafe fn from_raw(
        handle: *mut c_void,
        callback: Option<SinkCallback>,
    ) -> Result<Self, BridgeError> {
        let handle =
            NonNull::new(handle).ok_or(BridgeError::NullArgument("destination handle"))?;
        let callback = callback.ok_or(BridgeError::NullArgument("callback"))?;
        Ok(Self {
            handle,
            callback,
            _destination: PhantomData,
        })
    }
}

impl<'a> OutputSink<'a> {
    /// A sink that appends every delivery to `dest`.
    pub fn for_vec(dest: &'a mut Vec<u8>) -> Self {
        Self {
            handle: NonNull::from(dest).cast(),
            callback: extend_vec,
            _destination: PhantomData,
        }
    }

    pub fn handle(&self) -> *mut c_void {
        self.handle.as_ptr()
    }

    /// Hand `bytes` to the callback.
    pub(crate) fn deliver(&self, bytes: &[u8]) {
        // SAFETY: both pointers were checked non-null at construction and the
        // registering caller guaranteed the callback/handle pairing.
        unsafe { (self.callback)(self.handle.as_ptr(), bytes.as_ptr(), bytes.len()) }
    }
}

/// Appends `len` bytes at `data` to the `Vec<u8>` behind `dst`.
unsafe extern "C" fn extend_vec(dst: *mut c_void, data: *const u8, len: usize) {
    if dst.is_null() || data.is_null() || len == 0 {
        return;
    }
    // SAFETY: `dst` was produced by `for_vec` from a live `&mut Vec<u8>` and
    // `data` points at `len` initialised bytes for the duration of the call.
    unsafe {
        let input = slice::from_raw_parts(data, len);
        (*dst.cast::<Vec<u8>>()).extend_from_slice(input);
    }
}
