//! Test-only scaffolding shared across this crate's unit tests.
//!
//! Kept separate from `#[cfg(test)]` inline modules because several of them (the fake
//! host sink, the memfd helper) are reused by more than one module's tests, the same way
//! `wl-proxy`'s own `test_framework.rs` keeps shared helpers in one place instead of
//! duplicating them per module.

#![cfg(test)]

use crate::{error::HostError, host::HostSink};
use std::os::fd::{AsRawFd, OwnedFd};
use uapi::c;

/// An `OwnedFd` good for nothing but satisfying a `Connection`'s socket field in tests
/// that never actually perform I/O on it.
pub(crate) fn dummy_socket() -> OwnedFd {
    let fds = uapi::pipe().expect("pipe() for a test socket stand-in");
    fds.0
}

/// Creates an anonymous, memory-backed file pre-filled with `contents`, for pool tests.
pub(crate) fn memfd(contents: &[u8]) -> OwnedFd {
    let fd: OwnedFd = uapi::memfd_create("test-pool", c::MFD_CLOEXEC)
        .unwrap()
        .into();
    uapi::pwrite(fd.as_raw_fd(), contents, 0).unwrap();
    fd
}

/// A [`HostSink`] that records every write in memory instead of touching a real
/// transport.
#[derive(Default)]
pub(crate) struct FakeHostSink {
    pub(crate) written: Vec<Vec<u8>>,
}

impl HostSink for FakeHostSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), HostError> {
        self.written.push(bytes.to_vec());
        Ok(())
    }
}
