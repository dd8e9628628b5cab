//! Error types for the proxy core.
//!
//! `thiserror`-derived, in the spirit of `wl-proxy`'s `object::ObjectError` /
//! `trans::TransError` enums: each variant names one failure mode and carries its
//! `#[source]` where one exists, so a caller that wants the full chain (`winway-proxy`'s
//! top-level error, via `error_reporter::Report`) has something to wrap.

use std::io;
use thiserror::Error;

/// An error produced while decoding a message from a client's byte stream.
///
/// per this is always [`DecodeError::Malformed`] — a buffer that's merely
/// short of a whole message is not an error (`wire::Decoded::NeedMore`), only a declared
/// size `< 8` is. It is handled by advancing one byte and retrying, never by dropping the
/// connection.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The declared message size is invalid (`< 8` per the wire format in §4.1).
    #[error("message has invalid size {0}")]
    Malformed(usize),
}

/// An error produced while creating or using a shared-memory pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// No ancillary file descriptor was available for `wl_shm.create_pool`.
    #[error("no file descriptor was supplied for the pool")]
    MissingFd,
    /// `mmap` failed; per §7 this is not fatal, the pool is kept with no mapping.
    #[error("failed to map the pool")]
    Mmap(#[source] io::Error),
}

/// An error on the host channel (§6).
///
/// Per §7, only [`HostError::Eof`] is fatal to the process; write failures are logged and
/// the event loop continues.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host closed its end of the channel.
    #[error("the host channel reached end of file")]
    Eof,
    #[error("failed to read from the host channel")]
    Read(#[source] io::Error),
    #[error("failed to write to the host channel")]
    Write(#[source] io::Error),
}
