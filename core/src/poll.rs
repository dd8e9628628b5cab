//! The readiness multiplexer: a thin wrapper over `epoll`.
//!
//! Grounded in `wl-proxy/src/poll.rs`, which wraps the same three syscalls
//! (`epoll_create1`, `epoll_ctl`, `epoll_wait`) behind a small struct so the rest of the
//! crate never touches raw fds or `libc::epoll_event` directly.

use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use uapi::c;

/// A readiness event: which token was registered for the fd that became ready, and
/// whether it was for reading, writing, or a hangup/error.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Event {
    pub(crate) token: u64,
    pub(crate) readable: bool,
    pub(crate) writable: bool,
    pub(crate) hangup: bool,
}

pub(crate) struct Poller {
    epoll: OwnedFd,
}

impl Poller {
    pub(crate) fn new() -> Result<Self, std::io::Error> {
        let epoll = uapi::epoll_create1(c::EPOLL_CLOEXEC).map_err(std::io::Error::from)?;
        Ok(Self { epoll })
    }

    /// Registers `fd` for readability, tagged with an opaque `token` the caller uses to
    /// identify it again in [`Event`].
    pub(crate) fn register_read(&self, fd: RawFd, token: u64) -> Result<(), std::io::Error> {
        let mut ev = c::epoll_event {
            events: c::EPOLLIN as u32,
            u64: token,
        };
        uapi::epoll_ctl(self.epoll.as_raw_fd(), c::EPOLL_CTL_ADD, fd, Some(&mut ev))
            .map_err(std::io::Error::from)
    }

    pub(crate) fn deregister(&self, fd: RawFd) -> Result<(), std::io::Error> {
        uapi::epoll_ctl(self.epoll.as_raw_fd(), c::EPOLL_CTL_DEL, fd, None)
            .map_err(std::io::Error::from)
    }

    /// Blocks until at least one registered fd is ready, or `timeout_ms` elapses
    /// (`-1` blocks forever).
    pub(crate) fn wait(&self, timeout_ms: i32) -> Result<Vec<Event>, std::io::Error> {
        let mut raw = [c::epoll_event { events: 0, u64: 0 }; 64];
        let n = uapi::epoll_wait(self.epoll.as_raw_fd(), &mut raw, timeout_ms)
            .map_err(std::io::Error::from)?;
        Ok(raw[..n]
            .iter()
            .map(|e| Event {
                token: e.u64,
                readable: e.events & (c::EPOLLIN as u32) != 0,
                writable: e.events & (c::EPOLLOUT as u32) != 0,
                hangup: e.events & ((c::EPOLLHUP | c::EPOLLERR) as u32) != 0,
            })
            .collect())
    }
}
