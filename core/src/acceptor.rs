//! The listening endpoint: a Unix domain socket accepting new clients and
//! supplying the raw read/write/ancillary-fd plumbing each [`crate::connection::Connection`]
//! needs.
//!
//! Grounded in `wl-proxy/src/acceptor.rs` (stale-socket removal, `listen`/`accept4`) and
//! `wl-proxy/src/trans.rs` (the `recvmsg`/`sendmsg` ancillary-fd dance) but flattened into
//! free functions instead of a trait-object transport, since this proxy only ever talks
//! Unix-domain sockets to clients and keeps concurrency to what a single-threaded
//! multiplexer needs.

use smallvec::SmallVec;
use std::{
    ffi::CString,
    mem::{size_of, MaybeUninit},
    os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd},
    path::Path,
};
use uapi::c;

/// Fds pulled out of one `recvmsg` call. Clients only ever pass a single fd per message
/// (`wl_shm.create_pool`), so this stays on the stack for the common case, matching how
/// `wl-proxy/src/trans.rs` sizes its own per-message fd `SmallVec`.
pub(crate) type FdVec = SmallVec<[OwnedFd; 4]>;

/// Binds and listens on a Unix-domain stream socket at `path`, removing a stale file left
/// behind by a previous, uncleanly-terminated run first.
pub(crate) fn bind_listener(path: &str) -> Result<OwnedFd, std::io::Error> {
    if Path::new(path).exists() {
        let _ = std::fs::remove_file(path);
    }
    let fd = uapi::socket(
        c::AF_UNIX,
        c::SOCK_STREAM | c::SOCK_CLOEXEC | c::SOCK_NONBLOCK,
        0,
    )
    .map_err(std::io::Error::from)?;

    let c_path = CString::new(path).expect("socket path must not contain a NUL byte");
    let mut addr: c::sockaddr_un = unsafe { MaybeUninit::zeroed().assume_init() };
    addr.sun_family = c::AF_UNIX as _;
    let bytes = c_path.as_bytes_with_nul();
    // SAFETY: `addr.sun_path` is large enough for any path this proxy is configured with;
    // a path exceeding it is a configuration error the caller should fix, not something
    // this function silently truncates.
    assert!(bytes.len() <= addr.sun_path.len(), "socket path too long");
    for (dst, &src) in addr.sun_path.iter_mut().zip(bytes) {
        *dst = src as c::c_char;
    }

    uapi::bind(fd.as_raw_fd(), &addr).map_err(std::io::Error::from)?;
    uapi::listen(fd.as_raw_fd(), 16).map_err(std::io::Error::from)?;
    Ok(fd)
}

/// Accepts one pending connection, or `None` if none is ready (the listener is
/// non-blocking).
pub(crate) fn accept(listener: &OwnedFd) -> Result<Option<OwnedFd>, std::io::Error> {
    match uapi::accept4(listener.as_raw_fd(), c::SOCK_CLOEXEC | c::SOCK_NONBLOCK) {
        Ok(fd) => Ok(Some(fd)),
        Err(uapi::Errno(c::EAGAIN)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// How many fds a single `recvmsg` call is willing to receive at once. Clients only ever
/// pass one fd per `wl_shm.create_pool`, so this is generous headroom.
const MAX_ANCILLARY_FDS: usize = 8;

/// Reads bytes and any ancillary file descriptors from a client socket in one syscall.
///
/// Returns `Ok(None)` when nothing is currently available (`EAGAIN`) — distinct from a
/// clean EOF, which is `Ok(Some((0, _)))` and is the caller's cue to treat the client as
/// disconnected. `fds` accumulates into the connection's fd queue in the order the kernel
/// delivered them, which for this protocol is also argument order.
pub(crate) fn recv(fd: RawFd, buf: &mut [u8]) -> Result<Option<(usize, FdVec)>, std::io::Error> {
    let mut iov = c::iovec {
        iov_base: buf.as_mut_ptr() as *mut _,
        iov_len: buf.len(),
    };
    let cmsg_space = unsafe { c::CMSG_SPACE((MAX_ANCILLARY_FDS * size_of::<RawFd>()) as u32) } as usize;
    let mut cmsg_buf = vec![0u8; cmsg_space];
    let mut msg: c::msghdr = unsafe { MaybeUninit::zeroed().assume_init() };
    msg.msg_iov = &mut iov;
    msg.msg_iovlen = 1;
    msg.msg_control = cmsg_buf.as_mut_ptr() as *mut _;
    msg.msg_controllen = cmsg_buf.len() as _;

    let n = match uapi::recvmsg(fd, &mut msg, 0) {
        Ok(n) => n,
        Err(uapi::Errno(c::EAGAIN)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut fds = FdVec::new();
    // SAFETY: `msg` was populated by a successful `recvmsg` into `cmsg_buf`, which stays
    // alive for the duration of this unsafe block.
    unsafe {
        let mut cmsg = c::CMSG_FIRSTHDR(&msg);
        while !cmsg.is_null() {
            let hdr = &*cmsg;
            if hdr.cmsg_level == c::SOL_SOCKET && hdr.cmsg_type == c::SCM_RIGHTS {
                let data = c::CMSG_DATA(cmsg);
                let count = (hdr.cmsg_len as usize - c::CMSG_LEN(0) as usize) / size_of::<RawFd>();
                for i in 0..count {
                    let raw = (data as *const RawFd).add(i).read_unaligned();
                    fds.push(OwnedFd::from_raw_fd(raw));
                }
            }
            cmsg = c::CMSG_NXTHDR(&msg, cmsg);
        }
    }

    Ok(Some((n as usize, fds)))
}

/// Writes `bytes` in full to `fd`, looping over partial writes.
///
/// A write failure here is the caller's responsibility to log and recover from; this only
/// surfaces the final error.
pub(crate) fn send_all(fd: RawFd, bytes: &[u8]) -> Result<(), std::io::Error> {
    let mut written = 0;
    while written < bytes.len() {
        match uapi::write(fd, &bytes[written..]) {
            Ok(n) => written += n,
            Err(uapi::Errno(c::EAGAIN)) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
