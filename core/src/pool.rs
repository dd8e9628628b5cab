//! Shared-memory pool registry backing `wl_shm`/`wl_shm_pool`.

use crate::error::PoolError;
use std::{
    collections::HashMap,
    os::fd::{AsRawFd, OwnedFd},
    ptr::NonNull,
};
use uapi::c;

/// A read-only mapping of a client's shared-memory pool.
///
/// `wl-proxy` never needs to map client memory itself — it only forwards the fd to the
/// real compositor. This proxy *is* the compositor for the client's purposes, so it does
/// the `mmap` itself; the raw syscall plumbing (via `uapi`, matching how the rest of this
/// crate talks to the kernel) mirrors `mmap.mmap(fd, size, mmap.MAP_SHARED, mmap.PROT_READ)`
/// from the reference implementation this proxy replaces.
struct Mapping {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: the mapping is read-only and never mutated through `Mapping`, and a `Pool` (and
// therefore its `Mapping`) never crosses a thread boundary in this single-threaded proxy.
impl Mapping {
    fn map(fd: &OwnedFd, len: usize) -> Result<Self, PoolError> {
        if len == 0 {
            // mmap of a zero-length region is an error; treat it the same as a failed
            // mapping (§7: pool is recorded with a null mapping).
            return Err(PoolError::Mmap(std::io::Error::from_raw_os_error(
                c::EINVAL,
            )));
        }
        // SAFETY: `fd` is a valid, open file descriptor owned by this pool for its
        // entire lifetime; the mapping is read-only (`PROT_READ`) and shared, so no
        // aliasing-mutation hazard is introduced by this call itself.
        let res = unsafe {
            uapi::mmap(
                0,
                len,
                c::PROT_READ,
                c::MAP_SHARED,
                fd.as_raw_fd(),
                0,
            )
        };
        let addr = res.map_err(|e| PoolError::Mmap(e.into()))?;
        let ptr = NonNull::new(addr as *mut u8)
            .ok_or_else(|| PoolError::Mmap(std::io::Error::from_raw_os_error(c::ENOMEM)))?;
        Ok(Self { ptr, len })
    }

    fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` was returned by a successful `mmap` of `len` bytes and is kept
        // alive for the lifetime of `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`len` describe exactly the region returned by `mmap` in `map`,
        // and no other code holds a reference into it once `Mapping` is dropped.
        let res = unsafe { uapi::munmap(self.ptr.as_ptr() as usize, self.len) };
        if let Err(e) = res {
            log::warn!("failed to unmap a shm pool: {}", std::io::Error::from(e));
        }
    }
}

/// A client's shared-memory pool: an fd, its size, and (if mapping succeeded) the mapped
/// view.
///
/// Field order matters here: per the mapped view must be released before
/// the fd is closed, and Rust drops struct fields in declaration order.
pub(crate) struct Pool {
    mapping: Option<Mapping>,
    fd: OwnedFd,
    size: usize,
}

impl Pool {
    fn new(fd: OwnedFd, size: usize) -> Self {
        let mapping = match Mapping::map(&fd, size) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("mmap of shm pool failed, buffers against it will be skipped: {e}");
                None
            }
        };
        Self { fd, mapping, size }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Returns the mapped bytes, or `None` if mapping the pool failed.
    pub(crate) fn bytes(&self) -> Option<&[u8]> {
        self.mapping.as_ref().map(Mapping::as_slice)
    }
}

/// The per-connection table of live shm pools, keyed by the client-assigned object id.
#[derive(Default)]
pub(crate) struct PoolTable {
    pools: HashMap<u32, Pool>,
}

impl PoolTable {
    /// Creates a pool from an ancillary fd and registers it under `id`.
    ///
    /// Mapping failure is not propagated as an error (§7): the pool is still recorded, with
    /// no mapped bytes, so that later buffer commits against it are silently skipped
    /// instead of the connection being torn down.
    pub(crate) fn create(&mut self, id: u32, fd: OwnedFd, size: u32) {
        self.pools.insert(id, Pool::new(fd, size as usize));
    }

    pub(crate) fn get(&self, id: u32) -> Option<&Pool> {
        self.pools.get(&id)
    }

    /// Removes and drops a pool, unmapping it and closing its fd (in that order, via
    /// `Mapping`'s and `OwnedFd`'s `Drop` impls) before returning.
    pub(crate) fn destroy(&mut self, id: u32) {
        self.pools.remove(&id);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::AsRawFd;

    fn memfd(contents: &[u8]) -> OwnedFd {
        let fd: OwnedFd = uapi::memfd_create("pool-test", c::MFD_CLOEXEC)
            .unwrap()
            .into();
        uapi::pwrite(fd.as_raw_fd(), contents, 0).unwrap();
        fd
    }

    #[test]
    fn mapped_pool_exposes_its_bytes() {
        let data = vec![0xAAu8; 4096];
        let fd = memfd(&data);
        let mut table = PoolTable::default();
        table.create(8, fd, 4096);
        let pool = table.get(8).unwrap();
        assert_eq!(pool.size(), 4096);
        assert_eq!(pool.bytes().unwrap(), &data[..]);
    }

    #[test]
    fn destroy_removes_the_pool() {
        let fd = memfd(&[0u8; 16]);
        let mut table = PoolTable::default();
        table.create(1, fd, 16);
        table.destroy(1);
        assert!(table.get(1).is_none());
        assert_eq!(table.len(), 0);
    }
}
