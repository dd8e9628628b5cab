//! Buffer metadata backing `wl_shm_pool`/`wl_buffer`.

use std::collections::HashMap;

/// A pixel format, as advertised by `wl_shm.format` and used in `wl_shm_pool.create_buffer`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Format {
    Argb8888,
    Xrgb8888,
}

impl Format {
    pub(crate) const fn to_wire(self) -> u32 {
        match self {
            Format::Argb8888 => 0,
            Format::Xrgb8888 => 1,
        }
    }

    pub(crate) const fn from_wire(v: u32) -> Option<Self> {
        match v {
            0 => Some(Format::Argb8888),
            1 => Some(Format::Xrgb8888),
            _ => None,
        }
    }
}

/// A rectangular view into a pool.
///
/// `format` is stored as the raw wire value a client sent, not validated against
/// [`Format`]: `wl_shm_pool.create_buffer` registers the buffer object regardless of
/// whether the format is one this proxy recognises, matching the reference
/// implementation's "store whatever it's given" behavior. [`crate::frame::extract_frame`]
/// is what actually checks [`Format::from_wire`] before doing anything with the bytes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Buffer {
    pub(crate) pool_id: u32,
    pub(crate) offset: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) stride: i32,
    pub(crate) format: u32,
}

/// The per-connection table of live buffers, keyed by the client-assigned object id.
///
/// A buffer's `pool_id` is only a reference; the pool itself lives in
/// [`crate::pool::PoolTable`]. This proxy tolerates a buffer whose pool has since been
/// destroyed by simply skipping the commit (see [`crate::frame::extract_frame`]) rather
/// than treating it as an error.
#[derive(Default)]
pub(crate) struct BufferTable {
    buffers: HashMap<u32, Buffer>,
}

impl BufferTable {
    pub(crate) fn insert(&mut self, id: u32, buffer: Buffer) {
        self.buffers.insert(id, buffer);
    }

    pub(crate) fn get(&self, id: u32) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    pub(crate) fn remove(&mut self, id: u32) {
        self.buffers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips() {
        assert_eq!(Format::from_wire(0), Some(Format::Argb8888));
        assert_eq!(Format::from_wire(1), Some(Format::Xrgb8888));
        assert_eq!(Format::from_wire(2), None);
        assert_eq!(Format::Argb8888.to_wire(), 0);
        assert_eq!(Format::Xrgb8888.to_wire(), 1);
    }
}
