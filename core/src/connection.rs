//! A single client connection.

use crate::{
    buffer::BufferTable,
    dispatch,
    host::HostSink,
    interface::Interface,
    object::ObjectTable,
    pool::PoolTable,
    surface::SurfaceTable,
    wire::{try_decode, Decoded},
};
use std::{
    collections::VecDeque,
    os::fd::OwnedFd,
    time::Instant,
};

/// A client session.
///
/// Grounded in `wl-proxy/src/client.rs::Client` and `wl-proxy/src/state.rs`'s per-endpoint
/// bookkeeping, but collapsed into a single owned aggregate passed by unique reference
/// into every handler: there is no separate upstream/downstream endpoint split here
/// because this proxy never talks to a second, real compositor.
///
/// Handlers never write to the socket directly; they push encoded messages onto
/// [`Connection::outbound`] and the event loop flushes that buffer. This is what makes it
/// possible to unit test handlers against a bare `Connection`.
///
/// Field order matters: teardown must unmap and close pool fds, then close any
/// still-queued ancillary fds, and only then close the client socket itself. Rust drops
/// struct fields in declaration order, so `socket` is declared last.
pub struct Connection {
    pub(crate) id: u64,
    pub(crate) objects: ObjectTable,
    pub(crate) pools: PoolTable,
    pub(crate) buffers: BufferTable,
    pub(crate) surfaces: SurfaceTable,
    serial: u32,
    pub(crate) connected_at: Instant,
    /// Bytes read from the socket but not yet split into whole messages.
    pub(crate) input: Vec<u8>,
    /// Ancillary file descriptors received but not yet consumed by an `fd`-typed request
    /// argument.
    pub(crate) fd_queue: VecDeque<OwnedFd>,
    /// Encoded event bytes waiting to be flushed to the client socket, in strict FIFO
    /// order.
    pub(crate) outbound: Vec<u8>,
    pub(crate) socket: OwnedFd,
}

impl Connection {
    pub(crate) fn new(id: u64, socket: OwnedFd) -> Self {
        Self {
            id,
            objects: ObjectTable::default(),
            pools: PoolTable::default(),
            buffers: BufferTable::default(),
            surfaces: SurfaceTable::default(),
            serial: 0,
            connected_at: Instant::now(),
            input: Vec::new(),
            fd_queue: VecDeque::new(),
            outbound: Vec::new(),
            socket,
        }
    }

    /// Issues the next serial number.
    ///
    /// Pre-increments, matching `self.serial += 1; return self.serial` in
    /// `wsl-proxy.py::next_serial` — the first serial issued on a connection is `1`,
    /// never `0`, and serials are strictly increasing.
    pub(crate) fn next_serial(&mut self) -> u32 {
        self.serial += 1;
        self.serial
    }

    /// Queues an encoded event for the client.
    pub(crate) fn enqueue(&mut self, message: Vec<u8>) {
        self.outbound.extend_from_slice(&message);
    }

    /// Every live `wl_pointer`/`wl_keyboard` object on this connection, for the input
    /// injector to fan events out to.
    pub(crate) fn input_objects(&self) -> Vec<(u32, Interface)> {
        self.objects
            .iter()
            .filter(|(_, iface, _)| matches!(iface, Interface::WlPointer | Interface::WlKeyboard))
            .map(|(id, iface, _)| (id, iface))
            .collect()
    }

    /// Appends freshly-read bytes to the input buffer.
    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        self.input.extend_from_slice(bytes);
    }

    /// Decodes and dispatches every whole message currently buffered.
    ///
    /// On a framing desync (declared size `< 8`) this drops exactly one
    /// byte and keeps going, rather than tearing the connection down — the recovery
    /// property this cenario S6 exercises.
    pub(crate) fn drain_messages(&mut self, host: &mut impl HostSink) {
        loop {
            match try_decode(&self.input) {
                Ok(Decoded::NeedMore) => break,
                Ok(Decoded::Message {
                    object_id,
                    opcode,
                    consumed,
                    payload,
                }) => {
                    let payload = payload.to_vec();
                    let events = dispatch::dispatch(self, host, object_id, opcode, &payload);
                    for event in events {
                        self.enqueue(event);
                    }
                    self.input.drain(..consumed);
                }
                Err(e) => {
                    log::warn!("client {} sent a malformed message: {e}", self.id);
                    self.input.drain(..1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_framework::dummy_socket;

    #[test]
    fn serial_starts_at_one_and_increases() {
        let mut c = Connection::new(0, dummy_socket());
        assert_eq!(c.next_serial(), 1);
        assert_eq!(c.next_serial(), 2);
        assert_eq!(c.next_serial(), 3);
    }

    #[test]
    fn enqueue_appends_in_order() {
        let mut c = Connection::new(0, dummy_socket());
        c.enqueue(vec![1, 2, 3]);
        c.enqueue(vec![4, 5]);
        assert_eq!(c.outbound, vec![1, 2, 3, 4, 5]);
    }
}
