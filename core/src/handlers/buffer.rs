//! `wl_buffer`.

use crate::{connection::Connection, host::HostSink};

const DESTROY: u16 = 0;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    _payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode != DESTROY {
        log::debug!("wl_buffer: unknown opcode {opcode}, skipping");
        return Vec::new();
    }
    conn.buffers.remove(object_id);
    conn.objects.remove(object_id);
    Vec::new()
}
