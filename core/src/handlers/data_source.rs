//! `wl_data_source`. Minimal registration; no clipboard data transfer
//! (non-goal).

use crate::{connection::Connection, host::HostSink};

const DESTROY: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    _payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode == DESTROY {
        conn.objects.remove(object_id);
    }
    Vec::new()
}
