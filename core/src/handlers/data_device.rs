//! `wl_data_device`. Minimal registration; no clipboard data transfer
//! (non-goal).

use crate::{connection::Connection, host::HostSink};

const RELEASE: u16 = 2;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    _payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode == RELEASE {
        conn.objects.remove(object_id);
    }
    Vec::new()
}
