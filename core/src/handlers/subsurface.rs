//! `wl_subsurface`. No subsurface composition (non-goal);
//! requests are accepted and ignored except `destroy`.

use crate::{connection::Connection, host::HostSink};

const DESTROY: u16 = 0;

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
