//! `wl_pointer`. Events (`enter`, `motion`, `button`) are emitted by
//! [`crate::focus`] and [`crate::input`]; `set_cursor` is out of scope (no cursor
//! surfaces) and is accepted as a no-op alongside `release`.

use crate::{connection::Connection, host::HostSink};

const RELEASE: u16 = 3;

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
