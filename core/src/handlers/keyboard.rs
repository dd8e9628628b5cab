//! `wl_keyboard`. Events (`enter`, `key`) are emitted by
//! [`crate::focus`] and [`crate::input`]; the only client request is `release`.

use crate::{connection::Connection, host::HostSink};

const RELEASE: u16 = 1;

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
