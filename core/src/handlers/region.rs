//! `wl_region`.
//!
//! Minimal registration only: region composition (`add`/`subtract`) is out of scope
//! (no damage tracking or output transforms here; regions exist only so
//! `set_opaque_region`/`set_input_region` have a valid object to reference).

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
