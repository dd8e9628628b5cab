//! `wl_subcompositor`.

use crate::{connection::Connection, host::HostSink, interface::Interface, wire::MessageReader};

const DESTROY: u16 = 0;
const GET_SUBSURFACE: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    match opcode {
        DESTROY => {
            conn.objects.remove(object_id);
            Vec::new()
        }
        GET_SUBSURFACE => {
            let mut reader = MessageReader::new(payload);
            let Some(new_id) = reader.new_id() else {
                return Vec::new();
            };
            // `surface` and `parent` are read only to keep the cursor aligned; no
            // subsurface composition is performed (non-goal).
            let _surface = reader.object();
            let _parent = reader.object();
            conn.objects.insert(new_id, Interface::WlSubsurface, 1);
            Vec::new()
        }
        _ => {
            log::debug!("wl_subcompositor: unknown opcode {opcode}, skipping");
            Vec::new()
        }
    }
}
