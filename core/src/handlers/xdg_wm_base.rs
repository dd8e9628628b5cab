//! `xdg_wm_base`.

use crate::{connection::Connection, host::HostSink, interface::Interface, wire::MessageReader};

const GET_XDG_SURFACE: u16 = 2;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode != GET_XDG_SURFACE {
        log::debug!("xdg_wm_base: unknown opcode {opcode}, skipping");
        return Vec::new();
    }
    let mut reader = MessageReader::new(payload);
    let Some(new_id) = reader.new_id() else {
        return Vec::new();
    };
    let Some(_surface) = reader.object() else {
        return Vec::new();
    };
    conn.objects.insert(new_id, Interface::XdgSurface, 3);
    Vec::new()
}
