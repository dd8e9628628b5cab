//! `xdg_surface`.

use crate::{
    connection::Connection, focus, host::HostSink, interface::Interface,
    wire::{MessageBuilder, MessageReader},
};

const GET_TOPLEVEL: u16 = 1;

const TOPLEVEL_CONFIGURE_OPCODE: u16 = 0;
const SURFACE_CONFIGURE_OPCODE: u16 = 0;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode != GET_TOPLEVEL {
        log::debug!("xdg_surface: unknown opcode {opcode}, skipping");
        return Vec::new();
    }
    let mut reader = MessageReader::new(payload);
    let Some(new_id) = reader.new_id() else {
        return Vec::new();
    };
    conn.objects.insert(new_id, Interface::XdgToplevel, 3);

    let serial = conn.next_serial();
    let mut out = vec![
        MessageBuilder::new(new_id, TOPLEVEL_CONFIGURE_OPCODE)
            .int(800)
            .int(600)
            .array(&[])
            .finish(),
        MessageBuilder::new(object_id, SURFACE_CONFIGURE_OPCODE)
            .uint(serial)
            .finish(),
    ];
    out.extend(focus::try_focus_all(conn));
    out
}
