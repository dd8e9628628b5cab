//! `wl_seat`.

use crate::{
    connection::Connection, focus, host::HostSink, interface::Interface, wire::MessageReader,
};

const GET_POINTER: u16 = 0;
const GET_KEYBOARD: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let mut reader = MessageReader::new(payload);
    let (interface, version) = match opcode {
        GET_POINTER => (Interface::WlPointer, 1),
        GET_KEYBOARD => (Interface::WlKeyboard, 1),
        _ => {
            log::debug!("wl_seat: unknown opcode {opcode}, skipping");
            return Vec::new();
        }
    };
    let Some(new_id) = reader.new_id() else {
        return Vec::new();
    };
    conn.objects.insert(new_id, interface, version);
    focus::try_focus_one(conn, new_id, interface)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_framework::{dummy_socket, FakeHostSink}, wire::MessageBuilder};

    #[test]
    fn get_pointer_focuses_an_existing_surface() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(7);
        let mut host = FakeHostSink::default();
        let msg = MessageBuilder::new(5, GET_POINTER).uint(6).finish();
        let out = handle(&mut conn, &mut host, 5, GET_POINTER, &msg[8..]);
        assert_eq!(conn.objects.lookup(6), Some((Interface::WlPointer, 1)));
        assert_eq!(out.len(), 1);
    }
}
