//! `wl_compositor`.

use crate::{
    connection::Connection, focus, host::HostSink, interface::Interface, wire::MessageReader,
};

const CREATE_SURFACE: u16 = 0;
const CREATE_REGION: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let mut reader = MessageReader::new(payload);
    match opcode {
        CREATE_SURFACE => {
            let Some(new_id) = reader.new_id() else {
                return Vec::new();
            };
            conn.objects.insert(new_id, Interface::WlSurface, 4);
            conn.surfaces.create(new_id);
            focus::try_focus_all(conn)
        }
        CREATE_REGION => {
            let Some(new_id) = reader.new_id() else {
                return Vec::new();
            };
            conn.objects.insert(new_id, Interface::WlRegion, 1);
            Vec::new()
        }
        _ => {
            log::debug!("wl_compositor: unknown opcode {opcode}, skipping");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_framework::{dummy_socket, FakeHostSink}, wire::MessageBuilder};

    #[test]
    fn create_surface_registers_and_tracks_it() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let payload = MessageBuilder::new(5, CREATE_SURFACE).uint(6).finish();
        handle(&mut conn, &mut host, 5, CREATE_SURFACE, &payload[8..]);
        assert_eq!(conn.objects.lookup(6), Some((Interface::WlSurface, 4)));
        assert_eq!(conn.surfaces.first(), Some(6));
    }
}
