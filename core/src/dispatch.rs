//! The interface dispatcher.

use crate::{connection::Connection, handlers, host::HostSink, interface::Interface};

/// Routes one decoded message to its handler.
///
/// An unknown object id, or an opcode a handler doesn't recognise, is logged and skipped
/// rather than treated as fatal — the connection stays alive. Matching over `Interface`,
/// a `#[linearize(const)]` enum resolved once at bind time, compiles to a dense jump table
/// rather than a chain of string comparisons.
pub(crate) fn dispatch(
    conn: &mut Connection,
    host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let Some((interface, _version)) = conn.objects.lookup(object_id) else {
        log::warn!("message for unknown object {object_id}, skipping");
        return Vec::new();
    };
    match interface {
        Interface::WlDisplay => handlers::display::handle(conn, host, object_id, opcode, payload),
        Interface::WlRegistry => handlers::registry::handle(conn, host, object_id, opcode, payload),
        Interface::WlCompositor => handlers::compositor::handle(conn, host, object_id, opcode, payload),
        Interface::WlSubcompositor => handlers::subcompositor::handle(conn, host, object_id, opcode, payload),
        Interface::WlShm => handlers::shm::handle(conn, host, object_id, opcode, payload),
        Interface::WlShmPool => handlers::shm_pool::handle(conn, host, object_id, opcode, payload),
        Interface::WlBuffer => handlers::buffer::handle(conn, host, object_id, opcode, payload),
        Interface::WlSurface => handlers::surface::handle(conn, host, object_id, opcode, payload),
        Interface::WlRegion => handlers::region::handle(conn, host, object_id, opcode, payload),
        Interface::WlCallback => handlers::callback::handle(conn, host, object_id, opcode, payload),
        Interface::WlSeat => handlers::seat::handle(conn, host, object_id, opcode, payload),
        Interface::WlPointer => handlers::pointer::handle(conn, host, object_id, opcode, payload),
        Interface::WlKeyboard => handlers::keyboard::handle(conn, host, object_id, opcode, payload),
        Interface::WlOutput => handlers::output::handle(conn, host, object_id, opcode, payload),
        Interface::WlSubsurface => handlers::subsurface::handle(conn, host, object_id, opcode, payload),
        Interface::WlDataDeviceManager => {
            handlers::data_device_manager::handle(conn, host, object_id, opcode, payload)
        }
        Interface::WlDataDevice => handlers::data_device::handle(conn, host, object_id, opcode, payload),
        Interface::WlDataSource => handlers::data_source::handle(conn, host, object_id, opcode, payload),
        Interface::XdgWmBase => handlers::xdg_wm_base::handle(conn, host, object_id, opcode, payload),
        Interface::XdgSurface => handlers::xdg_surface::handle(conn, host, object_id, opcode, payload),
        Interface::XdgToplevel => handlers::xdg_toplevel::handle(conn, host, object_id, opcode, payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_framework::{dummy_socket, FakeHostSink},
        wire::MessageBuilder,
    };

    #[test]
    fn unknown_object_is_skipped_not_fatal() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let out = dispatch(&mut conn, &mut host, 999, 0, &[]);
        assert!(out.is_empty());
    }

    #[test]
    fn routes_display_sync_to_its_handler() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let msg = MessageBuilder::new(1, 0).uint(3).finish();
        let out = dispatch(&mut conn, &mut host, 1, 0, &msg[8..]);
        assert_eq!(out.len(), 1);
    }
}
