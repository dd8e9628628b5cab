//! The focus-attempt heuristic.

use crate::{connection::Connection, interface::Interface, wire::MessageBuilder};

const ENTER_OPCODE: u16 = 4;

/// Sends a bogus-but-plausible `enter` event to `object_id` (a `wl_pointer` or
/// `wl_keyboard`), addressed at the connection's longest-lived surviving surface.
///
/// This exists purely to unblock clients that refuse to render before receiving focus;
/// it is safe to call repeatedly (idempotent — it does not touch any table, only emits an
/// event) whenever a new surface or new input object appears. A no-op if there is no
/// surface yet.
pub(crate) fn try_focus_one(conn: &mut Connection, object_id: u32, interface: Interface) -> Option<Vec<u8>> {
    let surface_id = conn.surfaces.first()?;
    let serial = conn.next_serial();
    let message = match interface {
        Interface::WlKeyboard => MessageBuilder::new(object_id, ENTER_OPCODE)
            .uint(serial)
            .uint(surface_id)
            .array(&[])
            .finish(),
        Interface::WlPointer => MessageBuilder::new(object_id, ENTER_OPCODE)
            .uint(serial)
            .uint(surface_id)
            .fixed(crate::fixed::Fixed::ZERO)
            .fixed(crate::fixed::Fixed::ZERO)
            .finish(),
        _ => return None,
    };
    Some(message)
}

/// Attempts focus on every currently-live pointer/keyboard object on `conn`.
///
/// Called whenever a surface becomes available for the first time (`wl_compositor.create_surface`
/// then `xdg_surface.get_toplevel`) so that input objects created *before* the surface
/// existed still get their bogus initial `enter`.
pub(crate) fn try_focus_all(conn: &mut Connection) -> Vec<Vec<u8>> {
    let targets = conn.input_objects();
    targets
        .into_iter()
        .filter_map(|(id, iface)| try_focus_one(conn, id, iface))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_framework::dummy_socket;

    #[test]
    fn no_surface_means_no_focus_event() {
        let mut conn = Connection::new(0, dummy_socket());
        assert!(try_focus_one(&mut conn, 6, Interface::WlPointer).is_none());
    }

    #[test]
    fn pointer_enter_targets_first_surface() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(7);
        let msg = try_focus_one(&mut conn, 6, Interface::WlPointer).unwrap();
        assert_eq!(u32::from_le_bytes(msg[0..4].try_into().unwrap()), 6);
        let opcode = u32::from_le_bytes(msg[4..8].try_into().unwrap()) & 0xffff;
        assert_eq!(opcode, ENTER_OPCODE as u32);
        assert_eq!(u32::from_le_bytes(msg[12..16].try_into().unwrap()), 7);
    }
}
