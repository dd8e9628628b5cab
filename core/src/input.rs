//! The input injector.

use crate::{
    connection::Connection,
    fixed::Fixed,
    host::InptRecord,
    interface::Interface,
    time::now_ms,
    wire::MessageBuilder,
};

const KEYBOARD_KEY_OPCODE: u16 = 3;
const POINTER_MOTION_OPCODE: u16 = 2;
const POINTER_BUTTON_OPCODE: u16 = 3;

/// Applies one decoded INPT record to every matching input object on `conn`, returning
/// the events to enqueue.
///
/// Every `wl_keyboard`/`wl_pointer` object across *every* connection receives the event,
/// not just a single "focused" one — there is no focus-tracking concept here beyond the
/// one-shot enter heuristic in [`crate::focus`]. The caller is expected to invoke this
/// once per live connection.
pub(crate) fn apply(conn: &mut Connection, record: InptRecord) -> Vec<Vec<u8>> {
    let targets: Vec<(u32, Interface)> = conn.input_objects();
    let mut out = Vec::new();
    for (id, interface) in targets {
        match (record, interface) {
            (InptRecord::Key { state, keycode }, Interface::WlKeyboard) => {
                let serial = conn.next_serial();
                out.push(
                    MessageBuilder::new(id, KEYBOARD_KEY_OPCODE)
                        .uint(serial)
                        .uint(now_ms())
                        .uint(keycode)
                        .uint(state)
                        .finish(),
                );
            }
            (InptRecord::Motion { x, y }, Interface::WlPointer) => {
                out.push(
                    MessageBuilder::new(id, POINTER_MOTION_OPCODE)
                        .uint(now_ms())
                        .fixed(Fixed::from_i32_saturating(x))
                        .fixed(Fixed::from_i32_saturating(y))
                        .finish(),
                );
            }
            (InptRecord::Button { state, button }, Interface::WlPointer) => {
                let serial = conn.next_serial();
                out.push(
                    MessageBuilder::new(id, POINTER_BUTTON_OPCODE)
                        .uint(serial)
                        .uint(now_ms())
                        .uint(button)
                        .uint(state)
                        .finish(),
                );
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_framework::dummy_socket;

    #[test]
    fn motion_only_targets_pointers() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.objects.insert(6, Interface::WlPointer, 1);
        conn.objects.insert(7, Interface::WlKeyboard, 1);
        let events = apply(&mut conn, InptRecord::Motion { x: 100, y: 200 });
        assert_eq!(events.len(), 1);
        let id = u32::from_le_bytes(events[0][0..4].try_into().unwrap());
        assert_eq!(id, 6);
    }

    #[test]
    fn button_and_key_assign_increasing_serials() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.objects.insert(6, Interface::WlPointer, 1);
        apply(&mut conn, InptRecord::Button { state: 1, button: 272 });
        apply(&mut conn, InptRecord::Button { state: 0, button: 272 });
        assert_eq!(conn.next_serial(), 3);
    }
}
