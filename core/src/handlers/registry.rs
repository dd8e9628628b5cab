//! `wl_registry`.

use crate::{
    connection::Connection,
    host::HostSink,
    interface::{self, Interface},
    wire::{MessageBuilder, MessageReader},
};

const BIND: u16 = 0;

const SHM_FORMAT_OPCODE: u16 = 0;
const SEAT_CAPABILITIES_OPCODE: u16 = 0;
const SEAT_NAME_OPCODE: u16 = 1;
const OUTPUT_GEOMETRY_OPCODE: u16 = 0;
const OUTPUT_MODE_OPCODE: u16 = 1;
const OUTPUT_DONE_OPCODE: u16 = 2;
const OUTPUT_SCALE_OPCODE: u16 = 3;

const SHM_FORMAT_ARGB8888: u32 = 0;
const SHM_FORMAT_XRGB8888: u32 = 1;

const SEAT_CAP_POINTER_KEYBOARD: u32 = 0x3;

const OUTPUT_MODE_CURRENT_PREFERRED: u32 = 0x3;

/// The fixed set of globals this proxy advertises, emitted once by
/// `wl_display.get_registry` in creation order.
pub(crate) const GLOBALS: [(u32, Interface, u32); 7] = [
    (1, Interface::WlCompositor, 4),
    (2, Interface::WlSubcompositor, 1),
    (3, Interface::WlShm, 1),
    (4, Interface::XdgWmBase, 1),
    (5, Interface::WlSeat, 5),
    (6, Interface::WlOutput, 3),
    (7, Interface::WlDataDeviceManager, 3),
];

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode != BIND {
        log::debug!("wl_registry: unknown opcode {opcode}, skipping");
        return Vec::new();
    }
    let mut reader = MessageReader::new(payload);
    let Some(_name) = reader.uint() else {
        return Vec::new();
    };
    let Some(interface_name) = reader.string() else {
        return Vec::new();
    };
    let Some(version) = reader.uint() else {
        return Vec::new();
    };
    let Some(new_id) = reader.new_id() else {
        return Vec::new();
    };
    let Some(interface) = interface::by_name(&interface_name) else {
        log::warn!("wl_registry.bind: client bound unsupported interface {interface_name}");
        return Vec::new();
    };
    conn.objects.insert(new_id, interface, version);

    match interface {
        Interface::WlShm => vec![
            MessageBuilder::new(new_id, SHM_FORMAT_OPCODE)
                .uint(SHM_FORMAT_ARGB8888)
                .finish(),
            MessageBuilder::new(new_id, SHM_FORMAT_OPCODE)
                .uint(SHM_FORMAT_XRGB8888)
                .finish(),
        ],
        Interface::WlSeat => vec![
            MessageBuilder::new(new_id, SEAT_CAPABILITIES_OPCODE)
                .uint(SEAT_CAP_POINTER_KEYBOARD)
                .finish(),
            MessageBuilder::new(new_id, SEAT_NAME_OPCODE)
                .string("win-way-seat")
                .finish(),
        ],
        Interface::WlOutput => {
            let mut events = vec![
                MessageBuilder::new(new_id, OUTPUT_GEOMETRY_OPCODE)
                    .int(0)
                    .int(0)
                    .int(1920)
                    .int(1080)
                    .uint(0)
                    .string("WinWay")
                    .string("Monitor")
                    .int(0)
                    .finish(),
                MessageBuilder::new(new_id, OUTPUT_MODE_OPCODE)
                    .uint(OUTPUT_MODE_CURRENT_PREFERRED)
                    .int(1920)
                    .int(1080)
                    .int(60_000)
                    .finish(),
            ];
            if version >= 2 {
                events.push(MessageBuilder::new(new_id, OUTPUT_SCALE_OPCODE).int(1).finish());
                events.push(MessageBuilder::new(new_id, OUTPUT_DONE_OPCODE).finish());
            }
            events
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_framework::{dummy_socket, FakeHostSink}, wire::Decoded};

    fn bind_payload(name: u32, interface: &str, version: u32, new_id: u32) -> Vec<u8> {
        let msg = MessageBuilder::new(2, BIND)
            .uint(name)
            .string(interface)
            .uint(version)
            .uint(new_id)
            .finish();
        let Decoded::Message { consumed, .. } = crate::wire::try_decode(&msg).unwrap() else {
            panic!()
        };
        msg[8..consumed].to_vec()
    }

    #[test]
    fn binding_wl_shm_emits_both_formats() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let payload = bind_payload(3, "wl_shm", 1, 4);
        let out = handle(&mut conn, &mut host, 2, BIND, &payload);
        assert_eq!(out.len(), 2);
        assert_eq!(u32::from_le_bytes(out[0][8..12].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(out[1][8..12].try_into().unwrap()), 1);
        assert_eq!(conn.objects.lookup(4), Some((Interface::WlShm, 1)));
    }

    #[test]
    fn binding_unknown_interface_emits_nothing_and_registers_nothing() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let payload = bind_payload(9, "zwlr_layer_shell_v1", 1, 4);
        let out = handle(&mut conn, &mut host, 2, BIND, &payload);
        assert!(out.is_empty());
        assert!(conn.objects.lookup(4).is_none());
    }
}
