//! `wl_display` (object 1).

use crate::{
    connection::Connection, handlers::registry::GLOBALS, host::HostSink, interface::Interface,
    time::now_ms, wire::{MessageBuilder, MessageReader},
};

const SYNC: u16 = 0;
const GET_REGISTRY: u16 = 1;

const CALLBACK_DONE_OPCODE: u16 = 0;
const REGISTRY_GLOBAL_OPCODE: u16 = 0;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let mut reader = MessageReader::new(payload);
    match opcode {
        SYNC => {
            let Some(callback) = reader.new_id() else {
                return Vec::new();
            };
            // Register then immediately tear down: per the callback object
            // never outlives this single dispatch, so there is nothing to insert into the
            // object table in the first place.
            vec![MessageBuilder::new(callback, CALLBACK_DONE_OPCODE)
                .uint(now_ms())
                .finish()]
        }
        GET_REGISTRY => {
            let Some(registry) = reader.new_id() else {
                return Vec::new();
            };
            conn.objects.insert(registry, Interface::WlRegistry, 1);
            GLOBALS
                .iter()
                .map(|(name, interface, version)| {
                    MessageBuilder::new(registry, REGISTRY_GLOBAL_OPCODE)
                        .uint(*name)
                        .string(interface.name())
                        .uint(*version)
                        .finish()
                })
                .collect()
        }
        _ => {
            log::debug!("wl_display: unknown opcode {opcode}, skipping");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_framework::{dummy_socket, FakeHostSink}, wire::Decoded};

    #[test]
    fn sync_emits_one_callback_done_and_registers_nothing() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let payload = MessageBuilder::new(1, SYNC).uint(3).finish();
        let Decoded::Message { payload, .. } = crate::wire::try_decode(&payload).unwrap() else {
            panic!()
        };
        let out = handle(&mut conn, &mut host, 1, SYNC, payload);
        assert_eq!(out.len(), 1);
        assert_eq!(u32::from_le_bytes(out[0][0..4].try_into().unwrap()), 3);
        assert!(conn.objects.lookup(3).is_none());
    }

    #[test]
    fn get_registry_emits_seven_globals() {
        let mut conn = Connection::new(0, dummy_socket());
        let mut host = FakeHostSink::default();
        let payload = MessageBuilder::new(1, GET_REGISTRY).uint(2).finish();
        let Decoded::Message { payload, .. } = crate::wire::try_decode(&payload).unwrap() else {
            panic!()
        };
        let out = handle(&mut conn, &mut host, 1, GET_REGISTRY, payload);
        assert_eq!(out.len(), 7);
        assert_eq!(conn.objects.lookup(2), Some((Interface::WlRegistry, 1)));
    }
}
