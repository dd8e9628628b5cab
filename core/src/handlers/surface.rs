//! `wl_surface`.

use crate::{connection::Connection, frame, host::HostSink, time::now_ms, wire::{MessageBuilder, MessageReader}};

const DESTROY: u16 = 0;
const ATTACH: u16 = 1;
const FRAME: u16 = 3;
const COMMIT: u16 = 6;

const CALLBACK_DONE_OPCODE: u16 = 0;

pub(crate) fn handle(
    conn: &mut Connection,
    host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    match opcode {
        DESTROY => {
            conn.surfaces.remove(object_id);
            conn.objects.remove(object_id);
            Vec::new()
        }
        ATTACH => {
            // Tolerant per : a payload as short as 4 bytes still yields a
            // buffer id; anything shorter is simply ignored rather than torn down.
            if payload.len() < 4 {
                return Vec::new();
            }
            let mut reader = MessageReader::new(payload);
            let Some(buffer) = reader.object() else {
                return Vec::new();
            };
            conn.surfaces
                .attach(object_id, if buffer == 0 { None } else { Some(buffer) });
            Vec::new()
        }
        FRAME => {
            let mut reader = MessageReader::new(payload);
            let Some(callback) = reader.new_id() else {
                return Vec::new();
            };
            // The proxy never throttles to a real refresh cycle: the done
            // event fires immediately and the callback object is never registered.
            vec![MessageBuilder::new(callback, CALLBACK_DONE_OPCODE)
                .uint(now_ms())
                .finish()]
        }
        COMMIT => match frame::extract_frame(conn, object_id, host) {
            Ok(Some(release)) => vec![release],
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("host channel write failed during commit: {e}");
                Vec::new()
            }
        },
        // damage, set_opaque_region, set_input_region, set_buffer_transform,
        // set_buffer_scale, damage_buffer, offset — accepted and ignored
        // (no damage tracking or region composition in scope).
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buffer::{Buffer, Format},
        test_framework::{dummy_socket, memfd, FakeHostSink},
        wire::MessageBuilder,
    };

    #[test]
    fn attach_zero_detaches_a_surface() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        conn.surfaces.attach(6, Some(9));
        let mut host = FakeHostSink::default();
        let msg = MessageBuilder::new(6, ATTACH).uint(0).int(0).int(0).finish();
        handle(&mut conn, &mut host, 6, ATTACH, &msg[8..]);
        assert_eq!(conn.surfaces.attached_buffer(6), None);
    }

    #[test]
    fn short_attach_payload_still_reads_the_buffer_id() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let mut host = FakeHostSink::default();
        // Only 4 bytes: the buffer id, no x/y.
        handle(&mut conn, &mut host, 6, ATTACH, &9u32.to_le_bytes());
        assert_eq!(conn.surfaces.attached_buffer(6), Some(9));
    }

    #[test]
    fn commit_with_live_buffer_emits_release_after_pixl() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let data = vec![0x11u8; 16 * 16 * 4];
        conn.pools.create(8, memfd(&data), data.len() as u32);
        conn.buffers.insert(
            9,
            Buffer {
                pool_id: 8,
                offset: 0,
                width: 16,
                height: 16,
                stride: 64,
                format: Format::Argb8888.to_wire(),
            },
        );
        conn.surfaces.attach(6, Some(9));
        let mut host = FakeHostSink::default();
        let out = handle(&mut conn, &mut host, 6, COMMIT, &[]);
        assert_eq!(host.written.len(), 1);
        assert_eq!(out.len(), 1);
        assert_eq!(u32::from_le_bytes(out[0][0..4].try_into().unwrap()), 9);
    }

    #[test]
    fn commit_with_no_buffer_emits_nothing() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let mut host = FakeHostSink::default();
        let out = handle(&mut conn, &mut host, 6, COMMIT, &[]);
        assert!(out.is_empty());
        assert!(host.written.is_empty());
    }
}
