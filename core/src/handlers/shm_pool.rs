//! `wl_shm_pool`.

use crate::{
    buffer::{Buffer, Format},
    connection::Connection,
    host::HostSink,
    interface::Interface,
    wire::MessageReader,
};

const CREATE_BUFFER: u16 = 0;
const DESTROY: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let mut reader = MessageReader::new(payload);
    match opcode {
        CREATE_BUFFER => {
            let (Some(new_id), Some(offset), Some(width), Some(height), Some(stride), Some(format)) = (
                reader.new_id(),
                reader.int(),
                reader.int(),
                reader.int(),
                reader.int(),
                reader.uint(),
            ) else {
                return Vec::new();
            };
            if Format::from_wire(format).is_none() {
                log::warn!("wl_shm_pool.create_buffer: unrecognised format {format}, registering anyway");
            }
            conn.buffers.insert(
                new_id,
                Buffer {
                    pool_id: object_id,
                    offset,
                    width,
                    height,
                    stride,
                    format,
                },
            );
            conn.objects.insert(new_id, Interface::WlBuffer, 1);
            Vec::new()
        }
        DESTROY => {
            conn.pools.destroy(object_id);
            conn.objects.remove(object_id);
            Vec::new()
        }
        _ => {
            log::debug!("wl_shm_pool: unknown opcode {opcode}, skipping");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_framework::{dummy_socket, memfd, FakeHostSink},
        wire::MessageBuilder,
    };

    #[test]
    fn create_buffer_records_metadata_against_the_owning_pool() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.pools.create(8, memfd(&[0u8; 4096]), 4096);
        let mut host = FakeHostSink::default();
        let msg = MessageBuilder::new(8, CREATE_BUFFER)
            .uint(9)
            .int(0)
            .int(400)
            .int(300)
            .int(1600)
            .uint(1)
            .finish();
        handle(&mut conn, &mut host, 8, CREATE_BUFFER, &msg[8..]);
        let buf = conn.buffers.get(9).unwrap();
        assert_eq!(buf.pool_id, 8);
        assert_eq!(buf.width, 400);
    }

    #[test]
    fn destroy_removes_the_pool() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.pools.create(8, memfd(&[0u8; 16]), 16);
        let mut host = FakeHostSink::default();
        handle(&mut conn, &mut host, 8, DESTROY, &[]);
        assert!(conn.pools.get(8).is_none());
    }
}
