//! `wl_shm`.

use crate::{
    connection::Connection, error::PoolError, host::HostSink, interface::Interface,
    wire::MessageReader,
};

const CREATE_POOL: u16 = 0;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    if opcode != CREATE_POOL {
        log::debug!("wl_shm: unknown opcode {opcode}, skipping");
        return Vec::new();
    }
    let mut reader = MessageReader::new(payload);
    let Some(new_id) = reader.new_id() else {
        return Vec::new();
    };
    let Some(size) = reader.int() else {
        return Vec::new();
    };
    let Some(fd) = conn.fd_queue.pop_front() else {
        log::warn!("wl_shm.create_pool: {}", PoolError::MissingFd);
        return Vec::new();
    };
    conn.pools.create(new_id, fd, size.max(0) as u32);
    conn.objects.insert(new_id, Interface::WlShmPool, 1);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_framework::{dummy_socket, memfd, FakeHostSink},
        wire::MessageBuilder,
    };

    #[test]
    fn create_pool_consumes_queued_fd() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.fd_queue.push_back(memfd(&[0u8; 64]));
        let mut host = FakeHostSink::default();
        let msg = MessageBuilder::new(7, CREATE_POOL).uint(8).int(64).finish();
        handle(&mut conn, &mut host, 7, CREATE_POOL, &msg[8..]);
        assert_eq!(conn.objects.lookup(8), Some((Interface::WlShmPool, 1)));
        assert!(conn.fd_queue.is_empty());
        assert!(conn.pools.get(8).is_some());
    }
}
