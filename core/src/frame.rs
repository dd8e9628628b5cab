//! The frame extractor.

use crate::{
    buffer::Format,
    connection::Connection,
    error::HostError,
    host::{encode_pixl, HostSink},
    wire::MessageBuilder,
};

/// Opcode of `wl_buffer.release`.
const BUFFER_RELEASE_OPCODE: u16 = 0;

/// Runs the frame extractor for a `wl_surface.commit` on `surface_id`.
///
/// A commit with no attached, live buffer is a silent no-op, matching the reference
/// implementation's behavior verbatim. On success this writes one PIXL record to `host`
/// and returns one `wl_buffer.release` event for the caller to enqueue on the connection —
/// always *after* the PIXL bytes have been written, so a client can never recycle memory
/// the host hasn't finished reading yet.
pub(crate) fn extract_frame(
    conn: &mut Connection,
    surface_id: u32,
    host: &mut impl HostSink,
) -> Result<Option<Vec<u8>>, HostError> {
    let Some(buffer_id) = conn.surfaces.attached_buffer(surface_id) else {
        return Ok(None);
    };
    let Some(buffer) = conn.buffers.get(buffer_id) else {
        return Ok(None);
    };
    let Some(pool) = conn.pools.get(buffer.pool_id) else {
        return Ok(None);
    };
    let Some(bytes) = pool.bytes() else {
        // mmap of this pool failed earlier; skip silently.
        return Ok(None);
    };
    if Format::from_wire(buffer.format).is_none() {
        // The client registered this buffer with a format this proxy doesn't recognise;
        // it stays a valid object (see `handlers::shm_pool`) but there is nothing sane to
        // extract pixels as, so the commit is a silent no-op, same as a missing buffer.
        return Ok(None);
    }

    let row = (buffer.width as usize) * 4;
    let offset = buffer.offset as usize;
    let stride = buffer.stride as usize;
    let height = buffer.height as usize;
    let pool_size = pool.size();

    let mut rows_fit = 0usize;
    for y in 0..height {
        let row_end = offset + y * stride + row;
        if row_end > pool_size {
            break;
        }
        rows_fit += 1;
    }

    let mut pixels = Vec::with_capacity(rows_fit * row);
    for y in 0..rows_fit {
        let start = offset + y * stride;
        pixels.extend_from_slice(&bytes[start..start + row]);
    }

    let record = encode_pixl(
        surface_id,
        buffer.width as u32,
        buffer.height as u32,
        buffer.format,
        &pixels,
    );
    host.write_all(&record)?;

    let release = MessageBuilder::new(buffer_id, BUFFER_RELEASE_OPCODE).finish();
    Ok(Some(release))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buffer::Buffer,
        test_framework::{dummy_socket, memfd, FakeHostSink},
    };

    fn setup(rows: i32, stride: i32, pool_bytes: &[u8]) -> Connection {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let fd = memfd(pool_bytes);
        conn.pools.create(8, fd, pool_bytes.len() as u32);
        conn.buffers.insert(
            9,
            Buffer {
                pool_id: 8,
                offset: 0,
                width: 400,
                height: rows,
                stride,
                format: Format::Xrgb8888.to_wire(),
            },
        );
        conn.surfaces.attach(6, Some(9));
        conn
    }

    #[test]
    fn commit_with_unrecognised_format_is_silent() {
        let data = vec![0xAAu8; 400 * 300 * 4];
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let fd = memfd(&data);
        conn.pools.create(8, fd, data.len() as u32);
        conn.buffers.insert(
            9,
            Buffer {
                pool_id: 8,
                offset: 0,
                width: 400,
                height: 300,
                stride: 1600,
                format: 99,
            },
        );
        conn.surfaces.attach(6, Some(9));
        let mut host = FakeHostSink::default();
        let result = extract_frame(&mut conn, 6, &mut host).unwrap();
        assert!(result.is_none());
        assert!(host.written.is_empty());
    }

    #[test]
    fn commit_with_no_buffer_is_silent() {
        let mut conn = Connection::new(0, dummy_socket());
        conn.surfaces.create(6);
        let mut host = FakeHostSink::default();
        let result = extract_frame(&mut conn, 6, &mut host).unwrap();
        assert!(result.is_none());
        assert!(host.written.is_empty());
    }

    #[test]
    fn commit_emits_pixl_then_release() {
        let data = vec![0xAAu8; 400 * 300 * 4];
        let mut conn = setup(300, 1600, &data);
        let mut host = FakeHostSink::default();
        let release = extract_frame(&mut conn, 6, &mut host).unwrap().unwrap();

        assert_eq!(host.written.len(), 1);
        let rec = &host.written[0];
        assert_eq!(&rec[0..4], b"PIXL");
        assert_eq!(u32::from_le_bytes(rec[20..24].try_into().unwrap()), 480_000);
        assert_eq!(&rec[24..], &data[..]);

        let size = (u32::from_le_bytes(release[4..8].try_into().unwrap()) >> 16) as usize;
        assert_eq!(size, release.len());
        assert_eq!(u32::from_le_bytes(release[0..4].try_into().unwrap()), 9);
    }

    #[test]
    fn partial_rows_are_truncated_to_pool_bounds() {
        // Only room for 2 full rows of a 400px-wide buffer at stride 1600.
        let data = vec![0x55u8; 3200];
        let mut conn = setup(300, 1600, &data);
        let mut host = FakeHostSink::default();
        extract_frame(&mut conn, 6, &mut host).unwrap();
        let rec = &host.written[0];
        let len = u32::from_le_bytes(rec[20..24].try_into().unwrap()) as usize;
        assert_eq!(len, 2 * 1600);
    }
}
