//! Concrete host-channel transports.
//!
//! `winway-core` only ever sees the [`winway_core::host::HostChannel`] trait; this module
//! is where the two transports this proxy supports — standard input/output of the
//! process, or a TCP socket — actually touch a file descriptor.

use std::{
    collections::VecDeque,
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    os::fd::{AsRawFd, RawFd},
};
use winway_core::host::{HostChannel, HostSink, InptRecord};

const INPT_RECORD_LEN: usize = 20;

fn decode(buf: &[u8]) -> Option<InptRecord> {
    if buf.len() != INPT_RECORD_LEN || &buf[0..4] != b"INPT" {
        return None;
    }
    let type_code = u32::from_le_bytes(buf[4..8].try_into().unwrap());
    let p1 = u32::from_le_bytes(buf[8..12].try_into().unwrap());
    let p2 = u32::from_le_bytes(buf[12..16].try_into().unwrap());
    match type_code {
        1 => Some(InptRecord::Key {
            state: p1,
            keycode: p2,
        }),
        2 => Some(InptRecord::Motion {
            x: p1 as i32,
            y: p2 as i32,
        }),
        3 => Some(InptRecord::Button {
            state: p1,
            button: p2,
        }),
        _ => {
            log::warn!("host sent an INPT record with unknown type {type_code}, dropping it");
            None
        }
    }
}

/// Buffers partial reads until one full 20-byte INPT record has arrived.
struct RecordBuffer {
    pending: VecDeque<u8>,
}

impl RecordBuffer {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }

    fn take_record(&mut self) -> Option<InptRecord> {
        if self.pending.len() < INPT_RECORD_LEN {
            return None;
        }
        let raw: Vec<u8> = self.pending.drain(..INPT_RECORD_LEN).collect();
        decode(&raw)
    }
}

/// The host channel bound to the proxy process's own stdin/stdout.
pub struct StdioChannel {
    buffer: RecordBuffer,
}

impl StdioChannel {
    pub fn new() -> Result<Self, std::io::Error> {
        set_nonblocking(std::io::stdin().as_raw_fd())?;
        Ok(Self {
            buffer: RecordBuffer::new(),
        })
    }
}

impl HostSink for StdioChannel {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), winway_core::HostError> {
        std::io::stdout()
            .write_all(bytes)
            .map_err(winway_core::HostError::Write)
    }
}

impl HostChannel for StdioChannel {
    fn raw_fd(&self) -> RawFd {
        std::io::stdin().as_raw_fd()
    }

    fn try_read_record(&mut self) -> Result<Option<InptRecord>, winway_core::HostError> {
        read_available_then_decode(std::io::stdin().as_raw_fd(), &mut self.buffer)
    }
}

/// The host channel bound to a single accepted TCP connection.
///
/// per the transport mode is a pure configuration flag; this proxy listens
/// (the same role it already plays for Wayland clients) and serves exactly the first
/// peer that connects, since there is only ever one presentation host.
pub struct TcpChannel {
    stream: TcpStream,
    buffer: RecordBuffer,
}

impl TcpChannel {
    pub fn bind_and_accept(port: u16) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        log::info!("waiting for the presentation host on tcp/{port}");
        let (stream, peer) = listener.accept()?;
        log::info!("host channel connected from {peer}");
        stream.set_nonblocking(true)?;
        Ok(Self {
            stream,
            buffer: RecordBuffer::new(),
        })
    }
}

impl HostSink for TcpChannel {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), winway_core::HostError> {
        self.stream
            .write_all(bytes)
            .map_err(winway_core::HostError::Write)
    }
}

impl HostChannel for TcpChannel {
    fn raw_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }

    fn try_read_record(&mut self) -> Result<Option<InptRecord>, winway_core::HostError> {
        if let Some(record) = self.buffer.take_record() {
            return Ok(Some(record));
        }
        let mut chunk = [0u8; 256];
        match self.stream.read(&mut chunk) {
            Ok(0) => Err(winway_core::HostError::Eof),
            Ok(n) => {
                self.buffer.push(&chunk[..n]);
                Ok(self.buffer.take_record())
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(winway_core::HostError::Read(e)),
        }
    }
}

fn read_available_then_decode(
    fd: RawFd,
    buffer: &mut RecordBuffer,
) -> Result<Option<InptRecord>, winway_core::HostError> {
    if let Some(record) = buffer.take_record() {
        return Ok(Some(record));
    }
    let mut chunk = [0u8; 256];
    match uapi::read(fd, &mut chunk) {
        Ok(0) => Err(winway_core::HostError::Eof),
        Ok(n) => {
            buffer.push(&chunk[..n]);
            Ok(buffer.take_record())
        }
        Err(uapi::Errno(uapi::c::EAGAIN)) => Ok(None),
        Err(e) => Err(winway_core::HostError::Read(e.into())),
    }
}

fn set_nonblocking(fd: RawFd) -> Result<(), std::io::Error> {
    let flags = uapi::fcntl_getfl(fd).map_err(std::io::Error::from)?;
    uapi::fcntl_setfl(fd, flags | uapi::c::O_NONBLOCK).map_err(std::io::Error::from)?;
    Ok(())
}
