//! PIXL/INPT host-channel framing.
//!
//! The transport behind this boundary (stdio or TCP) is deliberately out of scope here —
//! `winway-proxy` wires a concrete [`HostSink`]/byte source to it. This module only knows
//! how to build and parse the two record shapes.

use crate::error::HostError;

/// Something PIXL records can be written to.
///
/// This crate is oblivious to which transport is in use; `winway-proxy` supplies the real
/// stdio/TCP implementation, tests supply an in-memory one (see [`crate::test_framework`]).
pub trait HostSink {
    /// Writes the given bytes in full, or fails.
    ///
    /// A write failure here is logged by the caller and the event loop continues; it must
    /// never tear down a client connection.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), HostError>;
}

/// Builds one PIXL record.
///
/// `pixels` must already be stride-stripped: `width * height * 4` tightly packed bytes.
pub(crate) fn encode_pixl(surface_id: u32, width: u32, height: u32, format: u32, pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(24 + pixels.len());
    out.extend_from_slice(b"PIXL");
    out.extend_from_slice(&surface_id.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&format.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(pixels);
    out
}

/// A decoded INPT record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InptRecord {
    Key { state: u32, keycode: u32 },
    Motion { x: i32, y: i32 },
    Button { state: u32, button: u32 },
}

/// Parses one fixed 20-byte INPT record.
///
/// Returns `None` for a bad magic or an unrecognised type code; these are simply
/// dropped by the caller, same as an unknown opcode.
pub(crate) fn decode_inpt(bytes: &[u8]) -> Option<InptRecord> {
    if bytes.len() != 20 || &bytes[0..4] != b"INPT" {
        return None;
    }
    let type_code = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let p1 = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    let p2 = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
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
        _ => None,
    }
}

pub(crate) const INPT_RECORD_LEN: usize = 20;

/// The full host boundary: a [`HostSink`] plus the ability to pull decoded
/// INPT records and to be registered with the readiness multiplexer.
///
/// `winway-proxy` implements this once for stdio and once for TCP; the core event loop
/// (`crate::server`) only ever sees this trait and stays oblivious to which transport is
/// actually in use.
pub trait HostChannel: HostSink {
    /// The underlying fd, so the event loop can poll it for readability alongside client
    /// sockets.
    fn raw_fd(&self) -> std::os::fd::RawFd;

    /// Reads and consumes exactly one INPT record if one is fully buffered.
    ///
    /// A malformed or unrecognised record is treated the same as an unknown opcode: it is
    /// dropped and `Ok(None)` is returned so the caller just moves on to the next
    /// readiness notification, rather than tearing down the process.
    fn try_read_record(&mut self) -> Result<Option<InptRecord>, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixl_header_has_expected_layout() {
        let rec = encode_pixl(6, 400, 300, 1, &[0xAAu8; 480_000]);
        assert_eq!(&rec[0..4], b"PIXL");
        assert_eq!(u32::from_le_bytes(rec[4..8].try_into().unwrap()), 6);
        assert_eq!(u32::from_le_bytes(rec[8..12].try_into().unwrap()), 400);
        assert_eq!(u32::from_le_bytes(rec[12..16].try_into().unwrap()), 300);
        assert_eq!(u32::from_le_bytes(rec[16..20].try_into().unwrap()), 1);
        assert_eq!(
            u32::from_le_bytes(rec[20..24].try_into().unwrap()),
            480_000
        );
        assert_eq!(rec.len(), 24 + 480_000);
    }

    #[test]
    fn inpt_motion_decodes() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"INPT");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(&200u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(
            decode_inpt(&bytes),
            Some(InptRecord::Motion { x: 100, y: 200 })
        );
    }

    #[test]
    fn bad_magic_is_none() {
        let bytes = [0u8; 20];
        assert_eq!(decode_inpt(&bytes), None);
    }
}
