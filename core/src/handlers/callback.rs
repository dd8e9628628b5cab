//! `wl_callback`.
//!
//! Every callback this proxy creates (`wl_display.sync`, `wl_surface.frame`) is fired and
//! forgotten in the same dispatch that created it (see [`crate::handlers::display`],
//! [`crate::handlers::surface`]), so no client request ever actually reaches this handler
//! in practice. It exists for dispatch completeness.

use crate::{connection::Connection, host::HostSink};

pub(crate) fn handle(
    _conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    _payload: &[u8],
) -> Vec<Vec<u8>> {
    log::debug!("wl_callback: unexpected client request, opcode {opcode}");
    Vec::new()
}
