//! `xdg_toplevel`.
//!
//! Every opcode (`destroy`, `set_parent`, `set_title`, `set_app_id`, `move`, `resize`,
//! ...) is a no-op; this proxy never needs a client's window-management requests to carry
//! pixels to the host.

use crate::{connection::Connection, host::HostSink};

pub(crate) fn handle(
    _conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    _opcode: u16,
    _payload: &[u8],
) -> Vec<Vec<u8>> {
    Vec::new()
}
