//! `wl_data_device_manager`.

use crate::{connection::Connection, host::HostSink, interface::Interface, wire::MessageReader};

// Opcode numbering here matches `wsl-proxy.py`'s `wl_data_device_manager` dispatch, not
// upstream Wayland's: op 0 is `get_data_device`, op 1 is `create_data_source`.
const GET_DATA_DEVICE: u16 = 0;
const CREATE_DATA_SOURCE: u16 = 1;

pub(crate) fn handle(
    conn: &mut Connection,
    _host: &mut impl HostSink,
    _object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Vec<Vec<u8>> {
    let mut reader = MessageReader::new(payload);
    match opcode {
        CREATE_DATA_SOURCE => {
            let Some(new_id) = reader.new_id() else {
                return Vec::new();
            };
            conn.objects.insert(new_id, Interface::WlDataSource, 1);
            Vec::new()
        }
        GET_DATA_DEVICE => {
            let Some(new_id) = reader.new_id() else {
                return Vec::new();
            };
            let _seat = reader.object();
            conn.objects.insert(new_id, Interface::WlDataDevice, 1);
            Vec::new()
        }
        _ => {
            log::debug!("wl_data_device_manager: unknown opcode {opcode}, skipping");
            Vec::new()
        }
    }
}
