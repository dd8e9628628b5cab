//! Interface handlers.
//!
//! One module per interface, each exposing a `handle` function with the same shape:
//! `(conn, host, object_id, opcode, payload) -> Vec<Vec<u8>>` of outbound events to
//! enqueue on the connection. Handlers return a list of outbound byte buffers rather than
//! writing directly, which keeps them unit-testable in isolation. Only [`surface`]'s
//! `commit` handling needs the host sink; every other handler ignores it.

pub(crate) mod buffer;
pub(crate) mod callback;
pub(crate) mod compositor;
pub(crate) mod data_device;
pub(crate) mod data_device_manager;
pub(crate) mod data_source;
pub(crate) mod display;
pub(crate) mod keyboard;
pub(crate) mod output;
pub(crate) mod pointer;
pub(crate) mod region;
pub(crate) mod registry;
pub(crate) mod seat;
pub(crate) mod shm;
pub(crate) mod shm_pool;
pub(crate) mod subcompositor;
pub(crate) mod subsurface;
pub(crate) mod surface;
pub(crate) mod xdg_surface;
pub(crate) mod xdg_toplevel;
pub(crate) mod xdg_wm_base;
