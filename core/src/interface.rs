//! The fixed set of Wayland interfaces this proxy understands.
//!
//! Grounded in `wl-proxy/src/protocols.rs::ObjectInterface`, which is a
//! `linearize::Linearize` enum so that dispatch tables keyed on it are plain arrays
//! instead of hash maps, resolved once at bind time so per-message dispatch stays
//! array-indexed.

use linearize::Linearize;

/// An interface this proxy can create objects of.
///
/// Every object in an [`crate::object::ObjectTable`] is tagged with one of these. Unlike
/// `wl-proxy`'s generated `ObjectInterface`, this enum only lists the interfaces this
/// proxy's handler set actually needs to carry a client from `get_registry` through a
/// buffer commit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Linearize)]
#[linearize(const)]
pub enum Interface {
    WlDisplay,
    WlRegistry,
    WlCompositor,
    WlSubcompositor,
    WlShm,
    WlShmPool,
    WlBuffer,
    WlSurface,
    WlRegion,
    WlCallback,
    WlSeat,
    WlPointer,
    WlKeyboard,
    WlOutput,
    WlSubsurface,
    WlDataDeviceManager,
    WlDataDevice,
    WlDataSource,
    XdgWmBase,
    XdgSurface,
    XdgToplevel,
}

impl Interface {
    /// The name as it appears on the wire (`wl_registry.bind`'s `interface` argument,
    /// `wl_registry.global`'s `interface` argument).
    pub const fn name(self) -> &'static str {
        match self {
            Interface::WlDisplay => "wl_display",
            Interface::WlRegistry => "wl_registry",
            Interface::WlCompositor => "wl_compositor",
            Interface::WlSubcompositor => "wl_subcompositor",
            Interface::WlShm => "wl_shm",
            Interface::WlShmPool => "wl_shm_pool",
            Interface::WlBuffer => "wl_buffer",
            Interface::WlSurface => "wl_surface",
            Interface::WlRegion => "wl_region",
            Interface::WlCallback => "wl_callback",
            Interface::WlSeat => "wl_seat",
            Interface::WlPointer => "wl_pointer",
            Interface::WlKeyboard => "wl_keyboard",
            Interface::WlOutput => "wl_output",
            Interface::WlSubsurface => "wl_subsurface",
            Interface::WlDataDeviceManager => "wl_data_device_manager",
            Interface::WlDataDevice => "wl_data_device",
            Interface::WlDataSource => "wl_data_source",
            Interface::XdgWmBase => "xdg_wm_base",
            Interface::XdgSurface => "xdg_surface",
            Interface::XdgToplevel => "xdg_toplevel",
        }
    }
}

/// Resolves the interface name a client supplies in `wl_registry.bind` to an
/// [`Interface`], if this proxy supports it.
///
/// A `phf::Map` gives this a compile-time-built perfect hash instead of a runtime
/// `HashMap<&str, _>`, mirroring how the pack reaches for `phf` wherever a fixed string
/// table is looked up on the hot dispatch path.
pub fn by_name(name: &str) -> Option<Interface> {
    INTERFACE_BY_NAME.get(name).copied()
}

static INTERFACE_BY_NAME: phf::Map<&'static str, Interface> = phf::phf_map! {
    "wl_display" => Interface::WlDisplay,
    "wl_registry" => Interface::WlRegistry,
    "wl_compositor" => Interface::WlCompositor,
    "wl_subcompositor" => Interface::WlSubcompositor,
    "wl_shm" => Interface::WlShm,
    "wl_shm_pool" => Interface::WlShmPool,
    "wl_buffer" => Interface::WlBuffer,
    "wl_surface" => Interface::WlSurface,
    "wl_region" => Interface::WlRegion,
    "wl_callback" => Interface::WlCallback,
    "wl_seat" => Interface::WlSeat,
    "wl_pointer" => Interface::WlPointer,
    "wl_keyboard" => Interface::WlKeyboard,
    "wl_output" => Interface::WlOutput,
    "wl_subsurface" => Interface::WlSubsurface,
    "wl_data_device_manager" => Interface::WlDataDeviceManager,
    "wl_data_device" => Interface::WlDataDevice,
    "wl_data_source" => Interface::WlDataSource,
    "xdg_wm_base" => Interface::XdgWmBase,
    "xdg_surface" => Interface::XdgSurface,
    "xdg_toplevel" => Interface::XdgToplevel,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_round_trips_through_its_name() {
        for iface in [
            Interface::WlDisplay,
            Interface::WlRegistry,
            Interface::WlCompositor,
            Interface::WlSubcompositor,
            Interface::WlShm,
            Interface::WlShmPool,
            Interface::WlBuffer,
            Interface::WlSurface,
            Interface::WlRegion,
            Interface::WlCallback,
            Interface::WlSeat,
            Interface::WlPointer,
            Interface::WlKeyboard,
            Interface::WlOutput,
            Interface::WlSubsurface,
            Interface::WlDataDeviceManager,
            Interface::WlDataDevice,
            Interface::WlDataSource,
            Interface::XdgWmBase,
            Interface::XdgSurface,
            Interface::XdgToplevel,
        ] {
            assert_eq!(by_name(iface.name()), Some(iface));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(by_name("zwlr_layer_shell_v1"), None);
    }
}
