//! The per-connection object table.

use crate::interface::Interface;
use std::collections::HashMap;

/// Id `1` is predefined as `wl_display` v1.
pub(crate) const DISPLAY_ID: u32 = 1;

/// A mapping from object id to (interface, version).
///
/// Grounded in `wl-proxy/src/object.rs::ObjectCore`, trimmed down: that table also tracks
/// client/server association and delete_id bookkeeping for a bidirectional proxy, none of
/// which applies here since this proxy never forwards to a second, upstream compositor.
pub(crate) struct ObjectTable {
    objects: HashMap<u32, (Interface, u32)>,
}

impl Default for ObjectTable {
    fn default() -> Self {
        let mut objects = HashMap::new();
        objects.insert(DISPLAY_ID, (Interface::WlDisplay, 1));
        Self { objects }
    }
}

impl ObjectTable {
    /// Registers `id` with the given interface and version.
    ///
    /// per duplicate inserts overwrite; this matches the original's
    /// `self.objects[nid] = (iface, ver)` (`wsl-proxy.py::handle_registry`), which never
    /// checks for a collision.
    pub(crate) fn insert(&mut self, id: u32, interface: Interface, version: u32) {
        self.objects.insert(id, (interface, version));
    }

    pub(crate) fn lookup(&self, id: u32) -> Option<(Interface, u32)> {
        self.objects.get(&id).copied()
    }

    pub(crate) fn remove(&mut self, id: u32) {
        self.objects.remove(&id);
    }

    /// Iterates over every registered (id, interface, version), in arbitrary order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, Interface, u32)> + '_ {
        self.objects
            .iter()
            .map(|(&id, &(iface, ver))| (id, iface, ver))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_preregistered() {
        let t = ObjectTable::default();
        assert_eq!(t.lookup(DISPLAY_ID), Some((Interface::WlDisplay, 1)));
    }

    #[test]
    fn duplicate_insert_overwrites() {
        let mut t = ObjectTable::default();
        t.insert(5, Interface::WlShm, 1);
        t.insert(5, Interface::WlSeat, 5);
        assert_eq!(t.lookup(5), Some((Interface::WlSeat, 5)));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let t = ObjectTable::default();
        assert_eq!(t.lookup(999), None);
    }

    #[test]
    fn remove_then_lookup_is_none() {
        let mut t = ObjectTable::default();
        t.insert(2, Interface::WlRegistry, 1);
        t.remove(2);
        assert_eq!(t.lookup(2), None);
    }
}
