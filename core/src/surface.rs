//! Surface table backing `wl_surface` and the focus-attempt heuristic.

/// The per-connection table of live surfaces, mapping a surface's object id to its
/// currently attached buffer id (`None` when detached).
///
/// Kept in insertion order rather than as a `HashMap`: the reference implementation's
/// `self.surfaces` is a plain Python dict, whose iteration order is insertion order, and
/// `try_focus` picks `next(iter(self.surfaces))` — the "first" surface by that rule is
/// actually always the longest-lived one still alive. A linear scan over a handful of
/// surfaces is cheap enough that this does not need an index.
#[derive(Default)]
pub(crate) struct SurfaceTable {
    surfaces: Vec<(u32, Option<u32>)>,
}

impl SurfaceTable {
    pub(crate) fn create(&mut self, id: u32) {
        if !self.surfaces.iter().any(|(sid, _)| *sid == id) {
            self.surfaces.push((id, None));
        }
    }

    pub(crate) fn attach(&mut self, id: u32, buffer_id: Option<u32>) {
        if let Some(entry) = self.surfaces.iter_mut().find(|(sid, _)| *sid == id) {
            entry.1 = buffer_id;
        }
    }

    pub(crate) fn attached_buffer(&self, id: u32) -> Option<u32> {
        self.surfaces
            .iter()
            .find(|(sid, _)| *sid == id)
            .and_then(|(_, b)| *b)
    }

    pub(crate) fn remove(&mut self, id: u32) {
        self.surfaces.retain(|(sid, _)| *sid != id);
    }

    /// The surface focus-attempt should target: the first surviving
    /// surface in creation order, if any.
    pub(crate) fn first(&self) -> Option<u32> {
        self.surfaces.first().map(|(sid, _)| *sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_is_creation_order() {
        let mut t = SurfaceTable::default();
        t.create(9);
        t.create(6);
        assert_eq!(t.first(), Some(9));
        t.remove(9);
        assert_eq!(t.first(), Some(6));
    }

    #[test]
    fn attach_zero_detaches() {
        let mut t = SurfaceTable::default();
        t.create(6);
        t.attach(6, Some(9));
        assert_eq!(t.attached_buffer(6), Some(9));
        t.attach(6, None);
        assert_eq!(t.attached_buffer(6), None);
    }
}
