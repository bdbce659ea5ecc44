use crate::overlay::BlurOverlay;

/// Handle to an overlay owned by an [`OverlaySet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub(crate) u32);

/// Slot storage for overlays. Ids are never reused, so a stale hook can't reach a newer overlay.
#[derive(Default)]
pub struct OverlaySet {
    slots: Vec<Option<BlurOverlay>>,
    live: usize,
}

impl OverlaySet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `overlay` and hand out a fresh id for it.
    pub fn insert(&mut self, overlay: BlurOverlay) -> OverlayId {
        let id = OverlayId(self.slots.len() as u32);
        self.slots.push(Some(overlay));
        self.live += 1;
        id
    }

    /// The overlay behind `id`, unless it was removed.
    pub fn get(&self, id: OverlayId) -> Option<&BlurOverlay> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Mutable access to the overlay behind `id`, unless it was removed.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut BlurOverlay> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Remove and return the overlay. The id stays retired.
    pub fn remove(&mut self, id: OverlayId) -> Option<BlurOverlay> {
        let removed = self.slots.get_mut(id.0 as usize).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Number of overlays currently held.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/set.rs"]
mod tests;
