//! Coalesced cell changes: the grid half of a history frame.

use indexmap::IndexMap;
use ltank_core::{ArenaObject, CellAddr, Era};

/// Identity of one slot across eras.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// The era store the slot belongs to.
    pub era: Era,
    /// The slot within that era.
    pub addr: CellAddr,
}

/// Value of one slot before and after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Occupant before the action.
    pub before: ArenaObject,
    /// Occupant after the action.
    pub after: ArenaObject,
}

/// Net effect of an action on the grid.
///
/// Entries keep first-touch order, so applying a delta forward or
/// backward writes cells in a deterministic sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridDelta {
    cells: IndexMap<CellKey, CellChange>,
}

impl GridDelta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one write into the delta. The first `before` and the latest
    /// `after` win.
    pub fn record(&mut self, key: CellKey, before: ArenaObject, after: ArenaObject) {
        self.cells
            .entry(key)
            .and_modify(|change| change.after = after)
            .or_insert(CellChange { before, after });
    }

    /// Drop slots whose net change is nothing.
    pub fn prune(&mut self) {
        self.cells.retain(|_, change| change.before != change.after);
    }

    /// Number of slots touched.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The change recorded for `key`.
    pub fn get(&self, key: &CellKey) -> Option<&CellChange> {
        self.cells.get(key)
    }

    /// Changes in first-touch order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&CellKey, &CellChange)> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltank_core::Layer;

    fn key(x: i32) -> CellKey {
        CellKey {
            era: Era::Present,
            addr: CellAddr::new(x, 0, 0, Layer::LowerObjects),
        }
    }

    #[test]
    fn record_keeps_first_before_and_last_after() {
        let mut delta = GridDelta::new();
        delta.record(key(1), ArenaObject::Empty, ArenaObject::Block);
        delta.record(key(1), ArenaObject::Block, ArenaObject::Wall);
        let change = delta.get(&key(1)).unwrap();
        assert_eq!(change.before, ArenaObject::Empty);
        assert_eq!(change.after, ArenaObject::Wall);
    }

    #[test]
    fn prune_drops_reverted_slots() {
        let mut delta = GridDelta::new();
        delta.record(key(1), ArenaObject::Empty, ArenaObject::Block);
        delta.record(key(1), ArenaObject::Block, ArenaObject::Empty);
        delta.record(key(2), ArenaObject::Empty, ArenaObject::Brick);
        delta.prune();
        assert_eq!(delta.len(), 1);
        assert!(delta.get(&key(1)).is_none());
    }
}
