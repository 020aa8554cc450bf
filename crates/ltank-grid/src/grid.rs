//! The multi-era cell grid.

use ltank_core::{ArenaObject, ArenaRead, CellAddr, Era, Layer, Position};

use crate::delta::{CellKey, GridDelta};
use crate::error::GridError;

/// Journal position returned by [`CellGrid::journal_mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct JournalMark(usize);

#[derive(Clone, Copy, Debug)]
struct Write {
    key: CellKey,
    before: ArenaObject,
    after: ArenaObject,
}

#[derive(Clone, Debug)]
struct EraStore {
    cells: Vec<ArenaObject>,
    initial: Vec<ArenaObject>,
}

/// Arena state addressed by `(x, y, floor, layer)` with one backing
/// store per [`Era`].
///
/// Every write marks its floor dirty and, unless it targets the
/// [`Virtual`](Layer::Virtual) layer, is appended to the journal so the
/// enclosing action can be rolled back or turned into a [`GridDelta`].
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    floors: u8,
    era: Era,
    stores: Vec<EraStore>,
    dirty: Vec<bool>,
    journal: Vec<Write>,
}

impl CellGrid {
    /// Largest accepted width or height.
    pub const MAX_DIM: u32 = 4096;

    /// Create an all-empty grid in [`Era::Present`].
    pub fn new(width: u32, height: u32, floors: u8) -> Result<Self, GridError> {
        if width == 0 || height == 0 || floors == 0 {
            return Err(GridError::EmptyGrid);
        }
        for (name, value) in [("width", width), ("height", height)] {
            if value > Self::MAX_DIM {
                return Err(GridError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        let len = width as usize * height as usize * floors as usize * Layer::COUNT;
        let store = EraStore {
            cells: vec![ArenaObject::Empty; len],
            initial: vec![ArenaObject::Empty; len],
        };
        Ok(Self {
            width,
            height,
            floors,
            era: Era::default(),
            stores: vec![store; Era::COUNT],
            dirty: vec![false; floors as usize],
            journal: Vec::new(),
        })
    }

    /// Columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Floors.
    pub fn floors(&self) -> u8 {
        self.floors
    }

    /// Number of `(x, y, floor)` cells per era.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize * self.floors as usize
    }

    /// The active era.
    pub fn era(&self) -> Era {
        self.era
    }

    /// `true` when `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height
            && pos.floor < self.floors
    }

    fn index(&self, addr: CellAddr) -> Result<usize, GridError> {
        if !self.contains(addr.position()) {
            return Err(GridError::OutOfBounds {
                x: addr.x,
                y: addr.y,
                floor: addr.floor,
            });
        }
        let cell = (addr.floor as usize * self.height as usize + addr.y as usize)
            * self.width as usize
            + addr.x as usize;
        Ok(cell * Layer::COUNT + addr.layer.index())
    }

    /// Occupant of `addr` in the active era.
    pub fn get(&self, addr: CellAddr) -> Result<ArenaObject, GridError> {
        self.get_in(self.era, addr)
    }

    /// Occupant of `addr` in `era`, active or not.
    pub fn get_in(&self, era: Era, addr: CellAddr) -> Result<ArenaObject, GridError> {
        let idx = self.index(addr)?;
        Ok(self.stores[era.id() as usize].cells[idx])
    }

    /// Replace the occupant of `addr` in the active era.
    pub fn set(&mut self, addr: CellAddr, obj: ArenaObject) -> Result<(), GridError> {
        self.set_in(self.era, addr, obj)
    }

    /// Replace the occupant of `addr` in `era`.
    pub fn set_in(&mut self, era: Era, addr: CellAddr, obj: ArenaObject) -> Result<(), GridError> {
        let idx = self.index(addr)?;
        let slot = &mut self.stores[era.id() as usize].cells[idx];
        let before = std::mem::replace(slot, obj);
        self.dirty[addr.floor as usize] = true;
        if addr.layer != Layer::Virtual && before != obj {
            self.journal.push(Write {
                key: CellKey { era, addr },
                before,
                after: obj,
            });
        }
        Ok(())
    }

    // ── Dirty tracking ─────────────────────────────────────────────

    /// `true` when the floor of `pos` needs redrawing.
    pub fn dirty(&self, pos: Position) -> Result<bool, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                floor: pos.floor,
            });
        }
        Ok(self.dirty[pos.floor as usize])
    }

    /// Flag `floor` for redraw. Out-of-range floors are ignored.
    pub fn mark_dirty(&mut self, floor: u8) {
        if let Some(flag) = self.dirty.get_mut(floor as usize) {
            *flag = true;
        }
    }

    /// Clear the redraw flag of `floor`.
    pub fn clear_dirty(&mut self, floor: u8) {
        if let Some(flag) = self.dirty.get_mut(floor as usize) {
            *flag = false;
        }
    }

    /// Drain the redraw flags, returning the floors that were dirty.
    pub fn take_dirty(&mut self) -> Vec<u8> {
        let mut floors = Vec::new();
        for (floor, flag) in self.dirty.iter_mut().enumerate() {
            if std::mem::take(flag) {
                floors.push(floor as u8);
            }
        }
        floors
    }

    fn mark_all_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|flag| *flag = true);
    }

    // ── Eras and resets ─────────────────────────────────────────────

    /// Make `era` the active store. Cell contents of every era persist.
    pub fn switch_era(&mut self, era: Era) {
        if self.era != era {
            self.era = era;
            self.mark_all_dirty();
        }
    }

    /// Snapshot the current contents of every era as the authored
    /// initial state, and forget the journal.
    pub fn commit_initial(&mut self) {
        for store in &mut self.stores {
            store.initial.clone_from(&store.cells);
        }
        self.journal.clear();
        self.mark_all_dirty();
    }

    /// Revert every era to the authored initial state and return to
    /// [`Era::Present`].
    pub fn restore(&mut self) {
        for store in &mut self.stores {
            store.cells.clone_from(&store.initial);
        }
        self.era = Era::default();
        self.journal.clear();
        self.mark_all_dirty();
    }

    /// Empty the virtual layer of every era.
    pub fn clear_virtual_layer(&mut self) {
        let virtual_idx = Layer::Virtual.index();
        let mut touched = false;
        for store in &mut self.stores {
            for cell in store.cells.iter_mut().skip(virtual_idx).step_by(Layer::COUNT) {
                if !cell.is_empty() {
                    *cell = ArenaObject::Empty;
                    touched = true;
                }
            }
        }
        if touched {
            self.mark_all_dirty();
        }
    }

    // ── Journal ─────────────────────────────────────────────────────

    /// Current journal position.
    pub fn journal_mark(&self) -> JournalMark {
        JournalMark(self.journal.len())
    }

    /// Undo every journaled write after `mark`, newest first.
    pub fn rollback_to(&mut self, mark: JournalMark) {
        while self.journal.len() > mark.0 {
            let Some(write) = self.journal.pop() else {
                break;
            };
            self.write_raw(write.key, write.before);
        }
    }

    /// Coalesce and clear the journal.
    pub fn take_journal(&mut self) -> GridDelta {
        let mut delta = GridDelta::new();
        for write in self.journal.drain(..) {
            delta.record(write.key, write.before, write.after);
        }
        delta.prune();
        delta
    }

    /// Write every `after` value of `delta` without journaling.
    pub fn apply_forward(&mut self, delta: &GridDelta) {
        for (key, change) in delta.iter() {
            self.write_raw(*key, change.after);
        }
    }

    /// Write every `before` value of `delta`, newest first, without
    /// journaling.
    pub fn apply_backward(&mut self, delta: &GridDelta) {
        for (key, change) in delta.iter().rev() {
            self.write_raw(*key, change.before);
        }
    }

    fn write_raw(&mut self, key: CellKey, obj: ArenaObject) {
        // Keys come from successful writes, so the index is in range.
        if let Ok(idx) = self.index(key.addr) {
            self.stores[key.era.id() as usize].cells[idx] = obj;
            self.dirty[key.addr.floor as usize] = true;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Positions on `layer` in the active era whose occupant satisfies
    /// `pred`, in floor/row/column order.
    pub fn find<'a>(
        &'a self,
        layer: Layer,
        mut pred: impl FnMut(ArenaObject) -> bool + 'a,
    ) -> impl Iterator<Item = (Position, ArenaObject)> + 'a {
        let (w, h) = (self.width as usize, self.height as usize);
        self.stores[self.era.id() as usize]
            .cells
            .iter()
            .skip(layer.index())
            .step_by(Layer::COUNT)
            .enumerate()
            .filter(move |(_, obj)| pred(**obj))
            .map(move |(cell, obj)| {
                let x = (cell % w) as i32;
                let y = ((cell / w) % h) as i32;
                let floor = (cell / (w * h)) as u8;
                (Position::new(x, y, floor), *obj)
            })
    }

    /// The player's tank in the active era, if present.
    pub fn find_player(&self) -> Option<(Position, ArenaObject)> {
        self.find(Layer::LowerObjects, ArenaObject::is_player).next()
    }
}

impl ArenaRead for CellGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn floors(&self) -> u8 {
        self.floors
    }

    fn era(&self) -> Era {
        self.era
    }

    fn object_at(&self, addr: CellAddr) -> Option<ArenaObject> {
        self.get(addr).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltank_core::Direction;

    fn addr(x: i32, y: i32) -> CellAddr {
        CellAddr::new(x, y, 0, Layer::LowerObjects)
    }

    #[test]
    fn empty_dimensions_rejected() {
        assert_eq!(CellGrid::new(0, 4, 1).unwrap_err(), GridError::EmptyGrid);
        assert!(matches!(
            CellGrid::new(5000, 4, 1),
            Err(GridError::DimensionTooLarge { name: "width", .. })
        ));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut grid = CellGrid::new(4, 4, 1).unwrap();
        assert_eq!(
            grid.get(addr(4, 0)),
            Err(GridError::OutOfBounds { x: 4, y: 0, floor: 0 })
        );
        assert!(grid.set(addr(-1, 0), ArenaObject::Wall).is_err());
        assert!(grid
            .set(CellAddr::new(0, 0, 1, Layer::LowerGround), ArenaObject::Ground)
            .is_err());
    }

    #[test]
    fn set_marks_floor_dirty() {
        let mut grid = CellGrid::new(4, 4, 2).unwrap();
        grid.take_dirty();
        grid.set(CellAddr::new(1, 1, 1, Layer::LowerGround), ArenaObject::Water)
            .unwrap();
        assert!(!grid.dirty(Position::new(0, 0, 0)).unwrap());
        assert!(grid.dirty(Position::new(0, 0, 1)).unwrap());
        assert_eq!(grid.take_dirty(), vec![1]);
        grid.mark_dirty(0);
        grid.clear_dirty(0);
        assert!(grid.take_dirty().is_empty());
    }

    #[test]
    fn eras_are_independent_stores() {
        let mut grid = CellGrid::new(4, 4, 1).unwrap();
        grid.set(addr(1, 1), ArenaObject::Wall).unwrap();
        grid.switch_era(Era::Past);
        assert_eq!(grid.get(addr(1, 1)).unwrap(), ArenaObject::Empty);
        assert_eq!(grid.get_in(Era::Present, addr(1, 1)).unwrap(), ArenaObject::Wall);
    }

    #[test]
    fn restore_returns_to_initial() {
        let mut grid = CellGrid::new(4, 4, 1).unwrap();
        grid.set(addr(0, 0), ArenaObject::Block).unwrap();
        grid.commit_initial();
        grid.set(addr(0, 0), ArenaObject::Empty).unwrap();
        grid.switch_era(Era::Future);
        grid.restore();
        assert_eq!(grid.era(), Era::Present);
        assert_eq!(grid.get(addr(0, 0)).unwrap(), ArenaObject::Block);
    }

    #[test]
    fn virtual_writes_are_not_journaled() {
        let mut grid = CellGrid::new(4, 4, 1).unwrap();
        let beam = CellAddr::new(2, 2, 0, Layer::Virtual);
        grid.set(beam, ArenaObject::Beam { horizontal: true }).unwrap();
        assert!(grid.take_journal().is_empty());
        grid.clear_virtual_layer();
        assert_eq!(grid.get(beam).unwrap(), ArenaObject::Empty);
    }

    #[test]
    fn rollback_restores_newest_first() {
        let mut grid = CellGrid::new(4, 4, 1).unwrap();
        let mark = grid.journal_mark();
        grid.set(addr(0, 0), ArenaObject::Block).unwrap();
        grid.set(addr(0, 0), ArenaObject::Wall).unwrap();
        grid.set(addr(1, 0), ArenaObject::Brick).unwrap();
        grid.rollback_to(mark);
        assert_eq!(grid.get(addr(0, 0)).unwrap(), ArenaObject::Empty);
        assert_eq!(grid.get(addr(1, 0)).unwrap(), ArenaObject::Empty);
        assert!(grid.take_journal().is_empty());
    }

    #[test]
    fn find_player_reports_position() {
        let mut grid = CellGrid::new(8, 6, 2).unwrap();
        let tank = ArenaObject::Tank {
            facing: Direction::Right,
        };
        grid.set(CellAddr::new(5, 3, 1, Layer::LowerObjects), tank).unwrap();
        assert_eq!(grid.find_player(), Some((Position::new(5, 3, 1), tank)));
    }
}
