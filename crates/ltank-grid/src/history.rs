//! Linear undo/redo history over grid deltas.

use ltank_core::HistoryStatus;

use crate::delta::GridDelta;
use crate::grid::CellGrid;

/// One reversible action: the grid delta, what it consumed, and the
/// caller's side state on either side of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryFrame<S> {
    /// Net grid change.
    pub delta: GridDelta,
    /// Ammunition or tool classification.
    pub status: HistoryStatus,
    /// Side state before the action.
    pub before: S,
    /// Side state after the action.
    pub after: S,
    /// Whether the action appended an entry to the replay recording.
    pub recorded: bool,
    /// Arena digest after the action.
    pub digest: u64,
}

/// Undo and redo stacks of [`HistoryFrame`]s.
///
/// Each of `undo`, `redo` and `push_undo` moves the combined stack depth
/// by exactly one frame. A new action discards the redo stack.
#[derive(Clone, Debug)]
pub struct HistoryEngine<S> {
    undo: Vec<HistoryFrame<S>>,
    redo: Vec<HistoryFrame<S>>,
    last: Option<HistoryStatus>,
}

impl<S> Default for HistoryEngine<S> {
    fn default() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            last: None,
        }
    }
}

impl<S> HistoryEngine<S> {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both stacks. Called once per level load or reset.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.last = None;
    }

    /// `true` when there is a frame to undo.
    pub fn try_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// `true` when there is a frame to redo.
    pub fn try_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Record a new action. Clears the redo stack.
    pub fn push_undo(&mut self, frame: HistoryFrame<S>) {
        self.redo.clear();
        self.undo.push(frame);
    }

    /// Push a frame onto the redo stack directly.
    pub fn push_redo(&mut self, frame: HistoryFrame<S>) {
        self.redo.push(frame);
    }

    /// Reverse the newest action on `grid` and move it to the redo stack.
    /// Returns the frame so the caller can restore `before`.
    pub fn undo(&mut self, grid: &mut CellGrid) -> Option<&HistoryFrame<S>> {
        let frame = self.undo.pop()?;
        grid.apply_backward(&frame.delta);
        self.last = Some(frame.status);
        self.redo.push(frame);
        self.redo.last()
    }

    /// Reapply the newest undone action on `grid` and move it back to the
    /// undo stack. Returns the frame so the caller can restore `after`.
    pub fn redo(&mut self, grid: &mut CellGrid) -> Option<&HistoryFrame<S>> {
        let frame = self.redo.pop()?;
        grid.apply_forward(&frame.delta);
        self.last = Some(frame.status);
        self.undo.push(frame);
        self.undo.last()
    }

    /// Status of the frame most recently undone or redone.
    pub fn what_was(&self) -> Option<HistoryStatus> {
        self.last
    }

    /// Undo stack depth.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Redo stack depth.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Applied frames, oldest first.
    pub fn frames(&self) -> &[HistoryFrame<S>] {
        &self.undo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltank_core::{ArenaObject, CellAddr, Layer};

    fn act(grid: &mut CellGrid, history: &mut HistoryEngine<u32>, x: i32, n: u32) {
        grid.set(CellAddr::new(x, 0, 0, Layer::LowerObjects), ArenaObject::Block)
            .unwrap();
        history.push_undo(HistoryFrame {
            delta: grid.take_journal(),
            status: HistoryStatus::plain(),
            before: n,
            after: n + 1,
            recorded: true,
            digest: 0,
        });
    }

    #[test]
    fn undo_then_redo_is_identity() {
        let mut grid = CellGrid::new(4, 1, 1).unwrap();
        let mut history = HistoryEngine::new();
        act(&mut grid, &mut history, 1, 0);
        let after = grid.clone();
        assert_eq!(history.undo(&mut grid).map(|f| f.before), Some(0));
        assert_eq!(
            grid.get(CellAddr::new(1, 0, 0, Layer::LowerObjects)).unwrap(),
            ArenaObject::Empty
        );
        assert_eq!(history.redo(&mut grid).map(|f| f.after), Some(1));
        for x in 0..4 {
            let a = CellAddr::new(x, 0, 0, Layer::LowerObjects);
            assert_eq!(grid.get(a), after.get(a));
        }
        assert_eq!(history.what_was(), Some(HistoryStatus::plain()));
    }

    #[test]
    fn new_action_discards_redo() {
        let mut grid = CellGrid::new(4, 1, 1).unwrap();
        let mut history = HistoryEngine::new();
        act(&mut grid, &mut history, 0, 0);
        act(&mut grid, &mut history, 1, 1);
        history.undo(&mut grid);
        assert!(history.try_redo());
        act(&mut grid, &mut history, 2, 1);
        assert!(!history.try_redo());
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn empty_stacks_return_none() {
        let mut grid = CellGrid::new(1, 1, 1).unwrap();
        let mut history: HistoryEngine<()> = HistoryEngine::new();
        assert!(!history.try_undo());
        assert!(history.undo(&mut grid).is_none());
        assert!(history.redo(&mut grid).is_none());
        assert_eq!(history.what_was(), None);
    }

    #[test]
    fn pushed_redo_frame_replays_forward() {
        let mut grid = CellGrid::new(2, 1, 1).unwrap();
        let mut history = HistoryEngine::new();
        let addr = CellAddr::new(0, 0, 0, Layer::LowerObjects);
        grid.set(addr, ArenaObject::Brick).unwrap();
        let delta = grid.take_journal();
        grid.apply_backward(&delta);
        history.push_redo(HistoryFrame {
            delta,
            status: HistoryStatus::laser(),
            before: 0u32,
            after: 1,
            recorded: false,
            digest: 0,
        });
        assert!(history.try_redo());
        assert_eq!(history.redo(&mut grid).map(|f| f.after), Some(1));
        assert_eq!(grid.get(addr).unwrap(), ArenaObject::Brick);
        assert_eq!(history.what_was(), Some(HistoryStatus::laser()));
    }
}
