//! Resolution requests, run reports, and cooperative step control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ltank_core::{ArenaObject, BombKind, HistoryStatus, LaserType, Position};

/// Who fired a laser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shooter {
    /// The player's tank. Charges ammunition and counts as a shot.
    Player,
    /// A turret at the given position.
    Enemy(Position),
}

/// One MLO run: exactly one player intent or external event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Move the tank. Unit deltas (diagonals included) are plain moves,
    /// `±2` on one axis is a boost and `±3` a magnet.
    Movement {
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
    /// Move the tank one cell without turning it.
    FrozenMovement {
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
    /// Fire a beam from `(ox, oy)` on the player's floor.
    Laser {
        /// Horizontal direction.
        dx: i32,
        /// Vertical direction.
        dy: i32,
        /// Origin column.
        ox: i32,
        /// Origin row.
        oy: i32,
        /// Beam type.
        laser: LaserType,
        /// Who fired.
        shooter: Shooter,
    },
    /// Push the movable object at `(x, y)` on the player's floor one cell.
    Objects {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Horizontal push.
        dx: i32,
        /// Vertical push.
        dy: i32,
        /// The object expected there; `None` accepts any movable object.
        obj: Option<ArenaObject>,
    },
    /// Detonate a bomb centred on the tank.
    Blast {
        /// Bomb sub-type.
        kind: BombKind,
    },
}

/// Result of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Classification of the history frame pushed, or `None` when the run
    /// changed nothing.
    pub status: Option<HistoryStatus>,
    /// The run appended an entry to the replay recording.
    pub recorded: bool,
    /// The run stopped early on an abort request.
    pub aborted: bool,
    /// Player position after the run.
    pub player: Position,
    /// The tank is dead.
    pub dead: bool,
    /// The level is solved.
    pub solved: bool,
}

/// Cancellation and pacing shared between a run and its owner.
///
/// Each discrete step (one push, one cell of beam travel, one slide, one
/// blast cell) checks the flags before it starts, so an aborted run
/// always stops on a step boundary.
#[derive(Clone, Debug, Default)]
pub struct StepControl {
    abort: Arc<AtomicBool>,
    halt: Arc<AtomicBool>,
    step_delay: Duration,
}

impl StepControl {
    /// Control sharing the given flags.
    pub fn new(abort: Arc<AtomicBool>, halt: Arc<AtomicBool>, step_delay: Duration) -> Self {
        Self {
            abort,
            halt,
            step_delay,
        }
    }

    /// Control with private flags and no pacing, for synchronous use.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Ask the run to stop at the next step boundary.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    /// `true` once an abort was requested.
    pub fn aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Ask sliding objects to stop where they are.
    pub fn halt(&self) {
        self.halt.store(true, Ordering::Release);
    }

    /// `true` once a halt was requested.
    pub fn halted(&self) -> bool {
        self.halt.load(Ordering::Acquire)
    }

    pub(crate) fn pace(&self) {
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_flags() {
        let ctl = StepControl::detached();
        let other = ctl.clone();
        assert!(!other.aborted());
        ctl.abort();
        assert!(other.aborted());
        assert!(!other.halted());
        other.halt();
        assert!(ctl.halted());
    }
}
