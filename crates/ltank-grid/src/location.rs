//! Tank coordinates with save/restore for speculative moves.

use ltank_core::Position;

/// Tracks where the tank is, where it was, and a checkpoint to fall back
/// to when a speculative step fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerLocationManager {
    current: Position,
    previous: Position,
    saved: Option<Position>,
}

impl PlayerLocationManager {
    /// Start at `pos`.
    pub fn new(pos: Position) -> Self {
        Self {
            current: pos,
            previous: pos,
            saved: None,
        }
    }

    /// Current position.
    pub fn current(&self) -> Position {
        self.current
    }

    /// Position before the last [`set`](Self::set).
    pub fn previous(&self) -> Position {
        self.previous
    }

    /// Move to `pos`, remembering the old position as previous.
    pub fn set(&mut self, pos: Position) {
        self.previous = self.current;
        self.current = pos;
    }

    /// Checkpoint the current position.
    pub fn save(&mut self) {
        self.saved = Some(self.current);
    }

    /// Return to the checkpoint, if any. Returns whether anything moved.
    pub fn restore(&mut self) -> bool {
        match self.saved.take() {
            Some(pos) if pos != self.current => {
                self.current = pos;
                self.previous = pos;
                true
            }
            _ => false,
        }
    }

    /// Drop the checkpoint: the speculative step succeeded.
    pub fn commit(&mut self) {
        self.saved = None;
    }

    /// Forget all history and stand at `pos`.
    pub fn reset(&mut self, pos: Position) {
        *self = Self::new(pos);
    }
}
