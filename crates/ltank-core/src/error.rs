//! Error types for the ltank simulation.
//!
//! [`SimError`] is the taxonomy every resolution run reports through.
//! Grid-local failures are converted into it at the step boundary; codec
//! failures live in `ltank-replay`.

use std::error::Error;
use std::fmt;

/// Why a request was refused before touching the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The selected ammunition slot is empty.
    NoAmmo,
    /// A non-green laser was requested without its mode selected.
    AmmoNotSelected,
    /// The delta is zero or longer than the entry point accepts.
    InvalidDelta,
    /// Lasers, boosts and magnets need an axis-aligned direction.
    NotAxisAligned,
    /// The destination is solid and cannot be pushed.
    Blocked,
    /// An object push named a cell with nothing movable in it.
    NothingToPush,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAmmo => write!(f, "no ammunition left"),
            Self::AmmoNotSelected => write!(f, "ammunition mode not selected"),
            Self::InvalidDelta => write!(f, "invalid delta"),
            Self::NotAxisAligned => write!(f, "direction is not axis-aligned"),
            Self::Blocked => write!(f, "destination blocked"),
            Self::NothingToPush => write!(f, "nothing to push"),
        }
    }
}

/// Errors from a simulation run or the worker protocol around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// A coordinate fell outside the grid. Recoverable: the step is
    /// undone and the player restored.
    Bounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Floor.
        floor: u8,
    },
    /// The arena is unusable, e.g. no player marker after a level switch.
    InvalidArena {
        /// What is wrong.
        reason: String,
    },
    /// The player is already dead.
    AlreadyDead,
    /// The request was refused up front; no history frame was produced.
    Rejected {
        /// Why.
        reason: RejectReason,
    },
    /// A run was started while another is alive.
    WorkerBusy,
    /// `start()` was called with no request armed.
    NoRequest,
    /// The session is owned by a run that has not been joined.
    NotJoined,
    /// The worker thread panicked and took the session with it.
    SessionLost,
    /// The OS refused to spawn the worker thread.
    ThreadSpawnFailed {
        /// The I/O error text.
        reason: String,
    },
    /// The recording contains intents a solution file cannot express.
    Unreplayable,
    /// Undo or redo with an empty stack.
    HistoryEmpty,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounds { x, y, floor } => {
                write!(f, "({x}, {y}) floor {floor} is outside the arena")
            }
            Self::InvalidArena { reason } => write!(f, "invalid arena: {reason}"),
            Self::AlreadyDead => write!(f, "the tank is already dead"),
            Self::Rejected { reason } => write!(f, "request rejected: {reason}"),
            Self::WorkerBusy => write!(f, "a simulation run is already alive"),
            Self::NoRequest => write!(f, "no request armed"),
            Self::NotJoined => write!(f, "previous run has not been joined"),
            Self::SessionLost => write!(f, "worker thread panicked; session lost"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn worker thread: {reason}")
            }
            Self::Unreplayable => write!(f, "recording cannot be saved as a solution"),
            Self::HistoryEmpty => write!(f, "nothing to undo or redo"),
        }
    }
}

impl Error for SimError {}

impl From<RejectReason> for SimError {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }
}

impl SimError {
    /// `true` for failures the orchestrator reports and carries on from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SessionLost | Self::ThreadSpawnFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_converts_and_displays() {
        let err: SimError = RejectReason::NoAmmo.into();
        assert_eq!(err.to_string(), "request rejected: no ammunition left");
        assert!(err.is_recoverable());
    }

    #[test]
    fn lost_session_is_fatal() {
        assert!(!SimError::SessionLost.is_recoverable());
    }
}
