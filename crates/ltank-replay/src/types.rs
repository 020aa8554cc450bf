//! Replay alphabet and decoded solution types.

use ltank_core::{Delta, Direction};

/// One recorded player intent.
///
/// Coarser than a history frame: it captures what the player asked for,
/// and replay re-derives everything else by running the same rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReplayEntry {
    /// Fire the tank's laser.
    Shoot = 0x20,
    /// Move west.
    MoveLeft = 0x25,
    /// Move south.
    MoveDown = 0x26,
    /// Move east.
    MoveRight = 0x27,
    /// Move north.
    MoveUp = 0x28,
}

impl ReplayEntry {
    /// Byte written to the solution file.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](ReplayEntry::code).
    pub fn from_code(byte: u8) -> Option<Self> {
        match byte {
            0x20 => Some(Self::Shoot),
            0x25 => Some(Self::MoveLeft),
            0x26 => Some(Self::MoveDown),
            0x27 => Some(Self::MoveRight),
            0x28 => Some(Self::MoveUp),
            _ => None,
        }
    }

    /// Classify a player intent. Shots ignore the delta; moves must be a
    /// single axis-aligned step.
    pub fn from_intent(is_shoot: bool, dx: i32, dy: i32) -> Option<Self> {
        if is_shoot {
            return Some(Self::Shoot);
        }
        let delta = Delta::new(dx, dy);
        if delta.magnitude() != 1 {
            return None;
        }
        Direction::from_delta(delta).map(Self::from_direction)
    }

    /// The move entry for `dir`.
    pub fn from_direction(dir: Direction) -> Self {
        match dir {
            Direction::Left => Self::MoveLeft,
            Direction::Down => Self::MoveDown,
            Direction::Right => Self::MoveRight,
            Direction::Up => Self::MoveUp,
        }
    }

    /// Direction of a move entry; `None` for [`Shoot`](ReplayEntry::Shoot).
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Shoot => None,
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveRight => Some(Direction::Right),
            Self::MoveUp => Some(Direction::Up),
        }
    }
}

/// Metadata stored ahead of the entries in a solution file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionHeader {
    /// Level name, at most 31 bytes once encoded.
    pub level_name: String,
    /// Author, at most 31 bytes once encoded.
    pub author: String,
    /// Level number within its set.
    pub level_number: u16,
}

/// A decoded solution file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    /// Header fields.
    pub header: SolutionHeader,
    /// Recorded intents, oldest first.
    pub entries: Vec<ReplayEntry>,
}
