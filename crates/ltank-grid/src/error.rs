//! Grid-specific error types.

use std::error::Error;
use std::fmt;

use ltank_core::SimError;

/// Errors from grid construction and cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside the grid. Callers treat this as a no-op and
    /// restore the previous player position.
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Floor.
        floor: u8,
    },
    /// A grid must have at least one cell.
    EmptyGrid,
    /// A dimension exceeds what coordinates can address.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The maximum permitted.
        max: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y, floor } => {
                write!(f, "({x}, {y}) floor {floor} is out of bounds")
            }
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
        }
    }
}

impl Error for GridError {}

impl From<GridError> for SimError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds { x, y, floor } => SimError::Bounds { x, y, floor },
            other => SimError::InvalidArena {
                reason: other.to_string(),
            },
        }
    }
}
