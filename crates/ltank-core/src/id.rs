//! Strongly-typed coordinates, layers, eras and directions.

use std::fmt;

/// One of the parallel per-cell slots.
///
/// Every `(x, y, floor)` cell carries exactly one [`ArenaObject`](crate::ArenaObject)
/// per layer. The `Virtual` layer holds transient overlay state (beam
/// markers) and is cleared on level reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Layer {
    /// Terrain: ground, water, ice, stairs, portals, the goal.
    LowerGround = 0,
    /// Collectables lying on the terrain.
    UpperGround = 1,
    /// Obstacles, movable objects, and the tanks themselves.
    LowerObjects = 2,
    /// Canopy above the object layer.
    UpperObjects = 3,
    /// Transient overlay markers.
    Virtual = 4,
}

impl Layer {
    /// Number of layers per cell.
    pub const COUNT: usize = 5;

    /// All layers in storage order.
    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::LowerGround,
        Layer::UpperGround,
        Layer::LowerObjects,
        Layer::UpperObjects,
        Layer::Virtual,
    ];

    /// Storage index of this layer.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A named alternate timeline of the same arena.
///
/// Switching era swaps which backing store of the grid is active. Player
/// coordinates are era-independent; only cell contents differ per era.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Era {
    /// Furthest back.
    DistantPast = 0,
    /// One step back.
    Past = 1,
    /// The era every level starts in.
    #[default]
    Present = 2,
    /// One step forward.
    Future = 3,
    /// Furthest forward.
    DistantFuture = 4,
}

impl Era {
    /// Number of eras.
    pub const COUNT: usize = 5;

    /// All eras in chronological order.
    pub const ALL: [Era; Era::COUNT] = [
        Era::DistantPast,
        Era::Past,
        Era::Present,
        Era::Future,
        Era::DistantFuture,
    ];

    /// Stable numeric id of this era.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`id`](Era::id).
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DistantPast => "distant past",
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
            Self::DistantFuture => "distant future",
        };
        f.write_str(name)
    }
}

/// A movement or propagation delta.
///
/// Plain moves use unit components; boost moves use `±2` and magnet
/// moves `±3` along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    /// Horizontal component (east positive).
    pub dx: i32,
    /// Vertical component (south positive).
    pub dy: i32,
}

impl Delta {
    /// Create a delta.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// `true` for `(0, 0)`.
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// `true` when exactly one component is non-zero.
    pub fn is_axis_aligned(self) -> bool {
        (self.dx == 0) != (self.dy == 0)
    }

    /// Component-wise signum: the single-cell step in this direction.
    pub fn unit(self) -> Self {
        Self::new(self.dx.signum(), self.dy.signum())
    }

    /// Chebyshev length of the delta.
    pub fn magnitude(self) -> u32 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }

    /// The opposite delta.
    pub fn reversed(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.dx, self.dy)
    }
}

/// Cardinal facing of a tank or anti-tank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// West, `(-1, 0)`.
    Left = 0,
    /// South, `(0, 1)`.
    Down = 1,
    /// East, `(1, 0)`.
    Right = 2,
    /// North, `(0, -1)`.
    #[default]
    Up = 3,
}

impl Direction {
    /// All directions in code order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Unit delta for this direction.
    pub fn delta(self) -> Delta {
        match self {
            Self::Left => Delta::new(-1, 0),
            Self::Down => Delta::new(0, 1),
            Self::Right => Delta::new(1, 0),
            Self::Up => Delta::new(0, -1),
        }
    }

    /// Direction of an axis-aligned delta of any length.
    pub fn from_delta(delta: Delta) -> Option<Self> {
        if !delta.is_axis_aligned() {
            return None;
        }
        match (delta.dx.signum(), delta.dy.signum()) {
            (-1, 0) => Some(Self::Left),
            (0, 1) => Some(Self::Down),
            (1, 0) => Some(Self::Right),
            (0, -1) => Some(Self::Up),
            _ => None,
        }
    }

    /// The reverse direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }

    /// `true` for `Left` and `Right`.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Stable 2-bit code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Direction::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

/// Tank coordinates: `(x, y, floor)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Floor index.
    pub floor: u8,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32, floor: u8) -> Self {
        Self { x, y, floor }
    }

    /// The position `delta` away on the same floor.
    pub fn offset(self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy, self.floor)
    }

    /// The same `(x, y)` on another floor.
    pub fn with_floor(self, floor: u8) -> Self {
        Self::new(self.x, self.y, floor)
    }

    /// Address of `layer` at this position.
    pub fn at(self, layer: Layer) -> CellAddr {
        CellAddr::new(self.x, self.y, self.floor, layer)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) floor {}", self.x, self.y, self.floor)
    }
}

/// Address of one slot within the active era: `(x, y, floor, layer)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellAddr {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Floor index.
    pub floor: u8,
    /// Slot within the cell.
    pub layer: Layer,
}

impl CellAddr {
    /// Create an address.
    pub const fn new(x: i32, y: i32, floor: u8, layer: Layer) -> Self {
        Self {
            x,
            y,
            floor,
            layer,
        }
    }

    /// The `(x, y, floor)` part of the address.
    pub fn position(self) -> Position {
        Position::new(self.x, self.y, self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_ids_roundtrip() {
        for era in Era::ALL {
            assert_eq!(Era::from_id(era.id()), Some(era));
        }
        assert_eq!(Era::from_id(5), None);
    }

    #[test]
    fn direction_from_delta_uses_sign() {
        assert_eq!(Direction::from_delta(Delta::new(2, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta(Delta::new(0, -3)), Some(Direction::Up));
        assert_eq!(Direction::from_delta(Delta::new(1, 1)), None);
        assert_eq!(Direction::from_delta(Delta::new(0, 0)), None);
    }

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.opposite().delta(), d.delta().reversed());
        }
    }

    #[test]
    fn delta_unit_and_magnitude() {
        let boost = Delta::new(-2, 0);
        assert_eq!(boost.unit(), Delta::new(-1, 0));
        assert_eq!(boost.magnitude(), 2);
        assert!(boost.is_axis_aligned());
        assert!(!Delta::new(1, 1).is_axis_aligned());
    }
}
