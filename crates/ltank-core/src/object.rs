//! The closed set of arena objects and their capability queries.
//!
//! Every slot of the grid holds exactly one [`ArenaObject`]. Behaviour
//! that used to hang off a class hierarchy is expressed as a
//! [`Capabilities`] implementation dispatched by pattern match.

use crate::id::{Direction, Era, Layer};
use crate::inventory::AmmoKind;

/// Orientation of a mirror, named after the two faces that reflect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MirrorKind {
    /// Reflects beams arriving from the north or east.
    NorthEast = 0,
    /// Reflects beams arriving from the south or east.
    SouthEast = 1,
    /// Reflects beams arriving from the south or west.
    SouthWest = 2,
    /// Reflects beams arriving from the north or west.
    NorthWest = 3,
}

impl MirrorKind {
    const ALL: [MirrorKind; 4] = [
        MirrorKind::NorthEast,
        MirrorKind::SouthEast,
        MirrorKind::SouthWest,
        MirrorKind::NorthWest,
    ];

    /// The orientation after a quarter turn clockwise.
    pub fn rotated(self) -> Self {
        match self {
            Self::NorthEast => Self::SouthEast,
            Self::SouthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthWest,
            Self::NorthWest => Self::NorthEast,
        }
    }

    /// Outgoing direction for a beam travelling in `travel`, or `None`
    /// when the beam strikes the mirror's back.
    pub fn reflect(self, travel: Direction) -> Option<Direction> {
        use Direction::*;
        match (self, travel) {
            (Self::NorthEast, Down) => Some(Right),
            (Self::NorthEast, Left) => Some(Up),
            (Self::SouthEast, Up) => Some(Right),
            (Self::SouthEast, Left) => Some(Down),
            (Self::SouthWest, Up) => Some(Left),
            (Self::SouthWest, Right) => Some(Down),
            (Self::NorthWest, Down) => Some(Left),
            (Self::NorthWest, Right) => Some(Up),
            _ => None,
        }
    }
}

/// One occupant of a grid slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArenaObject {
    /// Nothing.
    #[default]
    Empty,
    /// Plain floor.
    Ground,
    /// Deep water: drowns tanks, swallows pushed objects.
    Water,
    /// Slippery ice: movers keep sliding.
    Ice,
    /// Ice that breaks into water once its occupant leaves.
    ThinIce,
    /// Sunken block; walkable.
    Bridge,
    /// Level exit.
    Goal,
    /// Staircase to the floor above (`up`) or below.
    Stairs {
        /// Direction of travel.
        up: bool,
    },
    /// Portal into another era.
    TimePortal {
        /// Destination era.
        era: Era,
    },
    /// A gate key.
    Key,
    /// Ammunition or a tool lying on the ground.
    Pickup(AmmoKind),
    /// Indestructible except by missiles.
    Wall,
    /// Destructible wall.
    Brick,
    /// Pushable block.
    Block,
    /// Pushable two-faced mirror.
    Mirror(MirrorKind),
    /// A gate; passable when open.
    Gate {
        /// Whether the gate is open.
        open: bool,
    },
    /// Enemy turret. Stunned turrets do not fire.
    AntiTank {
        /// Firing direction.
        facing: Direction,
        /// Remaining stunned ticks.
        stun: u8,
    },
    /// A turret that looks like a block until revealed.
    AntiTankDisguise {
        /// Firing direction once revealed.
        facing: Direction,
    },
    /// Wreck of a turret; pushable.
    DeadAntiTank,
    /// The player's tank.
    Tank {
        /// Facing.
        facing: Direction,
    },
    /// The player's tank with laser-absorbing armour.
    PowerfulTank {
        /// Facing.
        facing: Direction,
    },
    /// Canopy; hides what is below, burns.
    Tree,
    /// Transient beam marker on the virtual layer.
    Beam {
        /// Orientation of the beam segment.
        horizontal: bool,
    },
}

const TAG_SHIFT: u32 = 24;
const STUN_SHIFT: u32 = 8;

impl ArenaObject {
    /// Stable opaque cell code. The tag lives in the top byte; variant
    /// parameters occupy the low bits.
    pub fn to_code(self) -> u32 {
        let params = match self {
            Self::Stairs { up } => up as u32,
            Self::TimePortal { era } => era.id() as u32,
            Self::Pickup(kind) => kind.code() as u32,
            Self::Mirror(kind) => kind as u32,
            Self::Gate { open } => open as u32,
            Self::AntiTank { facing, stun } => {
                facing.code() as u32 | (stun as u32) << STUN_SHIFT
            }
            Self::AntiTankDisguise { facing }
            | Self::Tank { facing }
            | Self::PowerfulTank { facing } => facing.code() as u32,
            Self::Beam { horizontal } => horizontal as u32,
            _ => 0,
        };
        (self.type_tag() as u32) << TAG_SHIFT | params
    }

    /// Inverse of [`to_code`](ArenaObject::to_code). Returns `None` for
    /// unknown tags or out-of-range parameters.
    pub fn from_code(code: u32) -> Option<Self> {
        let tag = (code >> TAG_SHIFT) as u8;
        let low = (code & 0xff) as u8;
        let facing = || Direction::from_code(low & 0b11);
        let obj = match tag {
            0 => Self::Empty,
            1 => Self::Ground,
            2 => Self::Water,
            3 => Self::Ice,
            4 => Self::ThinIce,
            5 => Self::Bridge,
            6 => Self::Goal,
            7 => Self::Stairs { up: low & 1 == 1 },
            8 => Self::TimePortal {
                era: Era::from_id(low)?,
            },
            9 => Self::Key,
            10 => Self::Pickup(AmmoKind::from_code(low)?),
            11 => Self::Wall,
            12 => Self::Brick,
            13 => Self::Block,
            14 => Self::Mirror(*MirrorKind::ALL.get(low as usize)?),
            15 => Self::Gate { open: low & 1 == 1 },
            16 => Self::AntiTank {
                facing: facing()?,
                stun: (code >> STUN_SHIFT) as u8,
            },
            17 => Self::AntiTankDisguise { facing: facing()? },
            18 => Self::DeadAntiTank,
            19 => Self::Tank { facing: facing()? },
            20 => Self::PowerfulTank { facing: facing()? },
            21 => Self::Tree,
            22 => Self::Beam {
                horizontal: low & 1 == 1,
            },
            _ => return None,
        };
        Some(obj)
    }

    /// `true` for `Empty`.
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// `true` for the player's tank variants.
    pub fn is_player(self) -> bool {
        matches!(self, Self::Tank { .. } | Self::PowerfulTank { .. })
    }

    /// Facing of a directional object.
    pub fn facing(self) -> Option<Direction> {
        match self {
            Self::AntiTank { facing, .. }
            | Self::AntiTankDisguise { facing }
            | Self::Tank { facing }
            | Self::PowerfulTank { facing } => Some(facing),
            _ => None,
        }
    }

    /// The same object turned to `facing`; non-directional objects are
    /// returned unchanged.
    pub fn with_facing(self, facing: Direction) -> Self {
        match self {
            Self::AntiTank { stun, .. } => Self::AntiTank { facing, stun },
            Self::AntiTankDisguise { .. } => Self::AntiTankDisguise { facing },
            Self::Tank { .. } => Self::Tank { facing },
            Self::PowerfulTank { .. } => Self::PowerfulTank { facing },
            other => other,
        }
    }

    /// The layer this object is authored on. `None` for `Empty`, which is
    /// valid everywhere.
    pub fn native_layer(self) -> Option<Layer> {
        match self {
            Self::Empty => None,
            Self::Ground
            | Self::Water
            | Self::Ice
            | Self::ThinIce
            | Self::Bridge
            | Self::Goal
            | Self::Stairs { .. }
            | Self::TimePortal { .. } => Some(Layer::LowerGround),
            Self::Key | Self::Pickup(_) => Some(Layer::UpperGround),
            Self::Tree => Some(Layer::UpperObjects),
            Self::Beam { .. } => Some(Layer::Virtual),
            _ => Some(Layer::LowerObjects),
        }
    }
}

/// Capability queries the resolution rules dispatch on.
pub trait Capabilities {
    /// Blocks movement into its cell.
    fn is_solid(&self) -> bool;

    /// Can be pushed by tanks and lasers.
    fn is_movable(&self) -> bool;

    /// A tank or turret.
    fn is_character(&self) -> bool;

    /// Outgoing direction for a beam travelling in `travel`, if the
    /// object reflects it.
    fn reflect(&self, travel: Direction) -> Option<Direction>;

    /// What this object turns into once its occupant leaves.
    fn decays_into(&self) -> Option<ArenaObject>;

    /// Resistance to blasts; `None` means blasts pass over it.
    fn hardness(&self) -> Option<u8>;

    /// Stable numeric variant tag.
    fn type_tag(&self) -> u8;
}

impl Capabilities for ArenaObject {
    fn is_solid(&self) -> bool {
        match self {
            Self::Gate { open } => !open,
            Self::Wall
            | Self::Brick
            | Self::Block
            | Self::Mirror(_)
            | Self::AntiTank { .. }
            | Self::AntiTankDisguise { .. }
            | Self::DeadAntiTank
            | Self::Tank { .. }
            | Self::PowerfulTank { .. } => true,
            _ => false,
        }
    }

    fn is_movable(&self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::Mirror(_)
                | Self::AntiTank { .. }
                | Self::AntiTankDisguise { .. }
                | Self::DeadAntiTank
        )
    }

    fn is_character(&self) -> bool {
        matches!(
            self,
            Self::AntiTank { .. }
                | Self::AntiTankDisguise { .. }
                | Self::Tank { .. }
                | Self::PowerfulTank { .. }
        )
    }

    fn reflect(&self, travel: Direction) -> Option<Direction> {
        match self {
            Self::Mirror(kind) => kind.reflect(travel),
            _ => None,
        }
    }

    fn decays_into(&self) -> Option<ArenaObject> {
        match self {
            Self::ThinIce => Some(Self::Water),
            _ => None,
        }
    }

    fn hardness(&self) -> Option<u8> {
        match self {
            Self::Brick
            | Self::Block
            | Self::Mirror(_)
            | Self::DeadAntiTank
            | Self::AntiTank { .. }
            | Self::AntiTankDisguise { .. } => Some(1),
            Self::Gate { .. } => Some(2),
            Self::Wall => Some(3),
            _ => None,
        }
    }

    fn type_tag(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Ground => 1,
            Self::Water => 2,
            Self::Ice => 3,
            Self::ThinIce => 4,
            Self::Bridge => 5,
            Self::Goal => 6,
            Self::Stairs { .. } => 7,
            Self::TimePortal { .. } => 8,
            Self::Key => 9,
            Self::Pickup(_) => 10,
            Self::Wall => 11,
            Self::Brick => 12,
            Self::Block => 13,
            Self::Mirror(_) => 14,
            Self::Gate { .. } => 15,
            Self::AntiTank { .. } => 16,
            Self::AntiTankDisguise { .. } => 17,
            Self::DeadAntiTank => 18,
            Self::Tank { .. } => 19,
            Self::PowerfulTank { .. } => 20,
            Self::Tree => 21,
            Self::Beam { .. } => 22,
        }
    }
}
