//! Laser interaction table: what one beam type does to one occupant.

use ltank_core::{ArenaObject, Capabilities, Direction, LaserType};

/// What happens when a beam travelling `travel` enters a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LaserEffect {
    /// Continue through the cell.
    Pass,
    /// Stop; the cell is unchanged.
    Halt,
    /// Turn and continue.
    Reflect(Direction),
    /// Replace the occupant. The beam continues unless `halt`.
    Replace {
        with: ArenaObject,
        halt: bool,
    },
    /// Push the occupant one cell along the beam and stop.
    Push,
    /// Destroy the player's tank. The beam continues unless `halt`.
    Kill {
        halt: bool,
    },
}

use LaserEffect::{Halt, Pass, Push, Reflect};

const fn destroy(halt: bool) -> LaserEffect {
    LaserEffect::Replace {
        with: ArenaObject::Empty,
        halt,
    }
}

const fn slay(halt: bool) -> LaserEffect {
    LaserEffect::Replace {
        with: ArenaObject::DeadAntiTank,
        halt,
    }
}

/// The effect of a `laser` beam travelling `travel` on `obj`.
pub(crate) fn laser_effect(
    obj: ArenaObject,
    laser: LaserType,
    travel: Direction,
    stun_turns: u8,
) -> LaserEffect {
    use ArenaObject as O;
    use LaserType as L;

    match (obj, laser) {
        (O::Empty, _) | (O::Gate { open: true }, _) => Pass,

        (O::Wall, L::Missile) => destroy(true),
        (O::Wall, _) => Halt,

        (O::Brick, L::Green | L::Missile) => destroy(true),
        (O::Brick, L::Blue) => destroy(false),
        (O::Brick, L::Disruptor) => LaserEffect::Replace {
            with: O::Block,
            halt: true,
        },
        (O::Brick, L::Stunner) => Halt,

        (O::Block | O::DeadAntiTank, L::Green | L::Blue) => Push,
        (O::Block | O::DeadAntiTank, L::Missile) => destroy(true),
        (O::Block | O::DeadAntiTank, _) => Halt,

        (O::Mirror(kind), _) => match (kind.reflect(travel), laser) {
            (_, L::Missile) => destroy(true),
            (_, L::Disruptor) => LaserEffect::Replace {
                with: O::Mirror(kind.rotated()),
                halt: true,
            },
            (Some(out), _) => Reflect(out),
            (None, L::Green | L::Blue) => Push,
            (None, _) => Halt,
        },

        (O::Gate { open: false }, L::Disruptor) => LaserEffect::Replace {
            with: O::Gate { open: true },
            halt: true,
        },
        (O::Gate { open: false }, L::Missile) => destroy(true),
        (O::Gate { open: false }, _) => Halt,

        (O::AntiTank { facing, .. }, _) => {
            let head_on = facing == travel.opposite();
            match laser {
                L::Green if head_on => slay(true),
                L::Green => Push,
                L::Blue => slay(false),
                L::Stunner => LaserEffect::Replace {
                    with: O::AntiTank {
                        facing,
                        stun: stun_turns,
                    },
                    halt: true,
                },
                L::Disruptor | L::Missile => slay(true),
            }
        }

        (O::AntiTankDisguise { .. }, L::Green | L::Blue) => Push,
        (O::AntiTankDisguise { facing }, L::Stunner) => LaserEffect::Replace {
            with: O::AntiTank {
                facing,
                stun: stun_turns,
            },
            halt: true,
        },
        (O::AntiTankDisguise { facing }, L::Disruptor) => LaserEffect::Replace {
            with: O::AntiTank { facing, stun: 0 },
            halt: true,
        },
        (O::AntiTankDisguise { .. }, L::Missile) => slay(true),

        (O::Tank { .. }, L::Green) => LaserEffect::Kill { halt: true },
        (O::Tank { .. }, L::Blue | L::Missile) => LaserEffect::Kill { halt: false },
        (O::Tank { .. }, _) => Halt,

        (O::PowerfulTank { .. }, L::Blue | L::Missile) => LaserEffect::Kill { halt: true },
        (O::PowerfulTank { .. }, _) => Halt,

        (other, _) if other.is_solid() => Halt,
        _ => Pass,
    }
}
