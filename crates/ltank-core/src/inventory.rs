//! Ammunition kinds, laser and bomb types, inventory, and score counters.

use std::fmt;

/// A consumable tool or ammunition slot in the [`Inventory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AmmoKind {
    /// Wall-breaking missile laser.
    Missile = 0,
    /// Character-disabling stunner laser.
    Stunner = 1,
    /// Two-cell boost move.
    Boost = 2,
    /// Three-cell magnet pull.
    Magnet = 3,
    /// Brick-penetrating blue laser.
    BlueLaser = 4,
    /// In-place converting disruptor laser.
    Disruptor = 5,
    /// Area bomb.
    Bomb = 6,
    /// Melting area bomb.
    HeatBomb = 7,
    /// Freezing area bomb.
    IceBomb = 8,
}

impl AmmoKind {
    /// All kinds in code order.
    pub const ALL: [AmmoKind; 9] = [
        AmmoKind::Missile,
        AmmoKind::Stunner,
        AmmoKind::Boost,
        AmmoKind::Magnet,
        AmmoKind::BlueLaser,
        AmmoKind::Disruptor,
        AmmoKind::Bomb,
        AmmoKind::HeatBomb,
        AmmoKind::IceBomb,
    ];

    /// Stable numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](AmmoKind::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for AmmoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Missile => "missile",
            Self::Stunner => "stunner",
            Self::Boost => "boost",
            Self::Magnet => "magnet",
            Self::BlueLaser => "blue laser",
            Self::Disruptor => "disruptor",
            Self::Bomb => "bomb",
            Self::HeatBomb => "heat bomb",
            Self::IceBomb => "ice bomb",
        };
        f.write_str(name)
    }
}

/// The kind of beam a laser activation emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LaserType {
    /// The tank's unlimited standard laser.
    #[default]
    Green,
    /// Penetrates bricks.
    Blue,
    /// Converts objects in place.
    Disruptor,
    /// Temporarily disables characters.
    Stunner,
    /// Destroys wall-class obstacles outright.
    Missile,
}

impl LaserType {
    /// The inventory slot charged for one activation, `None` for green.
    pub fn ammo(self) -> Option<AmmoKind> {
        match self {
            Self::Green => None,
            Self::Blue => Some(AmmoKind::BlueLaser),
            Self::Disruptor => Some(AmmoKind::Disruptor),
            Self::Stunner => Some(AmmoKind::Stunner),
            Self::Missile => Some(AmmoKind::Missile),
        }
    }

    /// The laser type fired while `ammo` is the selected mode.
    pub fn for_ammo(ammo: AmmoKind) -> Option<Self> {
        match ammo {
            AmmoKind::BlueLaser => Some(Self::Blue),
            AmmoKind::Disruptor => Some(Self::Disruptor),
            AmmoKind::Stunner => Some(Self::Stunner),
            AmmoKind::Missile => Some(Self::Missile),
            _ => None,
        }
    }
}

/// Sub-type of a circular range activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BombKind {
    /// Destroys everything up to hardness 2.
    Bomb,
    /// Destroys hardness 1, melts ice, burns trees.
    HeatBomb,
    /// Destroys nothing, freezes water.
    IceBomb,
}

impl BombKind {
    /// Material force: objects with `hardness <= force` are destroyed.
    pub fn force(self) -> u8 {
        match self {
            Self::Bomb => 2,
            Self::HeatBomb => 1,
            Self::IceBomb => 0,
        }
    }

    /// The inventory slot charged for one activation.
    pub fn ammo(self) -> AmmoKind {
        match self {
            Self::Bomb => AmmoKind::Bomb,
            Self::HeatBomb => AmmoKind::HeatBomb,
            Self::IceBomb => AmmoKind::IceBomb,
        }
    }
}

/// Per-session counts of keys and consumable ammunition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Inventory {
    /// Gate keys.
    pub keys: u32,
    /// Missiles.
    pub missiles: u32,
    /// Stunners.
    pub stunners: u32,
    /// Boosts.
    pub boosts: u32,
    /// Magnets.
    pub magnets: u32,
    /// Blue lasers.
    pub blue_lasers: u32,
    /// Disruptors.
    pub disruptors: u32,
    /// Bombs.
    pub bombs: u32,
    /// Heat bombs.
    pub heat_bombs: u32,
    /// Ice bombs.
    pub ice_bombs: u32,
}

impl Inventory {
    /// Count held for `kind`.
    pub fn count(&self, kind: AmmoKind) -> u32 {
        *self.slot(kind)
    }

    /// Add `n` units of `kind`, saturating.
    pub fn add(&mut self, kind: AmmoKind, n: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(n);
    }

    /// Remove one unit of `kind`. Returns `false` (and changes nothing)
    /// when the slot is empty.
    pub fn take(&mut self, kind: AmmoKind) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Remove one key. Returns `false` when no key is held.
    pub fn take_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    fn slot(&self, kind: AmmoKind) -> &u32 {
        match kind {
            AmmoKind::Missile => &self.missiles,
            AmmoKind::Stunner => &self.stunners,
            AmmoKind::Boost => &self.boosts,
            AmmoKind::Magnet => &self.magnets,
            AmmoKind::BlueLaser => &self.blue_lasers,
            AmmoKind::Disruptor => &self.disruptors,
            AmmoKind::Bomb => &self.bombs,
            AmmoKind::HeatBomb => &self.heat_bombs,
            AmmoKind::IceBomb => &self.ice_bombs,
        }
    }

    fn slot_mut(&mut self, kind: AmmoKind) -> &mut u32 {
        match kind {
            AmmoKind::Missile => &mut self.missiles,
            AmmoKind::Stunner => &mut self.stunners,
            AmmoKind::Boost => &mut self.boosts,
            AmmoKind::Magnet => &mut self.magnets,
            AmmoKind::BlueLaser => &mut self.blue_lasers,
            AmmoKind::Disruptor => &mut self.disruptors,
            AmmoKind::Bomb => &mut self.bombs,
            AmmoKind::HeatBomb => &mut self.heat_bombs,
            AmmoKind::IceBomb => &mut self.ice_bombs,
        }
    }
}

/// Score counters persisted with the save file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScoreCounters {
    /// Successful tank moves (plain, boost, magnet).
    pub moves: u64,
    /// Laser activations of any type.
    pub shots: u64,
    /// Everything else: bombs and pushes requested from outside.
    pub others: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_refuses_empty_slot() {
        let mut inv = Inventory::default();
        assert!(!inv.take(AmmoKind::Missile));
        inv.add(AmmoKind::Missile, 2);
        assert!(inv.take(AmmoKind::Missile));
        assert_eq!(inv.count(AmmoKind::Missile), 1);
    }

    #[test]
    fn laser_ammo_mapping_is_consistent() {
        for kind in AmmoKind::ALL {
            if let Some(laser) = LaserType::for_ammo(kind) {
                assert_eq!(laser.ammo(), Some(kind));
            }
        }
        assert_eq!(LaserType::Green.ammo(), None);
    }

    #[test]
    fn bomb_forces_are_ordered() {
        assert!(BombKind::Bomb.force() > BombKind::HeatBomb.force());
        assert!(BombKind::HeatBomb.force() > BombKind::IceBomb.force());
    }
}
