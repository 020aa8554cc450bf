//! Classification of one resolved action for history bookkeeping.

use std::fmt;

use crate::inventory::{AmmoKind, BombKind, LaserType};

/// What ammunition or tool one history frame consumed.
///
/// A bitset over ten independent facets. Plain moves carry no facet; a
/// green shot carries only [`LASER`](HistoryStatus::LASER). Build values
/// with the named constructors rather than raw bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HistoryStatus(u16);

impl HistoryStatus {
    /// Green laser.
    pub const LASER: u16 = 1 << 0;
    /// Missile.
    pub const MISSILE: u16 = 1 << 1;
    /// Stunner.
    pub const STUNNER: u16 = 1 << 2;
    /// Boost.
    pub const BOOST: u16 = 1 << 3;
    /// Magnet.
    pub const MAGNET: u16 = 1 << 4;
    /// Blue laser.
    pub const BLUE_LASER: u16 = 1 << 5;
    /// Disruptor.
    pub const DISRUPTOR: u16 = 1 << 6;
    /// Bomb.
    pub const BOMB: u16 = 1 << 7;
    /// Heat bomb.
    pub const HEAT_BOMB: u16 = 1 << 8;
    /// Ice bomb.
    pub const ICE_BOMB: u16 = 1 << 9;

    const ALL_BITS: u16 = (1 << 10) - 1;

    const NAMES: [(u16, &'static str); 10] = [
        (Self::LASER, "laser"),
        (Self::MISSILE, "missile"),
        (Self::STUNNER, "stunner"),
        (Self::BOOST, "boost"),
        (Self::MAGNET, "magnet"),
        (Self::BLUE_LASER, "blue-laser"),
        (Self::DISRUPTOR, "disruptor"),
        (Self::BOMB, "bomb"),
        (Self::HEAT_BOMB, "heat-bomb"),
        (Self::ICE_BOMB, "ice-bomb"),
    ];

    /// A plain move: no facet set.
    pub const fn plain() -> Self {
        Self(0)
    }
    /// A green laser shot.
    pub const fn laser() -> Self {
        Self(Self::LASER)
    }
    /// A missile shot.
    pub const fn missile() -> Self {
        Self(Self::MISSILE)
    }
    /// A stunner shot.
    pub const fn stunner() -> Self {
        Self(Self::STUNNER)
    }
    /// A boost move.
    pub const fn boost() -> Self {
        Self(Self::BOOST)
    }
    /// A magnet move.
    pub const fn magnet() -> Self {
        Self(Self::MAGNET)
    }
    /// A blue laser shot.
    pub const fn blue_laser() -> Self {
        Self(Self::BLUE_LASER)
    }
    /// A disruptor shot.
    pub const fn disruptor() -> Self {
        Self(Self::DISRUPTOR)
    }
    /// A bomb blast.
    pub const fn bomb() -> Self {
        Self(Self::BOMB)
    }
    /// A heat bomb blast.
    pub const fn heat_bomb() -> Self {
        Self(Self::HEAT_BOMB)
    }
    /// An ice bomb blast.
    pub const fn ice_bomb() -> Self {
        Self(Self::ICE_BOMB)
    }

    /// Status for a laser activation of `laser`.
    pub fn for_laser(laser: LaserType) -> Self {
        match laser {
            LaserType::Green => Self::laser(),
            LaserType::Blue => Self::blue_laser(),
            LaserType::Disruptor => Self::disruptor(),
            LaserType::Stunner => Self::stunner(),
            LaserType::Missile => Self::missile(),
        }
    }

    /// Status for a blast of `kind`.
    pub fn for_bomb(kind: BombKind) -> Self {
        match kind {
            BombKind::Bomb => Self::bomb(),
            BombKind::HeatBomb => Self::heat_bomb(),
            BombKind::IceBomb => Self::ice_bomb(),
        }
    }

    /// Raw bits.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Rebuild from raw bits; unknown bits are rejected.
    pub fn from_bits(bits: u16) -> Option<Self> {
        (bits & !Self::ALL_BITS == 0).then_some(Self(bits))
    }

    /// `true` when `facet` is set.
    pub fn contains(self, facet: u16) -> bool {
        self.0 & facet == facet
    }

    /// `true` for the all-false status.
    pub fn is_plain(self) -> bool {
        self.0 == 0
    }

    /// The inventory slot this frame charged, if any. Green shots and
    /// plain moves consume nothing.
    pub fn consumed_ammo(self) -> Option<AmmoKind> {
        let kind = match self.0 {
            Self::MISSILE => AmmoKind::Missile,
            Self::STUNNER => AmmoKind::Stunner,
            Self::BOOST => AmmoKind::Boost,
            Self::MAGNET => AmmoKind::Magnet,
            Self::BLUE_LASER => AmmoKind::BlueLaser,
            Self::DISRUPTOR => AmmoKind::Disruptor,
            Self::BOMB => AmmoKind::Bomb,
            Self::HEAT_BOMB => AmmoKind::HeatBomb,
            Self::ICE_BOMB => AmmoKind::IceBomb,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return f.write_str("plain");
        }
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.0 & bit != 0 {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_laser_are_distinct() {
        assert!(HistoryStatus::plain().is_plain());
        assert!(!HistoryStatus::laser().is_plain());
        assert_eq!(HistoryStatus::laser().consumed_ammo(), None);
        assert_eq!(HistoryStatus::plain().to_string(), "plain");
    }

    #[test]
    fn every_ammo_status_maps_back() {
        assert_eq!(
            HistoryStatus::for_laser(LaserType::Missile).consumed_ammo(),
            Some(AmmoKind::Missile)
        );
        assert_eq!(
            HistoryStatus::for_bomb(BombKind::IceBomb).consumed_ammo(),
            Some(AmmoKind::IceBomb)
        );
        assert_eq!(HistoryStatus::boost().consumed_ammo(), Some(AmmoKind::Boost));
    }

    #[test]
    fn from_bits_rejects_unknown_facets() {
        assert_eq!(HistoryStatus::from_bits(1 << 10), None);
        assert_eq!(
            HistoryStatus::from_bits(HistoryStatus::BOMB),
            Some(HistoryStatus::bomb())
        );
    }

    #[test]
    fn display_names_facets() {
        assert_eq!(HistoryStatus::heat_bomb().to_string(), "heat-bomb");
    }
}
