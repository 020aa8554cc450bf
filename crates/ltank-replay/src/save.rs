//! Versioned save-file hooks for score counters and inventory.
//!
//! The save framework owns the file and supplies the version tag; these
//! hooks read and write this subsystem's block. Each version extends the
//! previous one.

use std::io::{Read, Write};

use ltank_core::{Inventory, ScoreCounters};

use crate::codec::{
    read_length_prefixed_str, read_u32_le, read_u64_le, write_length_prefixed_str, write_u32_le,
    write_u64_le,
};
use crate::error::CodecError;

/// Save block layout versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SaveVersion {
    /// Scores filename and the three counters.
    G1 = 1,
    /// Adds keys.
    G2 = 2,
    /// Adds missiles, stunners, boosts and magnets.
    G3 = 3,
    /// Adds blue lasers and disruptors.
    G4 = 4,
    /// Adds bombs.
    G5 = 5,
    /// Adds heat bombs and ice bombs.
    G6 = 6,
}

impl SaveVersion {
    /// The newest layout.
    pub const LATEST: SaveVersion = SaveVersion::G6;

    /// Resolve a framework-supplied tag.
    pub fn from_tag(tag: u8) -> Result<Self, CodecError> {
        Ok(match tag {
            1 => Self::G1,
            2 => Self::G2,
            3 => Self::G3,
            4 => Self::G4,
            5 => Self::G5,
            6 => Self::G6,
            _ => return Err(CodecError::UnsupportedSaveVersion { tag }),
        })
    }

    /// Numeric tag.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Everything this subsystem persists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveRecord {
    /// Name of the per-player scores file.
    pub scores_file: String,
    /// Score counters.
    pub counters: ScoreCounters,
    /// Inventory; fields newer than the save version are not stored.
    pub inventory: Inventory,
}

/// Write `record` in the `version` layout.
pub fn write_save(
    w: &mut dyn Write,
    version: SaveVersion,
    record: &SaveRecord,
) -> Result<(), CodecError> {
    write_length_prefixed_str(w, &record.scores_file)?;
    write_u64_le(w, record.counters.moves)?;
    write_u64_le(w, record.counters.shots)?;
    write_u64_le(w, record.counters.others)?;

    let inv = &record.inventory;
    for (since, value) in inventory_fields(inv) {
        if version >= since {
            write_u32_le(w, value)?;
        }
    }
    Ok(())
}

/// Read a record written in the `version` layout. Fields the version does
/// not carry read back as zero.
pub fn read_save(r: &mut dyn Read, version: SaveVersion) -> Result<SaveRecord, CodecError> {
    let scores_file = read_length_prefixed_str(r)?;
    let counters = ScoreCounters {
        moves: read_u64_le(r)?,
        shots: read_u64_le(r)?,
        others: read_u64_le(r)?,
    };

    let mut values = [0u32; 10];
    let layout = inventory_fields(&Inventory::default());
    for (slot, (since, _)) in values.iter_mut().zip(layout) {
        if version >= since {
            *slot = read_u32_le(r)?;
        }
    }
    let [keys, missiles, stunners, boosts, magnets, blue_lasers, disruptors, bombs, heat_bombs, ice_bombs] =
        values;

    Ok(SaveRecord {
        scores_file,
        counters,
        inventory: Inventory {
            keys,
            missiles,
            stunners,
            boosts,
            magnets,
            blue_lasers,
            disruptors,
            bombs,
            heat_bombs,
            ice_bombs,
        },
    })
}

/// Inventory fields in file order, each with the version that added it.
fn inventory_fields(inv: &Inventory) -> [(SaveVersion, u32); 10] {
    use SaveVersion::*;
    [
        (G2, inv.keys),
        (G3, inv.missiles),
        (G3, inv.stunners),
        (G3, inv.boosts),
        (G3, inv.magnets),
        (G4, inv.blue_lasers),
        (G4, inv.disruptors),
        (G5, inv.bombs),
        (G6, inv.heat_bombs),
        (G6, inv.ice_bombs),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> SaveRecord {
        SaveRecord {
            scores_file: "player.sco".to_string(),
            counters: ScoreCounters {
                moves: 120,
                shots: 14,
                others: 2,
            },
            inventory: Inventory {
                keys: 1,
                missiles: 2,
                stunners: 3,
                boosts: 4,
                magnets: 5,
                blue_lasers: 6,
                disruptors: 7,
                bombs: 8,
                heat_bombs: 9,
                ice_bombs: 10,
            },
        }
    }

    #[test]
    fn latest_version_roundtrips() {
        let record = full_record();
        let mut buf = Vec::new();
        write_save(&mut buf, SaveVersion::LATEST, &record).unwrap();
        let back = read_save(&mut buf.as_slice(), SaveVersion::LATEST).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn older_versions_drop_newer_fields() {
        let record = full_record();
        let mut buf = Vec::new();
        write_save(&mut buf, SaveVersion::G3, &record).unwrap();
        // name (4 + 10) + counters (24) + keys + four G3 fields.
        assert_eq!(buf.len(), 14 + 24 + 5 * 4);
        let back = read_save(&mut buf.as_slice(), SaveVersion::G3).unwrap();
        assert_eq!(back.inventory.magnets, 5);
        assert_eq!(back.inventory.blue_lasers, 0);
        assert_eq!(back.inventory.ice_bombs, 0);
    }

    #[test]
    fn g1_has_no_inventory() {
        let mut buf = Vec::new();
        write_save(&mut buf, SaveVersion::G1, &full_record()).unwrap();
        let back = read_save(&mut buf.as_slice(), SaveVersion::G1).unwrap();
        assert_eq!(back.inventory, Inventory::default());
        assert_eq!(back.counters.moves, 120);
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(matches!(
            SaveVersion::from_tag(7),
            Err(CodecError::UnsupportedSaveVersion { tag: 7 })
        ));
        assert_eq!(SaveVersion::from_tag(4).unwrap(), SaveVersion::G4);
    }

    #[test]
    fn short_block_is_an_io_error() {
        let mut buf = Vec::new();
        write_save(&mut buf, SaveVersion::G6, &full_record()).unwrap();
        buf.truncate(buf.len() - 2);
        assert!(matches!(
            read_save(&mut buf.as_slice(), SaveVersion::G6),
            Err(CodecError::Io(_))
        ));
    }
}
