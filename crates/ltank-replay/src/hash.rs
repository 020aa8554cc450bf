//! Arena digests for determinism checks.
//!
//! FNV-1a over the active era's cells. Not cryptographic; only used to
//! compare a replayed session against the recorded one.

use ltank_core::{ArenaRead, CellAddr, Layer};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the era id, the dimensions, and every cell code of the active
/// era in floor/row/column/layer order. The virtual layer is skipped so
/// that transient beam markers never affect the digest.
pub fn arena_hash(arena: &dyn ArenaRead) -> u64 {
    let mut hash = fnv1a_byte(FNV_OFFSET, arena.era().id());
    hash = fnv1a_u32(hash, arena.width());
    hash = fnv1a_u32(hash, arena.height());
    hash = fnv1a_byte(hash, arena.floors());

    for floor in 0..arena.floors() {
        for y in 0..arena.height() as i32 {
            for x in 0..arena.width() as i32 {
                for layer in Layer::ALL {
                    if layer == Layer::Virtual {
                        continue;
                    }
                    let code = arena
                        .object_at(CellAddr::new(x, y, floor, layer))
                        .map_or(u32::MAX, |obj| obj.to_code());
                    hash = fnv1a_u32(hash, code);
                }
            }
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltank_core::{ArenaObject, Era};

    struct Flat {
        cells: Vec<ArenaObject>,
        era: Era,
    }

    impl ArenaRead for Flat {
        fn width(&self) -> u32 {
            self.cells.len() as u32
        }
        fn height(&self) -> u32 {
            1
        }
        fn floors(&self) -> u8 {
            1
        }
        fn era(&self) -> Era {
            self.era
        }
        fn object_at(&self, addr: CellAddr) -> Option<ArenaObject> {
            match addr.layer {
                Layer::LowerObjects => self.cells.get(addr.x as usize).copied(),
                Layer::Virtual => Some(ArenaObject::Beam { horizontal: true }),
                _ => Some(ArenaObject::Empty),
            }
        }
    }

    #[test]
    fn digest_tracks_cells_and_era() {
        let a = Flat {
            cells: vec![ArenaObject::Empty, ArenaObject::Wall],
            era: Era::Present,
        };
        let b = Flat {
            cells: vec![ArenaObject::Wall, ArenaObject::Empty],
            era: Era::Present,
        };
        let c = Flat {
            cells: a.cells.clone(),
            era: Era::Past,
        };
        assert_eq!(arena_hash(&a), arena_hash(&a));
        assert_ne!(arena_hash(&a), arena_hash(&b));
        assert_ne!(arena_hash(&a), arena_hash(&c));
    }
}
