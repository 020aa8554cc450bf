//! Benchmark profiles for ltank.
//!
//! - [`open_arena`]: a walled square arena scattered with bricks, blocks
//!   and mirrors from a seeded ChaCha8 stream, tank in the centre.
//! - [`random_walk`]: a deterministic sequence of replay entries.
//!
//! Same seed, same level and same walk, on every platform.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use ltank_core::{ArenaObject, Direction, MirrorKind, SimError};
use ltank_engine::{Level, LevelBuilder};
use ltank_replay::ReplayEntry;

/// Side length of the reference arena.
pub const REFERENCE_SIDE: u32 = 64;

/// Build a `side × side` walled arena. Roughly `density` of the interior
/// cells hold an obstacle. The tank sits in the centre facing east with
/// its own cell and the cell east of it kept clear.
pub fn open_arena(side: u32, density: f64, seed: u64) -> Result<Level, SimError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let last = side as i32 - 1;
    let centre = side as i32 / 2;
    let mut builder = LevelBuilder::new(side, side, 1)
        .name(format!("open arena {side} #{seed}"))
        .number(0);

    for y in 0..=last {
        for x in 0..=last {
            let border = x == 0 || y == 0 || x == last || y == last;
            let keep_clear = y == centre && (x == centre || x == centre + 1);
            let obj = if border {
                Some(ArenaObject::Wall)
            } else if keep_clear || !rng.random_bool(density) {
                None
            } else {
                Some(match rng.random_range(0..6) {
                    0 | 1 => ArenaObject::Brick,
                    2 => ArenaObject::Block,
                    3 => ArenaObject::Mirror(MirrorKind::NorthEast),
                    4 => ArenaObject::Mirror(MirrorKind::SouthWest),
                    _ => ArenaObject::Mirror(MirrorKind::NorthWest),
                })
            };
            if let Some(obj) = obj {
                builder = builder.place(x, y, 0, obj);
            }
        }
    }
    builder
        .place(
            centre,
            centre,
            0,
            ArenaObject::Tank {
                facing: Direction::Right,
            },
        )
        .build()
}

/// The reference profile: a 64×64 arena at 20% density.
pub fn reference_arena(seed: u64) -> Result<Level, SimError> {
    open_arena(REFERENCE_SIDE, 0.2, seed)
}

/// `n` replay entries drawn uniformly from the five codes.
pub fn random_walk(n: usize, seed: u64) -> Vec<ReplayEntry> {
    const ALPHABET: [ReplayEntry; 5] = [
        ReplayEntry::Shoot,
        ReplayEntry::MoveLeft,
        ReplayEntry::MoveDown,
        ReplayEntry::MoveRight,
        ReplayEntry::MoveUp,
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltank_core::Position;

    #[test]
    fn reference_arena_builds() {
        let level = reference_arena(42).unwrap();
        assert_eq!(level.grid.width(), REFERENCE_SIDE);
        let (pos, _) = level.grid.find_player().unwrap();
        assert_eq!(pos, Position::new(32, 32, 0));
    }

    #[test]
    fn arenas_are_deterministic() {
        let a = open_arena(16, 0.3, 7).unwrap();
        let b = open_arena(16, 0.3, 7).unwrap();
        assert_eq!(
            ltank_replay::arena_hash(&a.grid),
            ltank_replay::arena_hash(&b.grid)
        );
    }

    #[test]
    fn walks_are_deterministic() {
        assert_eq!(random_walk(100, 3), random_walk(100, 3));
        assert_eq!(random_walk(100, 3).len(), 100);
    }
}
