//! Standard scenario levels.
//!
//! - [`push_chain_level`]: a tank behind `k` blocks in a walled corridor.
//! - [`laser_scenario`]: a 10×10 arena with the tank at (5,5) facing east
//!   and a wall two cells ahead.
//! - [`replay_level`]: a small solvable level for determinism tests.

use ltank_core::{ArenaObject, Inventory};
use ltank_engine::{GameSession, Level, LevelBuilder, SessionConfig};
use ltank_replay::ReplayEntry;

/// Build a level from ASCII rows on one floor. Panics on a malformed
/// fixture.
pub fn ascii_level(name: &str, rows: &[&str]) -> Level {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut builder = LevelBuilder::new(width as u32, rows.len() as u32, 1).name(name);
    for (y, row) in rows.iter().enumerate() {
        builder = builder.row(0, y as i32, row);
    }
    builder.build().expect("fixture level must be valid")
}

/// A session on `level` with default rules.
pub fn session(level: Level) -> GameSession {
    GameSession::new(level, SessionConfig::default()).expect("default config is valid")
}

/// `#>oo…o.#` with `k` blocks, or `#>oo…o#` when `blocked`.
pub fn push_chain_level(k: usize, blocked: bool) -> Level {
    let mut row = String::from("#>");
    row.push_str(&"o".repeat(k));
    if !blocked {
        row.push('.');
    }
    row.push('#');
    let wall = "#".repeat(row.len());
    ascii_level("push chain", &[&wall, &row, &wall])
}

/// Tank at (5,5) facing east, wall at (7,5), brick at (8,5).
pub fn laser_scenario() -> Level {
    let mut rows: Vec<String> = (0..10).map(|_| ".".repeat(10)).collect();
    rows[5] = ".....>.#%.".to_string();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    ascii_level("laser scenario", &refs)
}

/// A solvable level: a brick to shoot, a block to push into the water in
/// front of the goal.
///
/// ```text
/// #########
/// #>.%..~$#
/// #..o....#
/// #.......#
/// #########
/// ```
pub fn replay_level() -> Level {
    ascii_level(
        "replay",
        &[
            "#########",
            "#>.%..~$#",
            "#..o....#",
            "#.......#",
            "#########",
        ],
    )
}

/// Solves [`replay_level`].
pub const REPLAY_SOLUTION: [ReplayEntry; 11] = [
    ReplayEntry::Shoot,
    ReplayEntry::MoveDown,
    ReplayEntry::MoveRight,
    ReplayEntry::MoveRight,
    ReplayEntry::MoveRight,
    ReplayEntry::MoveRight,
    ReplayEntry::MoveDown,
    ReplayEntry::MoveRight,
    ReplayEntry::MoveUp,
    ReplayEntry::MoveUp,
    ReplayEntry::MoveRight,
];

/// One starting inventory holding a little of everything.
pub fn stocked_inventory() -> Inventory {
    Inventory {
        keys: 1,
        missiles: 2,
        stunners: 2,
        boosts: 2,
        magnets: 2,
        blue_lasers: 2,
        disruptors: 2,
        bombs: 1,
        heat_bombs: 1,
        ice_bombs: 1,
    }
}

/// Occupant of a lower-object cell on floor 0.
pub fn lower(session: &GameSession, x: i32, y: i32) -> ArenaObject {
    session
        .grid()
        .get(ltank_core::CellAddr::new(
            x,
            y,
            0,
            ltank_core::Layer::LowerObjects,
        ))
        .expect("fixture coordinates are in bounds")
}
