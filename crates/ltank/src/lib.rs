//! ltank: a deterministic laser-tank puzzle simulation.
//!
//! This is the facade crate that re-exports the public API of the ltank
//! sub-crates. Front ends usually need only this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use ltank::prelude::*;
//!
//! // Shoot the brick, then drive onto the goal.
//! let level = LevelBuilder::new(5, 3, 1)
//!     .name("first steps")
//!     .row(0, 0, "#####")
//!     .row(0, 1, "#>%$#")
//!     .row(0, 2, "#####")
//!     .build()
//!     .unwrap();
//! let mut session = GameSession::new(level, SessionConfig::default()).unwrap();
//! let ctl = StepControl::detached();
//!
//! let shot = session.fire().unwrap();
//! session.resolve(shot, &ctl).unwrap();
//! session.resolve(Request::Movement { dx: 1, dy: 0 }, &ctl).unwrap();
//! let report = session.resolve(Request::Movement { dx: 1, dy: 0 }, &ctl).unwrap();
//! assert!(report.solved);
//!
//! // The recorded intents round-trip through the solution codec.
//! let solution = session.export_solution().unwrap();
//! let bytes = ltank::replay::encode_solution(&solution.header, &solution.entries).unwrap();
//! let decoded = ltank::replay::decode_solution(&bytes).unwrap();
//! assert_eq!(decoded.entries.len(), 3);
//!
//! // Undo walks the same frames back.
//! assert_eq!(session.undo().unwrap(), HistoryStatus::plain());
//! assert!(!session.is_solved());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ltank-core` | Objects, positions, inventory, errors, presenter trait |
//! | [`grid`] | `ltank-grid` | Layered cell grid, change journal, undo history |
//! | [`replay`] | `ltank-replay` | Replay log, solution and save codecs, arena hash |
//! | [`engine`] | `ltank-engine` | Levels, resolution rules, game session, worker, playback |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`ltank-core`).
///
/// Contains [`types::ArenaObject`] and its capability table, positions and
/// directions, inventory and counters, and the [`types::Presenter`] trait.
pub use ltank_core as types;

/// Layered cell storage and undo history (`ltank-grid`).
///
/// [`grid::CellGrid`] holds both eras of the arena and journals every
/// write; [`grid::HistoryEngine`] keeps the undo/redo frames.
pub use ltank_grid as grid;

/// Replay recording and file formats (`ltank-replay`).
///
/// [`replay::ReplayLog`] records intents, [`replay::encode_solution`] and
/// [`replay::decode_solution`] handle solution files.
pub use ltank_replay as replay;

/// Resolution engine (`ltank-engine`).
///
/// [`engine::GameSession`] resolves requests synchronously,
/// [`engine::SimulationWorker`] runs them on a background thread.
pub use ltank_engine as engine;

/// Common imports for typical ltank usage.
///
/// ```rust
/// use ltank::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use ltank_core::{
        AmmoKind, ArenaObject, BombKind, Capabilities, Direction, Era, HistoryStatus, Inventory,
        LaserType, Layer, Position, Presenter, ScoreCounters, SoundEvent,
    };

    // Errors
    pub use ltank_core::{RejectReason, SimError};

    // Replay
    pub use ltank_replay::{ReplayEntry, Solution};

    // Engine
    pub use ltank_engine::{
        GameSession, Level, LevelBuilder, Playback, Request, RunReport, SessionConfig,
        SimulationWorker, StepControl, WorkerConfig,
    };
}
