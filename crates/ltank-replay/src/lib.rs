//! Replay recording and persistence for the ltank simulation.
//!
//! Records the player's intents as a compact [`ReplayLog`], encodes them
//! into the fixed-layout `.lpb` solution format, and persists score and
//! inventory state through versioned save hooks. Arena digests and trace
//! comparison verify that a replay reproduces the original session.
//!
//! # Architecture
//!
//! - [`ReplayLog`] is an undo/redo-style stack of [`ReplayEntry`] values
//! - [`encode_solution`] and [`decode_solution`] implement the `.lpb` layout
//! - [`write_save`] and [`read_save`] dispatch on a [`SaveVersion`] tag
//! - [`arena_hash`] and [`compare_traces`] verify determinism
//!
//! # Solution format
//!
//! ```text
//! [level name: 31 bytes] [author: 31 bytes]
//! [level number: u16 LE] [entry count: u16 LE]
//! [entry 1: u8] ... [entry N: u8]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod recording;
pub mod save;
pub mod types;

pub use codec::{decode_solution, encode_solution};
pub use compare::{compare_traces, DivergenceKind, DivergenceReport, TraceEntry};
pub use error::CodecError;
pub use hash::arena_hash;
pub use recording::ReplayLog;
pub use save::{read_save, write_save, SaveRecord, SaveVersion};
pub use types::{ReplayEntry, Solution, SolutionHeader};

/// Width of the fixed name and author fields.
pub const NAME_LEN: usize = 31;

/// Bytes before the first entry.
pub const HEADER_LEN: usize = NAME_LEN * 2 + 4;
