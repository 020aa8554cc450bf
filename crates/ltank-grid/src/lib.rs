//! Arena state for the ltank simulation.
//!
//! # Architecture
//!
//! ```text
//! CellGrid
//! ├── EraStore × 5 (current cells + authored initial cells)
//! ├── dirty flags (one per floor)
//! └── journal (every non-virtual write since the last take)
//!
//! HistoryEngine<S>
//! ├── undo stack: HistoryFrame<S>
//! └── redo stack: HistoryFrame<S>
//!
//! PlayerLocationManager (current / previous / saved position)
//! ```
//!
//! A resolution step writes through [`CellGrid::set`], which journals the
//! old and new value. At the end of an action the journal is coalesced
//! into a [`GridDelta`] and pushed as one [`HistoryFrame`]. Undo and redo
//! apply the delta backward or forward without journaling, so the round
//! trip is exact.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod delta;
pub mod error;
pub mod grid;
pub mod history;
pub mod location;

pub use delta::{CellChange, CellKey, GridDelta};
pub use error::GridError;
pub use grid::{CellGrid, JournalMark};
pub use history::{HistoryEngine, HistoryFrame};
pub use location::PlayerLocationManager;
