//! Core types and traits for the ltank arena simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace:
//! coordinates, layers and eras, the closed [`ArenaObject`] type with its
//! [`Capabilities`], the [`HistoryStatus`] facet set, inventory and score
//! counters, the error taxonomy, and the collaborator traits the
//! simulation calls outward through.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod inventory;
pub mod object;
pub mod status;
pub mod traits;

pub use error::{RejectReason, SimError};
pub use id::{CellAddr, Delta, Direction, Era, Layer, Position};
pub use inventory::{AmmoKind, BombKind, Inventory, LaserType, ScoreCounters};
pub use object::{ArenaObject, Capabilities, MirrorKind};
pub use status::HistoryStatus;
pub use traits::{ArenaRead, NullPresenter, Presenter, SoundEvent};
