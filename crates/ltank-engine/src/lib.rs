//! Simulation engine for the ltank arena.
//!
//! [`GameSession`] is the explicit context object holding one level's
//! grid, history, player location, inventory, counters and recording. Its
//! [`resolve`](GameSession::resolve) method is the synchronous core that
//! runs one movement, laser, object-push or blast request. The
//! [`SimulationWorker`] moves the session into a named thread for each run
//! and hands it back on `join()`. [`Playback`] drives a decoded solution
//! through the same rules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod level;
pub mod playback;
pub mod request;
mod resolve;
pub mod session;
pub mod worker;

pub use config::{ConfigError, SessionConfig, WorkerConfig};
pub use level::{Level, LevelBuilder, LevelInfo};
pub use playback::{Playback, PlaybackSummary};
pub use request::{Request, RunReport, Shooter, StepControl};
pub use session::{GameSession, LevelTimers, SessionMarks};
pub use worker::{RunOutcome, SimulationWorker, WorkerState};
