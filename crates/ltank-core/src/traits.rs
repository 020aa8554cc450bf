//! Collaborator traits: what the simulation reads from, and what it calls
//! outward into.

use crate::id::{CellAddr, Era};
use crate::object::ArenaObject;

/// Sound cues emitted by resolution rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// The tank moved one cell.
    Move,
    /// A push succeeded.
    Push,
    /// A laser was fired.
    Laser,
    /// A beam bounced off a mirror.
    Reflect,
    /// Something was destroyed.
    Destroy,
    /// A turret was stunned.
    Stun,
    /// Something sank into water.
    Sink,
    /// A bomb went off.
    Blast,
    /// A collectable was picked up.
    Pickup,
    /// A gate opened.
    GateOpen,
    /// The era changed.
    TimeTravel,
    /// The tank died.
    Death,
    /// The goal was reached.
    Win,
}

/// Fire-and-forget presentation hooks.
///
/// Every method has a no-op default so test doubles override only what
/// they observe. Return values are never consumed by the simulation.
pub trait Presenter: Send {
    /// Play a sound cue.
    fn play_sound(&mut self, _event: SoundEvent) {}

    /// Show a message to the player.
    fn show_dialog(&mut self, _text: &str) {}

    /// A floor's cells changed and need redrawing.
    fn mark_dirty(&mut self, _floor: u8) {}
}

/// A presenter that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Read-only view of the active era of an arena.
pub trait ArenaRead {
    /// Columns.
    fn width(&self) -> u32;

    /// Rows.
    fn height(&self) -> u32;

    /// Floors.
    fn floors(&self) -> u8;

    /// The era currently active.
    fn era(&self) -> Era;

    /// The occupant of `addr`, or `None` when out of bounds.
    fn object_at(&self, addr: CellAddr) -> Option<ArenaObject>;
}
