//! The explicit game-session context.
//!
//! Everything one level attempt mutates lives in [`GameSession`]: the grid,
//! its history, the player location, inventory, counters, timers and the
//! replay recording. There are no process-wide statics; the worker takes
//! the session by value for the duration of a run.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use ltank_core::{
    AmmoKind, ArenaObject, CellAddr, Delta, Direction, Era, HistoryStatus, Inventory, Layer,
    LaserType, NullPresenter, Position, Presenter, ScoreCounters, SimError, SoundEvent,
};
use ltank_grid::{CellGrid, HistoryEngine, HistoryFrame, PlayerLocationManager};
use ltank_replay::{arena_hash, ReplayEntry, ReplayLog, Solution, SolutionHeader, TraceEntry};

use crate::config::{ConfigError, SessionConfig};
use crate::level::{Level, LevelInfo};
use crate::request::{Request, RunReport, Shooter, StepControl};

const DEAD_MESSAGE: &str = "Your tank is destroyed. Undo or restart the level.";

// ── LevelTimers ────────────────────────────────────────────────────

/// Per-floor tick counters. Movement and non-movement ticks are counted
/// separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelTimers {
    movement: SmallVec<[u32; 4]>,
    other: SmallVec<[u32; 4]>,
}

impl LevelTimers {
    /// Zeroed timers for `floors` floors.
    pub fn new(floors: u8) -> Self {
        Self {
            movement: smallvec![0; floors as usize],
            other: smallvec![0; floors as usize],
        }
    }

    /// Movement ticks on `floor`.
    pub fn movement(&self, floor: u8) -> u32 {
        self.movement.get(floor as usize).copied().unwrap_or(0)
    }

    /// Non-movement ticks on `floor`.
    pub fn other(&self, floor: u8) -> u32 {
        self.other.get(floor as usize).copied().unwrap_or(0)
    }

    pub(crate) fn tick(&mut self, floor: u8, movement: bool) {
        let timers = if movement {
            &mut self.movement
        } else {
            &mut self.other
        };
        if let Some(t) = timers.get_mut(floor as usize) {
            *t = t.wrapping_add(1);
        }
    }
}

// ── SessionMarks ───────────────────────────────────────────────────

/// Side state captured on either side of every history frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionMarks {
    /// Player location.
    pub location: PlayerLocationManager,
    /// Object the tank is standing on.
    pub saved_object: ArenaObject,
    /// Inventory.
    pub inventory: Inventory,
    /// Score counters.
    pub counters: ScoreCounters,
    /// Per-floor timers.
    pub timers: LevelTimers,
    /// Dead flag.
    pub dead: bool,
    /// Solved flag.
    pub solved: bool,
    /// Active era.
    pub era: Era,
    /// Whether the replay log held an unrecordable move.
    pub tainted: bool,
}

/// One-shot deferred transform, applied when the current run finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingDecay {
    pub era: Era,
    pub addr: CellAddr,
    pub into: ArenaObject,
}

/// What a resolver hands back to [`GameSession::resolve`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Action {
    pub status: HistoryStatus,
    pub aborted: bool,
}

// ── GameSession ────────────────────────────────────────────────────

/// One level attempt and everything it mutates.
pub struct GameSession {
    pub(crate) config: SessionConfig,
    info: LevelInfo,
    pub(crate) grid: CellGrid,
    history: HistoryEngine<SessionMarks>,
    pub(crate) location: PlayerLocationManager,
    pub(crate) saved_object: ArenaObject,
    pub(crate) inventory: Inventory,
    start_inventory: Inventory,
    pub(crate) counters: ScoreCounters,
    pub(crate) timers: LevelTimers,
    pub(crate) dead: bool,
    pub(crate) solved: bool,
    pub(crate) selected_ammo: Option<AmmoKind>,
    pub(crate) pending_decay: Option<PendingDecay>,
    replay: ReplayLog,
    replaying: bool,
    presenter: Box<dyn Presenter>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("level", &self.info.name)
            .field("player", &self.location.current())
            .field("era", &self.grid.era())
            .field("inventory", &self.inventory)
            .field("counters", &self.counters)
            .field("dead", &self.dead)
            .field("solved", &self.solved)
            .field("undo_depth", &self.history.undo_depth())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Start a session on `level`.
    pub fn new(level: Level, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let Level {
            info,
            grid,
            inventory,
        } = level;
        let (player, _) = grid.find_player().ok_or_else(|| SimError::InvalidArena {
            reason: "no player tank in the arena".to_string(),
        })?;
        let timers = LevelTimers::new(grid.floors());
        log::info!(
            "session started: {:?} ({}x{}x{})",
            info.name,
            grid.width(),
            grid.height(),
            grid.floors()
        );
        Ok(Self {
            config,
            info,
            grid,
            history: HistoryEngine::new(),
            location: PlayerLocationManager::new(player),
            saved_object: ArenaObject::Empty,
            inventory,
            start_inventory: inventory,
            counters: ScoreCounters::default(),
            timers,
            dead: false,
            solved: false,
            selected_ammo: None,
            pending_decay: None,
            replay: ReplayLog::new(),
            replaying: false,
            presenter: Box::new(NullPresenter),
        })
    }

    /// Replace the presentation collaborator.
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    /// Replace the presentation collaborator in place.
    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = presenter;
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Level metadata.
    pub fn info(&self) -> &LevelInfo {
        &self.info
    }

    /// Rule parameters.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The arena.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Player position.
    pub fn player(&self) -> Position {
        self.location.current()
    }

    /// The player's tank object, if the arena still holds it.
    pub fn tank(&self) -> Option<ArenaObject> {
        self.grid
            .get(self.location.current().at(Layer::LowerObjects))
            .ok()
            .filter(|obj| obj.is_player())
    }

    /// Object the tank is standing on, restored when it leaves.
    pub fn saved_object(&self) -> ArenaObject {
        self.saved_object
    }

    /// Inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Score counters.
    pub fn counters(&self) -> &ScoreCounters {
        &self.counters
    }

    /// Per-floor timers.
    pub fn timers(&self) -> &LevelTimers {
        &self.timers
    }

    /// `true` once the tank has died.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// `true` once the goal was reached.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The live recording.
    pub fn replay_log(&self) -> &ReplayLog {
        &self.replay
    }

    /// Choose which special ammunition the fire button uses.
    pub fn select_ammo(&mut self, ammo: Option<AmmoKind>) {
        self.selected_ammo = ammo;
    }

    /// The selected special ammunition.
    pub fn selected_ammo(&self) -> Option<AmmoKind> {
        self.selected_ammo
    }

    /// A player shot of type `laser` from the tank along its facing.
    /// `None` when the tank is missing from the arena.
    pub fn shot(&self, laser: LaserType) -> Option<Request> {
        let facing = self.tank()?.facing()?;
        let origin = self.location.current();
        let d = facing.delta();
        Some(Request::Laser {
            dx: d.dx,
            dy: d.dy,
            ox: origin.x,
            oy: origin.y,
            laser,
            shooter: Shooter::Player,
        })
    }

    /// A player shot with the selected special ammunition, or green.
    pub fn fire(&self) -> Option<Request> {
        let laser = self
            .selected_ammo
            .and_then(LaserType::for_ammo)
            .unwrap_or_default();
        self.shot(laser)
    }

    /// `true` when there is an action to undo.
    pub fn try_undo(&self) -> bool {
        self.history.try_undo()
    }

    /// `true` when there is an action to redo.
    pub fn try_redo(&self) -> bool {
        self.history.try_redo()
    }

    /// Status of the frame most recently undone or redone.
    pub fn what_was(&self) -> Option<HistoryStatus> {
        self.history.what_was()
    }

    /// Digest of the active era.
    pub fn digest(&self) -> u64 {
        arena_hash(&self.grid)
    }

    /// Status and digest of every applied frame, oldest first.
    pub fn trace(&self) -> Vec<TraceEntry> {
        self.history
            .frames()
            .iter()
            .map(|frame| TraceEntry {
                status: frame.status,
                digest: frame.digest,
            })
            .collect()
    }

    /// Snapshot of the side state.
    pub fn marks(&self) -> SessionMarks {
        SessionMarks {
            location: self.location,
            saved_object: self.saved_object,
            inventory: self.inventory,
            counters: self.counters,
            timers: self.timers.clone(),
            dead: self.dead,
            solved: self.solved,
            era: self.grid.era(),
            tainted: self.replay.is_tainted(),
        }
    }

    pub(crate) fn apply_marks(&mut self, marks: &SessionMarks) {
        self.location = marks.location;
        self.saved_object = marks.saved_object;
        self.inventory = marks.inventory;
        self.counters = marks.counters;
        self.timers.clone_from(&marks.timers);
        self.dead = marks.dead;
        self.solved = marks.solved;
        self.grid.switch_era(marks.era);
        self.replay.set_tainted(marks.tainted);
    }

    pub(crate) fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }

    pub(crate) fn sound(&mut self, event: SoundEvent) {
        self.presenter.play_sound(event);
    }

    fn flush_dirty(&mut self) {
        for floor in self.grid.take_dirty() {
            self.presenter.mark_dirty(floor);
        }
    }

    // ── Resolution ─────────────────────────────────────────────────

    /// Resolve one request to completion.
    ///
    /// Rejections and precondition failures leave the session untouched.
    /// A run that changes anything pushes exactly one history frame;
    /// enemy fire triggered by the action belongs to the same frame.
    pub fn resolve(&mut self, request: Request, ctl: &StepControl) -> Result<RunReport, SimError> {
        if self.dead {
            self.presenter.show_dialog(DEAD_MESSAGE);
            return Err(SimError::AlreadyDead);
        }
        let Some(tank) = self.tank() else {
            return Err(SimError::InvalidArena {
                reason: format!("no player tank at {}", self.location.current()),
            });
        };
        log::debug!("resolving {request:?}");

        let before = self.marks();
        let start = self.grid.journal_mark();
        let result = match request {
            Request::Movement { dx, dy } => self.resolve_movement(Delta::new(dx, dy), false, ctl),
            Request::FrozenMovement { dx, dy } => {
                self.resolve_movement(Delta::new(dx, dy), true, ctl)
            }
            Request::Laser {
                dx,
                dy,
                ox,
                oy,
                laser,
                shooter,
            } => self.resolve_laser(Delta::new(dx, dy), ox, oy, laser, shooter, ctl),
            Request::Objects { x, y, dx, dy, obj } => {
                self.resolve_objects(x, y, Delta::new(dx, dy), obj, ctl)
            }
            Request::Blast { kind } => self.resolve_blast(kind, ctl),
        };

        let action = match result {
            Ok(action) => action,
            Err(err) => {
                self.grid.rollback_to(start);
                self.apply_marks(&before);
                self.pending_decay = None;
                self.grid.clear_virtual_layer();
                self.flush_dirty();
                log::warn!("{request:?} failed: {err}");
                return Err(err);
            }
        };

        if !self.dead && !action.aborted {
            self.enemy_fire(ctl);
        }
        self.apply_pending_decay();
        self.grid.clear_virtual_layer();

        let delta = self.grid.take_journal();
        let mut after = self.marks();
        let changed = !delta.is_empty() || after != before;
        let mut recorded = false;
        let status = if changed {
            if self.config.recording && !self.replaying {
                match replay_entry(&request, &action, &before, tank.facing()) {
                    Some(entry) => {
                        self.replay.record(entry);
                        recorded = true;
                    }
                    None => self.replay.taint(),
                }
                after.tainted = self.replay.is_tainted();
            }
            let digest = arena_hash(&self.grid);
            self.history.push_undo(HistoryFrame {
                delta,
                status: action.status,
                before,
                after,
                recorded,
                digest,
            });
            Some(action.status)
        } else {
            None
        };
        self.flush_dirty();

        let report = RunReport {
            status,
            recorded,
            aborted: action.aborted,
            player: self.location.current(),
            dead: self.dead,
            solved: self.solved,
        };
        log::debug!("resolved {request:?}: {report:?}");
        Ok(report)
    }

    /// Run a guarded grid step. On an out-of-bounds access the step's
    /// writes and side state are rolled back and `None` is returned.
    pub(crate) fn guarded<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, ltank_grid::GridError>,
    ) -> Option<T> {
        let checkpoint = self.marks();
        let mark = self.grid.journal_mark();
        let pending = self.pending_decay;
        match step(self) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("step abandoned: {err}");
                self.grid.rollback_to(mark);
                self.apply_marks(&checkpoint);
                self.pending_decay = pending;
                None
            }
        }
    }

    // ── History ────────────────────────────────────────────────────

    /// Reverse the newest action. Returns its classification.
    pub fn undo(&mut self) -> Result<HistoryStatus, SimError> {
        let (marks, recorded, status) = {
            let frame = self
                .history
                .undo(&mut self.grid)
                .ok_or(SimError::HistoryEmpty)?;
            (frame.before.clone(), frame.recorded, frame.status)
        };
        self.apply_marks(&marks);
        self.pending_decay = None;
        if recorded {
            self.replay.undo();
        }
        self.flush_dirty();
        log::debug!("undo {status}");
        Ok(status)
    }

    /// Reapply the newest undone action. Returns its classification.
    pub fn redo(&mut self) -> Result<HistoryStatus, SimError> {
        let (marks, recorded, status) = {
            let frame = self
                .history
                .redo(&mut self.grid)
                .ok_or(SimError::HistoryEmpty)?;
            (frame.after.clone(), frame.recorded, frame.status)
        };
        self.apply_marks(&marks);
        if recorded {
            self.replay.redo();
        }
        self.flush_dirty();
        log::debug!("redo {status}");
        Ok(status)
    }

    /// Return the level to its authored initial state and clear history.
    pub fn reset_level(&mut self) -> Result<(), SimError> {
        self.grid.restore();
        self.history.reset();
        let (player, _) = self.grid.find_player().ok_or_else(|| SimError::InvalidArena {
            reason: "no player tank in the arena".to_string(),
        })?;
        self.location.reset(player);
        self.saved_object = ArenaObject::Empty;
        self.inventory = self.start_inventory;
        self.counters = ScoreCounters::default();
        self.timers = LevelTimers::new(self.grid.floors());
        self.dead = false;
        self.solved = false;
        self.selected_ammo = None;
        self.pending_decay = None;
        if !self.replaying {
            self.replay.clear();
        }
        self.flush_dirty();
        log::info!("level {:?} reset", self.info.name);
        Ok(())
    }

    /// The applied part of the recording as a solution for this level.
    pub fn export_solution(&self) -> Result<Solution, SimError> {
        if self.replay.is_tainted() {
            return Err(SimError::Unreplayable);
        }
        Ok(Solution {
            header: SolutionHeader {
                level_name: self.info.name.clone(),
                author: self.info.author.clone(),
                level_number: self.info.number,
            },
            entries: self.replay.applied().to_vec(),
        })
    }
}

/// The replay entry for a completed request, or `None` when the alphabet
/// cannot express it.
fn replay_entry(
    request: &Request,
    action: &Action,
    before: &SessionMarks,
    facing: Option<Direction>,
) -> Option<ReplayEntry> {
    if action.aborted {
        return None;
    }
    match *request {
        Request::Movement { dx, dy } if action.status.is_plain() => {
            ReplayEntry::from_intent(false, dx, dy)
        }
        Request::Laser {
            dx,
            dy,
            ox,
            oy,
            laser: LaserType::Green,
            shooter: Shooter::Player,
        } => {
            let origin = before.location.current();
            let aimed = Direction::from_delta(Delta::new(dx, dy));
            (origin.x == ox && origin.y == oy && aimed.is_some() && aimed == facing)
                .then_some(ReplayEntry::Shoot)
        }
        _ => None,
    }
}
