//! The simulation worker: at most one resolution run in flight.
//!
//! A run moves the [`GameSession`] into a named thread, resolves the armed
//! request, drains any queued object pushes, and hands the session back
//! through the thread's `JoinHandle`. The owner polls
//! [`is_alive`](SimulationWorker::is_alive) or blocks on
//! [`wait`](SimulationWorker::wait), then calls
//! [`join`](SimulationWorker::join) exactly once per
//! [`start`](SimulationWorker::start).
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──activate_*──▶ Idle (armed) ──start──▶ Resolving ──▶ Done ──join──▶ Idle
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use ltank_core::{ArenaObject, BombKind, HistoryStatus, LaserType, SimError};

use crate::config::{ConfigError, WorkerConfig};
use crate::request::{Request, RunReport, Shooter, StepControl};
use crate::session::GameSession;

/// Where the worker is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// No run in flight; the session is available.
    Idle,
    /// A run is executing on the worker thread.
    Resolving,
    /// The run finished and is waiting to be joined.
    Done,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Result of the armed request.
    pub result: Result<RunReport, SimError>,
    /// Results of object pushes queued while the run was in flight, in
    /// submission order.
    pub followups: Vec<Result<RunReport, SimError>>,
}

type RunHandle = JoinHandle<Option<(GameSession, RunOutcome)>>;

/// Owns a [`GameSession`] and runs requests against it off the caller's
/// thread, one at a time.
#[derive(Debug)]
pub struct SimulationWorker {
    config: WorkerConfig,
    session: Option<GameSession>,
    pending: Option<Request>,
    handle: Option<RunHandle>,
    running: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
    halt: Arc<AtomicBool>,
    done_rx: Option<Receiver<()>>,
    followup_tx: Sender<Request>,
    followup_rx: Receiver<Request>,
}

impl SimulationWorker {
    /// Wrap `session`. Validates `config`.
    pub fn new(session: GameSession, config: WorkerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (followup_tx, followup_rx) = crossbeam_channel::unbounded();
        Ok(Self {
            config,
            session: Some(session),
            pending: None,
            handle: None,
            running: Arc::new(AtomicBool::new(false)),
            abort: Arc::new(AtomicBool::new(false)),
            halt: Arc::new(AtomicBool::new(false)),
            done_rx: None,
            followup_tx,
            followup_rx,
        })
    }

    // ── Activation ─────────────────────────────────────────────────

    /// Arm a tank move.
    pub fn activate_movement(&mut self, dx: i32, dy: i32) -> Result<(), SimError> {
        self.arm(Request::Movement { dx, dy })
    }

    /// Arm a one-cell move that keeps the tank's facing.
    pub fn activate_frozen_movement(&mut self, dx: i32, dy: i32) -> Result<(), SimError> {
        self.arm(Request::FrozenMovement { dx, dy })
    }

    /// Arm a laser shot.
    pub fn activate_lasers(
        &mut self,
        dx: i32,
        dy: i32,
        ox: i32,
        oy: i32,
        laser: LaserType,
        shooter: Shooter,
    ) -> Result<(), SimError> {
        self.arm(Request::Laser {
            dx,
            dy,
            ox,
            oy,
            laser,
            shooter,
        })
    }

    /// Arm an object push.
    pub fn activate_objects(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        obj: Option<ArenaObject>,
    ) -> Result<(), SimError> {
        self.arm(Request::Objects { x, y, dx, dy, obj })
    }

    /// Arm a bomb.
    pub fn activate_blast(&mut self, kind: BombKind) -> Result<(), SimError> {
        self.arm(Request::Blast { kind })
    }

    /// Arm an arbitrary request.
    pub fn arm(&mut self, request: Request) -> Result<(), SimError> {
        if self.is_alive() {
            return Err(SimError::WorkerBusy);
        }
        self.pending = Some(request);
        Ok(())
    }

    /// Push the object at `(x, y)` once the current run allows it. Starts
    /// a run right away when idle. Otherwise the push is queued behind the
    /// current run and its result lands in that run's
    /// [`RunOutcome::followups`]; a push that arrives after the thread's
    /// last drain is resolved by [`join`](Self::join).
    pub fn update_pushed_position_later(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
    ) -> Result<(), SimError> {
        let request = Request::Objects {
            x,
            y,
            dx,
            dy,
            obj: None,
        };
        if self.state() == WorkerState::Idle {
            self.arm(request)?;
            return self.start();
        }
        log::debug!("queueing {request:?} behind the current run");
        self.followup_tx
            .send(request)
            .map_err(|_| SimError::SessionLost)
    }

    // ── Run control ────────────────────────────────────────────────

    /// Spawn the run for the armed request.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.is_alive() {
            log::error!("start() while a run is in flight");
            return Err(SimError::WorkerBusy);
        }
        if self.handle.is_some() {
            return Err(SimError::NotJoined);
        }
        let Some(request) = self.pending.take() else {
            return Err(SimError::NoRequest);
        };
        let Some(session) = self.session.take() else {
            return Err(SimError::SessionLost);
        };

        self.abort.store(false, Ordering::Release);
        self.halt.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);

        // The session travels through a channel so a failed spawn can
        // take it back.
        let (session_tx, session_rx) = crossbeam_channel::bounded(1);
        if let Err(returned) = session_tx.send(session) {
            self.session = Some(returned.into_inner());
            self.running.store(false, Ordering::Release);
            return Err(SimError::SessionLost);
        }
        let fallback = session_rx.clone();
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let ctl = StepControl::new(
            Arc::clone(&self.abort),
            Arc::clone(&self.halt),
            self.config.step_delay,
        );
        let running = Arc::clone(&self.running);
        let followups = self.followup_rx.clone();

        let spawned = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || {
                let outcome = session_rx.recv().ok().map(|mut session| {
                    let result = session.resolve(request, &ctl);
                    let mut queued = Vec::new();
                    while !ctl.aborted() {
                        let Ok(next) = followups.try_recv() else {
                            break;
                        };
                        queued.push(session.resolve(next, &ctl));
                    }
                    (
                        session,
                        RunOutcome {
                            result,
                            followups: queued,
                        },
                    )
                });
                running.store(false, Ordering::Release);
                let _ = done_tx.send(());
                outcome
            });

        match spawned {
            Ok(handle) => {
                log::debug!("run started: {request:?}");
                self.handle = Some(handle);
                self.done_rx = Some(done_rx);
                Ok(())
            }
            Err(err) => {
                log::error!("failed to spawn {:?}: {err}", self.config.thread_name);
                self.running.store(false, Ordering::Release);
                self.session = fallback.try_recv().ok();
                self.pending = Some(request);
                Err(SimError::ThreadSpawnFailed {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// `true` while a run is executing.
    pub fn is_alive(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        match (&self.handle, self.is_alive()) {
            (None, _) => WorkerState::Idle,
            (Some(_), true) => WorkerState::Resolving,
            (Some(_), false) => WorkerState::Done,
        }
    }

    /// Block until the current run finishes. Returns at once when nothing
    /// is in flight.
    pub fn wait(&self) {
        if let Some(done) = &self.done_rx {
            // A disconnect means the thread ended without signalling.
            let _ = done.recv();
        }
    }

    /// Collect the finished run and take the session back. Blocks if the
    /// run is still executing.
    pub fn join(&mut self) -> Result<RunOutcome, SimError> {
        let Some(handle) = self.handle.take() else {
            return Err(SimError::NoRequest);
        };
        self.done_rx = None;
        match handle.join() {
            Ok(Some((mut session, mut outcome))) => {
                self.resolve_late_pushes(&mut session, &mut outcome.followups);
                self.session = Some(session);
                Ok(outcome)
            }
            Ok(None) | Err(_) => {
                self.running.store(false, Ordering::Release);
                log::error!("simulation thread ended without returning the session");
                Err(SimError::SessionLost)
            }
        }
    }

    // The thread stops draining before it clears `running`, so a push sent
    // in between sits in the channel until the run is joined.
    fn resolve_late_pushes(
        &self,
        session: &mut GameSession,
        followups: &mut Vec<Result<RunReport, SimError>>,
    ) {
        let ctl = StepControl::new(
            Arc::clone(&self.abort),
            Arc::clone(&self.halt),
            self.config.step_delay,
        );
        while let Ok(next) = self.followup_rx.try_recv() {
            if ctl.aborted() {
                log::debug!("dropping {next:?} queued behind an aborted run");
                continue;
            }
            log::debug!("resolving {next:?} queued after the last drain");
            followups.push(session.resolve(next, &ctl));
        }
    }

    /// Start the armed request, wait for it and join it.
    pub fn run_to_completion(&mut self) -> Result<RunOutcome, SimError> {
        self.start()?;
        self.wait();
        self.join()
    }

    /// Ask the current run to stop at its next step boundary.
    pub fn abort_loop(&self) {
        self.abort.store(true, Ordering::Release);
    }

    /// Ask sliding objects to stop where they are.
    pub fn halt_moving_objects(&self) {
        self.halt.store(true, Ordering::Release);
    }

    // ── Session access ─────────────────────────────────────────────

    /// The session, when no run holds it.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Mutable session access, only while idle.
    pub fn session_mut(&mut self) -> Result<&mut GameSession, SimError> {
        match self.state() {
            WorkerState::Resolving => Err(SimError::WorkerBusy),
            WorkerState::Done => Err(SimError::NotJoined),
            WorkerState::Idle => self.session.as_mut().ok_or(SimError::SessionLost),
        }
    }

    /// Undo the newest action.
    pub fn undo(&mut self) -> Result<HistoryStatus, SimError> {
        self.session_mut()?.undo()
    }

    /// Redo the newest undone action.
    pub fn redo(&mut self) -> Result<HistoryStatus, SimError> {
        self.session_mut()?.redo()
    }

    /// Restart the level. Drops any armed request and queued pushes.
    pub fn reset_level(&mut self) -> Result<(), SimError> {
        self.session_mut()?.reset_level()?;
        self.pending = None;
        while self.followup_rx.try_recv().is_ok() {}
        Ok(())
    }

    /// Stop any run and return the session.
    pub fn into_session(mut self) -> Option<GameSession> {
        if self.handle.is_some() {
            self.abort_loop();
            let _ = self.join();
        }
        self.session.take()
    }
}

impl Drop for SimulationWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.abort.store(true, Ordering::Release);
            let _ = handle.join();
        }
    }
}
