//! Solution playback.
//!
//! A [`Playback`] owns a [`ReplayLog`] loaded from a decoded [`Solution`]
//! and re-emits its entries one at a time as movement and laser requests.
//! The session is reset to the authored level first and flagged as
//! replaying, so nothing played back is recorded again.

use ltank_core::{LaserType, SimError};
use ltank_replay::{ReplayEntry, ReplayLog, Solution};

use crate::request::{Request, StepControl};
use crate::session::GameSession;
use crate::worker::SimulationWorker;

/// Where a playback ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Entries resolved.
    pub applied: usize,
    /// The level was solved.
    pub solved: bool,
    /// The tank died.
    pub dead: bool,
}

/// Drives recorded entries through the resolution rules.
#[derive(Clone, Debug, Default)]
pub struct Playback {
    log: ReplayLog,
}

impl Playback {
    /// Playback of a decoded solution.
    pub fn new(solution: &Solution) -> Self {
        Self::from_entries(solution.entries.clone())
    }

    /// Playback of raw entries.
    pub fn from_entries(entries: Vec<ReplayEntry>) -> Self {
        Self {
            log: ReplayLog::from_entries(entries),
        }
    }

    /// Entries not yet emitted.
    pub fn remaining(&self) -> usize {
        self.log.len() - self.log.head()
    }

    /// `true` once every entry was emitted.
    pub fn is_finished(&self) -> bool {
        !self.log.try_redo()
    }

    /// Start over from the first entry.
    pub fn rewind(&mut self) {
        self.log.rewind();
    }

    /// The request for the next entry, as seen from `session`. Shots fire
    /// green along the tank's current facing.
    pub fn next_request(&mut self, session: &GameSession) -> Result<Option<Request>, SimError> {
        let Some(entry) = self.log.redo() else {
            return Ok(None);
        };
        let request = match entry.direction() {
            Some(dir) => {
                let d = dir.delta();
                Request::Movement { dx: d.dx, dy: d.dy }
            }
            None => session
                .shot(LaserType::Green)
                .ok_or_else(|| SimError::InvalidArena {
                    reason: format!("no player tank to shoot from at {}", session.player()),
                })?,
        };
        Ok(Some(request))
    }

    /// Reset `session` and replay every entry synchronously.
    pub fn run_session(&mut self, session: &mut GameSession) -> Result<PlaybackSummary, SimError> {
        self.rewind();
        session.reset_level()?;
        session.set_replaying(true);
        let result = self.drive_session(session);
        session.set_replaying(false);
        result
    }

    fn drive_session(&mut self, session: &mut GameSession) -> Result<PlaybackSummary, SimError> {
        let ctl = StepControl::detached();
        let mut applied = 0;
        while let Some(request) = self.next_request(session)? {
            session.resolve(request, &ctl)?;
            applied += 1;
        }
        log::info!("played back {applied} entries");
        Ok(summary(session, applied))
    }

    /// Reset the worker's level and replay every entry, one run per entry.
    pub fn run_worker(
        &mut self,
        worker: &mut SimulationWorker,
    ) -> Result<PlaybackSummary, SimError> {
        self.rewind();
        worker.reset_level()?;
        worker.session_mut()?.set_replaying(true);
        let result = self.drive_worker(worker);
        if let Ok(session) = worker.session_mut() {
            session.set_replaying(false);
        }
        result
    }

    fn drive_worker(&mut self, worker: &mut SimulationWorker) -> Result<PlaybackSummary, SimError> {
        let mut applied = 0;
        loop {
            let next = self.next_request(worker.session_mut()?)?;
            let Some(request) = next else {
                break;
            };
            worker.arm(request)?;
            worker.run_to_completion()?.result?;
            applied += 1;
        }
        log::info!("played back {applied} entries through the worker");
        Ok(summary(worker.session_mut()?, applied))
    }
}

fn summary(session: &GameSession, applied: usize) -> PlaybackSummary {
    PlaybackSummary {
        applied,
        solved: session.is_solved(),
        dead: session.is_dead(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelBuilder;
    use crate::{SessionConfig, WorkerConfig};
    use ltank_core::Position;

    fn level() -> GameSession {
        let level = LevelBuilder::new(5, 3, 1)
            .name("loop")
            .row(0, 0, "#####")
            .row(0, 1, "#>%$#")
            .row(0, 2, "#####")
            .build()
            .unwrap();
        GameSession::new(level, SessionConfig::default()).unwrap()
    }

    #[test]
    fn playback_solves_and_does_not_record() {
        let mut s = level();
        let entries = vec![ReplayEntry::Shoot, ReplayEntry::MoveRight, ReplayEntry::MoveRight];
        let mut playback = Playback::from_entries(entries);
        assert_eq!(playback.remaining(), 3);
        let summary = playback.run_session(&mut s).unwrap();
        assert_eq!(
            summary,
            PlaybackSummary {
                applied: 3,
                solved: true,
                dead: false
            }
        );
        assert!(playback.is_finished());
        assert!(s.replay_log().is_empty());
        assert_eq!(s.player(), Position::new(3, 1, 0));
    }

    #[test]
    fn worker_playback_matches_session_playback() {
        let entries = vec![ReplayEntry::Shoot, ReplayEntry::MoveRight];
        let mut direct = level();
        Playback::from_entries(entries.clone())
            .run_session(&mut direct)
            .unwrap();

        let mut worker = SimulationWorker::new(level(), WorkerConfig::default()).unwrap();
        Playback::from_entries(entries).run_worker(&mut worker).unwrap();
        let via_worker = worker.session().unwrap();
        assert_eq!(via_worker.trace(), direct.trace());
        assert_eq!(via_worker.counters(), direct.counters());
    }

    #[test]
    fn playback_into_dead_tank_fails() {
        let level = LevelBuilder::new(3, 1, 1).row(0, 0, ">~.").build().unwrap();
        let mut s = GameSession::new(level, SessionConfig::default()).unwrap();
        let mut playback = Playback::from_entries(vec![ReplayEntry::MoveRight; 2]);
        assert_eq!(playback.run_session(&mut s), Err(SimError::AlreadyDead));
    }
}
