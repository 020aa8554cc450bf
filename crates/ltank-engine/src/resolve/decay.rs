//! Deferred ground decay and per-floor timer ticks.

use smallvec::SmallVec;

use ltank_core::{ArenaObject, Capabilities, Layer, Position};
use ltank_grid::GridError;

use crate::session::{GameSession, PendingDecay};

impl GameSession {
    /// Queue the ground the tank just left for decay. The slot holds one
    /// transform; a previous one is applied first.
    pub(crate) fn schedule_decay(&mut self, left: Position) -> Result<(), GridError> {
        let addr = left.at(Layer::LowerGround);
        let Some(into) = self.grid.get(addr)?.decays_into() else {
            return Ok(());
        };
        if let Some(previous) = self.pending_decay.take() {
            self.apply_decay(previous)?;
        }
        self.pending_decay = Some(PendingDecay {
            era: self.grid.era(),
            addr,
            into,
        });
        Ok(())
    }

    /// Apply the queued transform, if any. Called once at the end of a run.
    pub(crate) fn apply_pending_decay(&mut self) {
        if let Some(pending) = self.pending_decay.take() {
            self.guarded(|s| s.apply_decay(pending));
        }
    }

    fn apply_decay(&mut self, pending: PendingDecay) -> Result<(), GridError> {
        log::trace!("{:?} decays into {:?}", pending.addr, pending.into);
        self.grid.set_in(pending.era, pending.addr, pending.into)?;
        if pending.era == self.grid.era() {
            self.settle(pending.addr.position())?;
        }
        Ok(())
    }

    /// Count one tick on `floor` and let stunned turrets there recover by
    /// one turn.
    pub(crate) fn tick_timers(&mut self, floor: u8, movement: bool) -> Result<(), GridError> {
        self.timers.tick(floor, movement);
        let stunned: SmallVec<[(Position, ArenaObject); 4]> = self
            .grid
            .find(Layer::LowerObjects, |obj| {
                matches!(obj, ArenaObject::AntiTank { stun, .. } if stun > 0)
            })
            .filter(|(pos, _)| pos.floor == floor)
            .collect();
        for (pos, obj) in stunned {
            if let ArenaObject::AntiTank { facing, stun } = obj {
                self.grid.set(
                    pos.at(Layer::LowerObjects),
                    ArenaObject::AntiTank {
                        facing,
                        stun: stun - 1,
                    },
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::level::LevelBuilder;
    use crate::request::{Request, StepControl};
    use crate::session::GameSession;
    use crate::SessionConfig;
    use ltank_core::{ArenaObject, CellAddr, Layer};

    #[test]
    fn timers_count_per_kind() {
        let level = LevelBuilder::new(3, 1, 1).row(0, 0, ">..").build().unwrap();
        let mut s = GameSession::new(level, SessionConfig::default()).unwrap();
        s.resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
            .unwrap();
        assert_eq!(s.timers().movement(0), 1);
        assert_eq!(s.timers().other(0), 0);
        s.undo().unwrap();
        assert_eq!(s.timers().movement(0), 0);
    }

    #[test]
    fn every_thin_ice_cell_crossed_in_one_run_decays() {
        let level = LevelBuilder::new(4, 1, 1).row(0, 0, ">::.").build().unwrap();
        let cfg = SessionConfig {
            cheats: true,
            ..SessionConfig::default()
        };
        let mut s = GameSession::new(level, cfg).unwrap();
        s.resolve(Request::Movement { dx: 3, dy: 0 }, &StepControl::detached())
            .unwrap();
        for x in [1, 2] {
            assert_eq!(
                s.grid().get(CellAddr::new(x, 0, 0, Layer::LowerGround)).unwrap(),
                ArenaObject::Water
            );
        }
        s.undo().unwrap();
        assert_eq!(
            s.grid().get(CellAddr::new(1, 0, 0, Layer::LowerGround)).unwrap(),
            ArenaObject::ThinIce
        );
    }
}
