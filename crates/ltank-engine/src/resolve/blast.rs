//! Bomb detonations and externally requested object pushes.

use ltank_core::{
    ArenaObject, BombKind, Capabilities, Delta, Direction, HistoryStatus, Layer, Position,
    RejectReason, SimError, SoundEvent,
};
use ltank_grid::GridError;

use crate::request::StepControl;
use crate::session::{Action, GameSession};

impl GameSession {
    pub(crate) fn resolve_blast(
        &mut self,
        kind: BombKind,
        ctl: &StepControl,
    ) -> Result<Action, SimError> {
        if !self.config.cheats && !self.inventory.take(kind.ammo()) {
            return Err(RejectReason::NoAmmo.into());
        }
        self.counters.others += 1;
        self.sound(SoundEvent::Blast);

        let center = self.location.current();
        let r = i32::from(self.config.blast_radius);
        log::debug!("{kind:?} at {center}, radius {r}");
        let mut aborted = false;
        'cells: for dy in -r..=r {
            for dx in -r..=r {
                if (dx, dy) == (0, 0) || dx * dx + dy * dy > r * r {
                    continue;
                }
                let pos = center.offset(Delta::new(dx, dy));
                if !self.grid.contains(pos) {
                    continue;
                }
                if ctl.aborted() {
                    aborted = true;
                    break 'cells;
                }
                self.guarded(|s| s.blast_cell(pos, kind));
            }
        }
        ctl.pace();
        self.guarded(|s| s.tick_timers(center.floor, false));
        Ok(Action {
            status: HistoryStatus::for_bomb(kind),
            aborted,
        })
    }

    fn blast_cell(&mut self, pos: Position, kind: BombKind) -> Result<(), GridError> {
        let addr = pos.at(Layer::LowerObjects);
        let occupant = self.grid.get(addr)?;
        if occupant.hardness().is_some_and(|h| h <= kind.force()) {
            let remains = if occupant.is_character() {
                ArenaObject::DeadAntiTank
            } else {
                ArenaObject::Empty
            };
            self.grid.set(addr, remains)?;
            self.sound(SoundEvent::Destroy);
        }

        match kind {
            BombKind::Bomb => {}
            BombKind::HeatBomb => {
                let ground = pos.at(Layer::LowerGround);
                if matches!(
                    self.grid.get(ground)?,
                    ArenaObject::Ice | ArenaObject::ThinIce
                ) {
                    self.grid.set(ground, ArenaObject::Water)?;
                    self.settle(pos)?;
                }
                let upper = pos.at(Layer::UpperObjects);
                if self.grid.get(upper)? == ArenaObject::Tree {
                    self.grid.set(upper, ArenaObject::Empty)?;
                }
            }
            BombKind::IceBomb => {
                let ground = pos.at(Layer::LowerGround);
                if self.grid.get(ground)? == ArenaObject::Water {
                    self.grid.set(ground, ArenaObject::Ice)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn resolve_objects(
        &mut self,
        x: i32,
        y: i32,
        delta: Delta,
        expected: Option<ArenaObject>,
        ctl: &StepControl,
    ) -> Result<Action, SimError> {
        if delta.magnitude() != 1 {
            return Err(RejectReason::InvalidDelta.into());
        }
        let Some(dir) = Direction::from_delta(delta) else {
            return Err(RejectReason::NotAxisAligned.into());
        };
        let floor = self.location.current().floor;
        let pos = Position::new(x, y, floor);
        if !self.grid.contains(pos) {
            return Err(SimError::Bounds { x, y, floor });
        }
        let occupant = self.grid.get(pos.at(Layer::LowerObjects))?;
        if !occupant.is_movable() || expected.is_some_and(|obj| obj != occupant) {
            return Err(RejectReason::NothingToPush.into());
        }
        if !self
            .guarded(|s| s.push_objects(pos, dir.delta(), false, ctl))
            .unwrap_or(false)
        {
            return Err(RejectReason::Blocked.into());
        }
        self.counters.others += 1;
        Ok(Action {
            status: HistoryStatus::plain(),
            aborted: false,
        })
    }
}
