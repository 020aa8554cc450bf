//! Tank movement: plain and diagonal steps, boost, magnet and frozen moves.

use ltank_core::{
    AmmoKind, ArenaObject, Capabilities, Delta, Direction, Era, HistoryStatus, Layer,
    RejectReason, SimError, SoundEvent,
};
use ltank_grid::GridError;

use crate::request::StepControl;
use crate::session::{Action, GameSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Plain,
    Boost,
    Magnet,
}

impl Mode {
    fn status(self) -> HistoryStatus {
        match self {
            Self::Plain => HistoryStatus::plain(),
            Self::Boost => HistoryStatus::boost(),
            Self::Magnet => HistoryStatus::magnet(),
        }
    }

    fn ammo(self) -> Option<AmmoKind> {
        match self {
            Self::Plain => None,
            Self::Boost => Some(AmmoKind::Boost),
            Self::Magnet => Some(AmmoKind::Magnet),
        }
    }
}

/// Outcome of one cell of tank travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Blocked,
    Moved,
    /// Moved onto ice; travel continues without pushing.
    Slide,
    /// Moved, and the cell ends travel (stairs, portal, goal, water).
    Stop,
}

impl GameSession {
    pub(crate) fn resolve_movement(
        &mut self,
        delta: Delta,
        frozen: bool,
        ctl: &StepControl,
    ) -> Result<Action, SimError> {
        let mode = self.classify(delta, frozen)?;
        if let Some(ammo) = mode.ammo() {
            if !self.config.cheats && !self.inventory.take(ammo) {
                return Err(RejectReason::NoAmmo.into());
            }
        }

        let start = self.location.current();
        let start_era = self.grid.era();
        let unit = delta.unit();
        if !frozen {
            if let Some(dir) = Direction::from_delta(unit) {
                self.guarded(|s| s.turn_tank(dir));
            }
        }

        let reach = match mode {
            Mode::Plain => 1,
            Mode::Boost => self.config.boost_reach,
            Mode::Magnet => self.config.magnet_reach,
        };
        let pushes = mode != Mode::Magnet;
        let mut aborted = false;
        'travel: for i in 0..reach {
            if ctl.aborted() {
                aborted = true;
                break;
            }
            if i > 0 {
                ctl.pace();
            }
            let mut step = self
                .guarded(|s| s.step_tank(unit, pushes, ctl))
                .unwrap_or(Step::Blocked);
            while step == Step::Slide {
                if ctl.aborted() {
                    aborted = true;
                    break 'travel;
                }
                if ctl.halted() {
                    break 'travel;
                }
                ctl.pace();
                step = match self.guarded(|s| s.step_tank(unit, false, ctl)) {
                    Some(Step::Blocked) | None => Step::Stop,
                    Some(next) => next,
                };
            }
            if step != Step::Moved {
                break;
            }
        }

        if self.location.current() != start || self.grid.era() != start_era {
            self.counters.moves += 1;
            self.sound(SoundEvent::Move);
            let floor = self.location.current().floor;
            self.guarded(|s| s.tick_timers(floor, true));
        }
        Ok(Action {
            status: mode.status(),
            aborted,
        })
    }

    fn classify(&self, delta: Delta, frozen: bool) -> Result<Mode, SimError> {
        let magnitude = delta.magnitude();
        if magnitude == 0 {
            return Err(RejectReason::InvalidDelta.into());
        }
        if magnitude == 1 {
            return Ok(Mode::Plain);
        }
        if frozen {
            return Err(RejectReason::InvalidDelta.into());
        }
        if !delta.is_axis_aligned() {
            return Err(RejectReason::NotAxisAligned.into());
        }
        if magnitude == u32::from(self.config.boost_reach) {
            Ok(Mode::Boost)
        } else if magnitude == u32::from(self.config.magnet_reach) {
            Ok(Mode::Magnet)
        } else {
            Err(RejectReason::InvalidDelta.into())
        }
    }

    fn turn_tank(&mut self, dir: Direction) -> Result<(), GridError> {
        let addr = self.location.current().at(Layer::LowerObjects);
        let tank = self.grid.get(addr)?;
        if tank.facing() != Some(dir) {
            self.grid.set(addr, tank.with_facing(dir))?;
        }
        Ok(())
    }

    fn step_tank(&mut self, unit: Delta, push: bool, ctl: &StepControl) -> Result<Step, GridError> {
        let to = self.location.current().offset(unit);
        if !self.grid.contains(to) {
            return Ok(Step::Blocked);
        }
        match self.grid.get(to.at(Layer::LowerObjects))? {
            ArenaObject::Gate { open: false } => {
                if !self.inventory.take_key() {
                    return Ok(Step::Blocked);
                }
                self.grid
                    .set(to.at(Layer::LowerObjects), ArenaObject::Gate { open: true })?;
                self.sound(SoundEvent::GateOpen);
            }
            obj if obj.is_solid() => {
                if !(push && obj.is_movable()) || !self.push_objects(to, unit, true, ctl)? {
                    return Ok(Step::Blocked);
                }
            }
            _ => {}
        }
        self.relocate_tank(to)?;
        self.enter_cell(true)
    }

    /// Effects of arriving on the current cell. Transit cells (stairs,
    /// portals) only act when `transit` is set, so arrival on the far side
    /// does not bounce back.
    fn enter_cell(&mut self, transit: bool) -> Result<Step, GridError> {
        let pos = self.location.current();
        match self.grid.get(pos.at(Layer::UpperGround))? {
            ArenaObject::Key => {
                self.inventory.keys = self.inventory.keys.saturating_add(1);
                self.grid.set(pos.at(Layer::UpperGround), ArenaObject::Empty)?;
                self.sound(SoundEvent::Pickup);
            }
            ArenaObject::Pickup(kind) => {
                self.inventory.add(kind, 1);
                self.grid.set(pos.at(Layer::UpperGround), ArenaObject::Empty)?;
                self.sound(SoundEvent::Pickup);
            }
            _ => {}
        }

        match self.grid.get(pos.at(Layer::LowerGround))? {
            ArenaObject::Water => {
                self.settle(pos)?;
                Ok(Step::Stop)
            }
            ArenaObject::Goal => {
                if !self.solved {
                    log::info!("level solved at {pos}");
                    self.solved = true;
                    self.sound(SoundEvent::Win);
                }
                Ok(Step::Stop)
            }
            ArenaObject::Ice => Ok(Step::Slide),
            ArenaObject::Stairs { up } if transit => {
                self.take_stairs(up)?;
                Ok(Step::Stop)
            }
            ArenaObject::TimePortal { era } if transit => {
                self.travel_to(era)?;
                Ok(Step::Stop)
            }
            _ => Ok(Step::Moved),
        }
    }

    fn take_stairs(&mut self, up: bool) -> Result<(), GridError> {
        let pos = self.location.current();
        let floor = if up {
            pos.floor.checked_add(1)
        } else {
            pos.floor.checked_sub(1)
        };
        let Some(floor) = floor.filter(|f| *f < self.grid.floors()) else {
            return Ok(());
        };
        let target = pos.with_floor(floor);
        if self.grid.get(target.at(Layer::LowerObjects))?.is_solid() {
            return Ok(());
        }
        log::debug!("stairs {} -> floor {floor}", pos.floor);
        self.relocate_tank(target)?;
        self.enter_cell(false).map(|_| ())
    }

    fn travel_to(&mut self, era: Era) -> Result<(), GridError> {
        let from = self.grid.era();
        if era == from {
            return Ok(());
        }
        let addr = self.location.current().at(Layer::LowerObjects);
        let arriving = self.grid.get_in(era, addr)?;
        if arriving.is_solid() {
            return Ok(());
        }
        let tank = self.grid.get(addr)?;
        self.grid.set(addr, self.saved_object)?;
        self.saved_object = arriving;
        self.grid.switch_era(era);
        self.grid.set(addr, tank)?;
        log::debug!("time travel {from} -> {era}");
        self.sound(SoundEvent::TimeTravel);
        self.enter_cell(false).map(|_| ())
    }
}
