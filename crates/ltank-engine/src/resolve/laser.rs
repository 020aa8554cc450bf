//! Beam propagation, player shots and turret fire.

use smallvec::SmallVec;

use ltank_core::{
    ArenaObject, Capabilities, Delta, Direction, HistoryStatus, LaserType, Layer, Position,
    RejectReason, SimError, SoundEvent,
};
use ltank_grid::GridError;

use super::rules::{laser_effect, LaserEffect};
use crate::request::{Shooter, StepControl};
use crate::session::{Action, GameSession};

/// Beam travel budget per arena cell. Mirror loops are cut off past it.
const STEPS_PER_CELL: usize = 4;

enum BeamStep {
    Continue(Position, Direction),
    Halt,
}

impl GameSession {
    pub(crate) fn resolve_laser(
        &mut self,
        delta: Delta,
        ox: i32,
        oy: i32,
        laser: LaserType,
        shooter: Shooter,
        ctl: &StepControl,
    ) -> Result<Action, SimError> {
        if delta.magnitude() != 1 {
            return Err(RejectReason::InvalidDelta.into());
        }
        let Some(dir) = Direction::from_delta(delta) else {
            return Err(RejectReason::NotAxisAligned.into());
        };
        let floor = self.location.current().floor;
        let origin = Position::new(ox, oy, floor);
        if !self.grid.contains(origin) {
            return Err(SimError::Bounds { x: ox, y: oy, floor });
        }

        if shooter == Shooter::Player {
            if let Some(ammo) = laser.ammo() {
                if self.selected_ammo != Some(ammo) {
                    return Err(RejectReason::AmmoNotSelected.into());
                }
                if !self.config.cheats && !self.inventory.take(ammo) {
                    return Err(RejectReason::NoAmmo.into());
                }
            }
            self.counters.shots += 1;
        }
        self.sound(SoundEvent::Laser);

        let aborted = self.fire_beam(origin, dir, laser, ctl);
        Ok(Action {
            status: HistoryStatus::for_laser(laser),
            aborted,
        })
    }

    /// Propagate a beam starting next to `origin`. Returns `true` when the
    /// run was aborted mid-flight.
    pub(crate) fn fire_beam(
        &mut self,
        origin: Position,
        dir: Direction,
        laser: LaserType,
        ctl: &StepControl,
    ) -> bool {
        let budget = STEPS_PER_CELL * self.grid.cell_count().max(1);
        let (mut pos, mut dir) = (origin, dir);
        for _ in 0..budget {
            if ctl.aborted() {
                return true;
            }
            ctl.pace();
            match self.guarded(|s| s.beam_step(pos, dir, laser, ctl)) {
                Some(BeamStep::Continue(next, turned)) => {
                    pos = next;
                    dir = turned;
                }
                Some(BeamStep::Halt) | None => return false,
            }
        }
        log::warn!("{laser:?} beam from {origin} exceeded {budget} steps; cut off");
        false
    }

    fn beam_step(
        &mut self,
        pos: Position,
        dir: Direction,
        laser: LaserType,
        ctl: &StepControl,
    ) -> Result<BeamStep, GridError> {
        let next = pos.offset(dir.delta());
        if !self.grid.contains(next) {
            return Ok(BeamStep::Halt);
        }
        let occupant = self.grid.get(next.at(Layer::LowerObjects))?;
        let effect = laser_effect(occupant, laser, dir, self.config.stun_turns);
        log::trace!("{laser:?} beam at {next}: {occupant:?} -> {effect:?}");
        match effect {
            LaserEffect::Pass => {
                self.mark_beam(next, dir)?;
                Ok(BeamStep::Continue(next, dir))
            }
            LaserEffect::Halt => Ok(BeamStep::Halt),
            LaserEffect::Reflect(turned) => {
                self.sound(SoundEvent::Reflect);
                self.mark_beam(next, turned)?;
                Ok(BeamStep::Continue(next, turned))
            }
            LaserEffect::Replace { with, halt } => {
                self.grid.set(next.at(Layer::LowerObjects), with)?;
                self.sound(match with {
                    ArenaObject::AntiTank { stun, .. } if stun > 0 => SoundEvent::Stun,
                    ArenaObject::Gate { .. } => SoundEvent::GateOpen,
                    _ => SoundEvent::Destroy,
                });
                if halt {
                    return Ok(BeamStep::Halt);
                }
                self.mark_beam(next, dir)?;
                Ok(BeamStep::Continue(next, dir))
            }
            LaserEffect::Push => {
                self.push_objects(next, dir.delta(), false, ctl)?;
                Ok(BeamStep::Halt)
            }
            LaserEffect::Kill { halt } => {
                if !self.dead {
                    log::info!("tank destroyed at {next} by {laser:?} beam");
                    self.dead = true;
                    self.sound(SoundEvent::Death);
                }
                if halt {
                    Ok(BeamStep::Halt)
                } else {
                    Ok(BeamStep::Continue(next, dir))
                }
            }
        }
    }

    fn mark_beam(&mut self, pos: Position, dir: Direction) -> Result<(), GridError> {
        self.grid.set(
            pos.at(Layer::Virtual),
            ArenaObject::Beam {
                horizontal: dir.is_horizontal(),
            },
        )
    }

    /// Let every active turret on the player's floor with a clear line of
    /// sight fire a green beam, in scan order, until the tank is dead.
    pub(crate) fn enemy_fire(&mut self, ctl: &StepControl) {
        let floor = self.location.current().floor;
        let turrets: SmallVec<[(Position, Direction); 4]> = self
            .grid
            .find(Layer::LowerObjects, |obj| {
                matches!(obj, ArenaObject::AntiTank { stun: 0, .. })
            })
            .filter(|(pos, _)| pos.floor == floor)
            .filter_map(|(pos, obj)| obj.facing().map(|facing| (pos, facing)))
            .collect();

        for (pos, facing) in turrets {
            if self.dead || ctl.aborted() {
                break;
            }
            // An earlier shot may have moved or killed this turret.
            let still_armed = matches!(
                self.grid.get(pos.at(Layer::LowerObjects)),
                Ok(ArenaObject::AntiTank { stun: 0, facing: f }) if f == facing
            );
            if !still_armed || !self.sees_player(pos, facing) {
                continue;
            }
            log::debug!("turret at {pos} fires {facing:?}");
            self.sound(SoundEvent::Laser);
            self.fire_beam(pos, facing, LaserType::Green, ctl);
        }
    }

    fn sees_player(&self, from: Position, facing: Direction) -> bool {
        let mut pos = from.offset(facing.delta());
        while self.grid.contains(pos) {
            match self.grid.get(pos.at(Layer::LowerObjects)) {
                Ok(obj) if obj.is_player() => return true,
                Ok(obj) if obj.is_empty() || !obj.is_solid() => {}
                _ => return false,
            }
            pos = pos.offset(facing.delta());
        }
        false
    }
}
