//! Rule resolution behind [`GameSession::resolve`](crate::GameSession::resolve).
//!
//! Each submodule adds one family of methods to [`GameSession`]. Helpers
//! that touch the grid return `Result<_, GridError>` and run inside
//! [`GameSession::guarded`], so a failed step rolls back on its own
//! without failing the whole run.

mod blast;
mod decay;
mod laser;
mod movement;
mod rules;

use smallvec::SmallVec;

use ltank_core::{ArenaObject, Capabilities, Delta, Layer, Position, SoundEvent};
use ltank_grid::GridError;

use crate::request::StepControl;
use crate::session::GameSession;

impl GameSession {
    /// Move the tank from its current cell to `to`.
    ///
    /// The vacated cell gets back whatever the tank was standing on, and
    /// the occupant of `to` becomes the new saved object.
    pub(crate) fn relocate_tank(&mut self, to: Position) -> Result<(), GridError> {
        let from = self.location.current();
        let tank = self.grid.get(from.at(Layer::LowerObjects))?;
        let arriving = self.grid.get(to.at(Layer::LowerObjects))?;
        self.grid.set(from.at(Layer::LowerObjects), self.saved_object)?;
        self.saved_object = arriving;
        self.grid.set(to.at(Layer::LowerObjects), tank)?;
        self.location.set(to);
        self.schedule_decay(from)
    }

    /// Push the movable object at `first` one cell by `step`, which may be
    /// diagonal.
    ///
    /// With `chain`, a line of adjacent movable objects is pushed as a
    /// unit. Nothing moves unless the cell past the last object is inside
    /// the arena and empty. The front object then lands: it sinks in
    /// water or slides on ice.
    pub(crate) fn push_objects(
        &mut self,
        first: Position,
        step: Delta,
        chain: bool,
        ctl: &StepControl,
    ) -> Result<bool, GridError> {
        let mut links: SmallVec<[Position; 8]> = SmallVec::new();
        links.push(first);
        let mut next = first.offset(step);
        loop {
            if !self.grid.contains(next) {
                return Ok(false);
            }
            let occupant = self.grid.get(next.at(Layer::LowerObjects))?;
            if occupant.is_empty() {
                break;
            }
            if !(chain && occupant.is_movable()) {
                return Ok(false);
            }
            links.push(next);
            next = next.offset(step);
        }

        for &pos in links.iter().rev() {
            let obj = self.grid.get(pos.at(Layer::LowerObjects))?;
            self.grid.set(pos.at(Layer::LowerObjects), ArenaObject::Empty)?;
            self.grid.set(pos.offset(step).at(Layer::LowerObjects), obj)?;
        }
        log::trace!("pushed {} object(s) from {first} by {step:?}", links.len());
        self.sound(SoundEvent::Push);
        self.slide_object(next, step, ctl).map(|_| true)
    }

    /// Let the object at `at` react to its ground: sink in water, keep
    /// sliding over ice until something stops it.
    fn slide_object(
        &mut self,
        mut at: Position,
        step: Delta,
        ctl: &StepControl,
    ) -> Result<Position, GridError> {
        loop {
            if self.settle(at)? {
                return Ok(at);
            }
            let ground = self.grid.get(at.at(Layer::LowerGround))?;
            if ground != ArenaObject::Ice || ctl.halted() || ctl.aborted() {
                return Ok(at);
            }
            let next = at.offset(step);
            if !self.grid.contains(next)
                || !self.grid.get(next.at(Layer::LowerObjects))?.is_empty()
            {
                return Ok(at);
            }
            ctl.pace();
            let obj = self.grid.get(at.at(Layer::LowerObjects))?;
            self.grid.set(at.at(Layer::LowerObjects), ArenaObject::Empty)?;
            self.grid.set(next.at(Layer::LowerObjects), obj)?;
            at = next;
        }
    }

    /// Apply water to whatever stands at `pos`. A tank there dies; a
    /// movable object sinks, and a sunk block becomes a bridge. Returns
    /// `true` when the cell is water.
    pub(crate) fn settle(&mut self, pos: Position) -> Result<bool, GridError> {
        if self.grid.get(pos.at(Layer::LowerGround))? != ArenaObject::Water {
            return Ok(false);
        }
        let occupant = self.grid.get(pos.at(Layer::LowerObjects))?;
        if occupant.is_player() {
            if !self.dead {
                log::info!("tank sank at {pos}");
                self.dead = true;
                self.sound(SoundEvent::Death);
            }
        } else if occupant.is_movable() {
            self.grid.set(pos.at(Layer::LowerObjects), ArenaObject::Empty)?;
            if occupant == ArenaObject::Block {
                self.grid.set(pos.at(Layer::LowerGround), ArenaObject::Bridge)?;
            }
            self.sound(SoundEvent::Sink);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::LevelBuilder;
    use crate::request::{Request, StepControl};
    use crate::session::GameSession;
    use crate::SessionConfig;
    use ltank_core::{ArenaObject, CellAddr, Layer, Position};

    fn session(rows: &[&str]) -> GameSession {
        let mut builder = LevelBuilder::new(rows[0].len() as u32, rows.len() as u32, 1);
        for (y, row) in rows.iter().enumerate() {
            builder = builder.row(0, y as i32, row);
        }
        GameSession::new(builder.build().unwrap(), SessionConfig::default()).unwrap()
    }

    fn lower(s: &GameSession, x: i32, y: i32) -> ArenaObject {
        s.grid()
            .get(CellAddr::new(x, y, 0, Layer::LowerObjects))
            .unwrap()
    }

    #[test]
    fn block_pushed_into_water_becomes_bridge() {
        let mut s = session(&[">o~."]);
        s.resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
            .unwrap();
        assert_eq!(s.player(), Position::new(1, 0, 0));
        assert_eq!(lower(&s, 2, 0), ArenaObject::Empty);
        assert_eq!(
            s.grid()
                .get(CellAddr::new(2, 0, 0, Layer::LowerGround))
                .unwrap(),
            ArenaObject::Bridge
        );
    }

    #[test]
    fn pushed_block_slides_over_ice() {
        let mut s = session(&[">o***#"]);
        s.resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
            .unwrap();
        assert_eq!(lower(&s, 4, 0), ArenaObject::Block);
        assert_eq!(lower(&s, 2, 0), ArenaObject::Empty);
    }

    #[test]
    fn chain_blocked_by_wall_moves_nothing() {
        let mut s = session(&[">oo#"]);
        let report = s
            .resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
            .unwrap();
        assert_eq!(report.status, None);
        assert_eq!(lower(&s, 1, 0), ArenaObject::Block);
        assert_eq!(lower(&s, 2, 0), ArenaObject::Block);
        assert_eq!(s.player(), Position::new(0, 0, 0));
    }
}
