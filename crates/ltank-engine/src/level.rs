//! Authored levels and the builder that assembles them.

use ltank_core::{
    ArenaObject, CellAddr, Direction, Era, Inventory, Layer, MirrorKind, Position, SimError,
};
use ltank_grid::CellGrid;

/// Descriptive metadata carried into solution files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelInfo {
    /// Level name.
    pub name: String,
    /// Author.
    pub author: String,
    /// Number within its level set.
    pub number: u16,
}

/// A ready-to-play level: the authored grid plus starting inventory.
#[derive(Clone, Debug)]
pub struct Level {
    /// Metadata.
    pub info: LevelInfo,
    /// The grid, with its initial state committed.
    pub grid: CellGrid,
    /// Inventory the player starts with.
    pub inventory: Inventory,
}

/// Assembles a [`Level`].
///
/// Every cell of every era starts as [`ArenaObject::Ground`]. Objects are
/// placed on their native layer.
///
/// ```
/// use ltank_engine::LevelBuilder;
///
/// let level = LevelBuilder::new(5, 3, 1)
///     .row(0, 0, "#####")
///     .row(0, 1, "#>.$#")
///     .row(0, 2, "#####")
///     .build()
///     .unwrap();
/// assert_eq!(level.grid.width(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    width: u32,
    height: u32,
    floors: u8,
    info: LevelInfo,
    inventory: Inventory,
    placements: Vec<(Era, Position, ArenaObject)>,
    errors: Vec<String>,
}

impl LevelBuilder {
    /// Start a `width × height × floors` level.
    pub fn new(width: u32, height: u32, floors: u8) -> Self {
        Self {
            width,
            height,
            floors,
            info: LevelInfo::default(),
            inventory: Inventory::default(),
            placements: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the level name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    /// Set the author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.info.author = author.into();
        self
    }

    /// Set the level number.
    pub fn number(mut self, number: u16) -> Self {
        self.info.number = number;
        self
    }

    /// Set the starting inventory.
    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Place `obj` at `(x, y, floor)` in the present era.
    pub fn place(self, x: i32, y: i32, floor: u8, obj: ArenaObject) -> Self {
        self.place_in(Era::Present, x, y, floor, obj)
    }

    /// Place `obj` at `(x, y, floor)` in `era`.
    pub fn place_in(mut self, era: Era, x: i32, y: i32, floor: u8, obj: ArenaObject) -> Self {
        self.placements.push((era, Position::new(x, y, floor), obj));
        self
    }

    /// Place one row of ASCII cells in the present era, starting at
    /// column 0. See [`parse_cell`] for the legend.
    pub fn row(self, floor: u8, y: i32, cells: &str) -> Self {
        self.row_in(Era::Present, floor, y, cells)
    }

    /// Place one row of ASCII cells in `era`.
    pub fn row_in(mut self, era: Era, floor: u8, y: i32, cells: &str) -> Self {
        for (x, ch) in cells.chars().enumerate() {
            match parse_cell(ch) {
                Some(objs) => {
                    for obj in objs.into_iter().flatten() {
                        self.placements
                            .push((era, Position::new(x as i32, y, floor), obj));
                    }
                }
                None => self
                    .errors
                    .push(format!("unknown cell {ch:?} at ({x}, {y}) floor {floor}")),
            }
        }
        self
    }

    /// Build the level. Fails on out-of-bounds placements, unknown ASCII
    /// cells, or anything other than exactly one player tank in the
    /// present era.
    pub fn build(self) -> Result<Level, SimError> {
        if let Some(reason) = self.errors.into_iter().next() {
            return Err(SimError::InvalidArena { reason });
        }
        let mut grid = CellGrid::new(self.width, self.height, self.floors)?;
        for era in Era::ALL {
            for floor in 0..self.floors {
                for y in 0..self.height as i32 {
                    for x in 0..self.width as i32 {
                        let addr = CellAddr::new(x, y, floor, Layer::LowerGround);
                        grid.set_in(era, addr, ArenaObject::Ground)?;
                    }
                }
            }
        }
        for (era, pos, obj) in self.placements {
            let layer = obj.native_layer().unwrap_or(Layer::LowerObjects);
            grid.set_in(era, pos.at(layer), obj)?;
        }

        let players = grid.find(Layer::LowerObjects, ArenaObject::is_player).count();
        if players != 1 {
            return Err(SimError::InvalidArena {
                reason: format!("expected one player tank in the present era, found {players}"),
            });
        }
        grid.commit_initial();
        Ok(Level {
            info: self.info,
            grid,
            inventory: self.inventory,
        })
    }
}

/// Objects for one ASCII cell: `[ground, object]`.
///
/// | Char | Object | Char | Object |
/// |---|---|---|---|
/// | `.` | ground | `#` | wall |
/// | `%` | brick | `o` | block |
/// | `~` | water | `*` | ice |
/// | `:` | thin ice | `=` | bridge |
/// | `$` | goal | `U` / `D` | stairs up / down |
/// | `y` | key | `t` | tree |
/// | `g` / `G` | closed / open gate | `1`–`4` | mirror NE, SE, SW, NW |
/// | `^` `v` `<` `>` | tank facing up, down, left, right | `P` | powerful tank facing up |
/// | `K` `J` `H` `L` | turret facing up, down, left, right | `x` | disguised turret facing down |
/// | `X` | dead turret | | |
pub fn parse_cell(ch: char) -> Option<[Option<ArenaObject>; 2]> {
    use ArenaObject as O;
    let tank = |facing| Some(O::Tank { facing });
    let turret = |facing| Some(O::AntiTank { facing, stun: 0 });
    let cell = match ch {
        '.' => [None, None],
        '#' => [None, Some(O::Wall)],
        '%' => [None, Some(O::Brick)],
        'o' => [None, Some(O::Block)],
        '~' => [Some(O::Water), None],
        '*' => [Some(O::Ice), None],
        ':' => [Some(O::ThinIce), None],
        '=' => [Some(O::Bridge), None],
        '$' => [Some(O::Goal), None],
        'U' => [Some(O::Stairs { up: true }), None],
        'D' => [Some(O::Stairs { up: false }), None],
        'y' => [None, Some(O::Key)],
        't' => [None, Some(O::Tree)],
        'g' => [None, Some(O::Gate { open: false })],
        'G' => [None, Some(O::Gate { open: true })],
        '1' => [None, Some(O::Mirror(MirrorKind::NorthEast))],
        '2' => [None, Some(O::Mirror(MirrorKind::SouthEast))],
        '3' => [None, Some(O::Mirror(MirrorKind::SouthWest))],
        '4' => [None, Some(O::Mirror(MirrorKind::NorthWest))],
        '^' => [None, tank(Direction::Up)],
        'v' => [None, tank(Direction::Down)],
        '<' => [None, tank(Direction::Left)],
        '>' => [None, tank(Direction::Right)],
        'P' => [None, Some(O::PowerfulTank { facing: Direction::Up })],
        'K' => [None, turret(Direction::Up)],
        'J' => [None, turret(Direction::Down)],
        'H' => [None, turret(Direction::Left)],
        'L' => [None, turret(Direction::Right)],
        'x' => [None, Some(O::AntiTankDisguise { facing: Direction::Down })],
        'X' => [None, Some(O::DeadAntiTank)],
        _ => return None,
    };
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_player_is_invalid() {
        let err = LevelBuilder::new(3, 1, 1).row(0, 0, "...").build().unwrap_err();
        assert!(matches!(err, SimError::InvalidArena { .. }));
    }

    #[test]
    fn two_players_are_invalid() {
        let err = LevelBuilder::new(3, 1, 1).row(0, 0, ">.<").build().unwrap_err();
        assert!(matches!(err, SimError::InvalidArena { .. }));
    }

    #[test]
    fn unknown_ascii_is_invalid() {
        let err = LevelBuilder::new(3, 1, 1).row(0, 0, ">?.").build().unwrap_err();
        assert!(matches!(err, SimError::InvalidArena { reason } if reason.contains("'?'")));
    }

    #[test]
    fn out_of_bounds_placement_is_bounds_error() {
        let err = LevelBuilder::new(2, 1, 1)
            .row(0, 0, ">.")
            .place(5, 0, 0, ArenaObject::Wall)
            .build()
            .unwrap_err();
        assert_eq!(err, SimError::Bounds { x: 5, y: 0, floor: 0 });
    }

    #[test]
    fn layers_follow_native_layer() {
        let level = LevelBuilder::new(4, 1, 1).row(0, 0, ">~y$").build().unwrap();
        let g = &level.grid;
        assert_eq!(
            g.get(CellAddr::new(1, 0, 0, Layer::LowerGround)).unwrap(),
            ArenaObject::Water
        );
        assert_eq!(
            g.get(CellAddr::new(2, 0, 0, Layer::UpperGround)).unwrap(),
            ArenaObject::Key
        );
        assert_eq!(
            g.get(CellAddr::new(2, 0, 0, Layer::LowerGround)).unwrap(),
            ArenaObject::Ground
        );
    }
}
