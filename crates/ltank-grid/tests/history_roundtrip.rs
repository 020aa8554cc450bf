use ltank_core::{ArenaObject, CellAddr, Era, HistoryStatus, Layer};
use ltank_grid::{CellGrid, HistoryEngine, HistoryFrame};
use proptest::prelude::*;

const PALETTE: [ArenaObject; 5] = [
    ArenaObject::Empty,
    ArenaObject::Wall,
    ArenaObject::Brick,
    ArenaObject::Block,
    ArenaObject::Water,
];

fn snapshot(grid: &CellGrid) -> Vec<ArenaObject> {
    let mut cells = Vec::new();
    for era in Era::ALL {
        for floor in 0..grid.floors() {
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    for layer in Layer::ALL {
                        let addr = CellAddr::new(x, y, floor, layer);
                        cells.push(grid.get_in(era, addr).unwrap());
                    }
                }
            }
        }
    }
    cells
}

/// (era, x, y, floor, layer, palette index)
type Write = (u8, i32, i32, u8, usize, usize);

fn arb_action() -> impl Strategy<Value = Vec<Write>> {
    prop::collection::vec((0u8..5, 0i32..5, 0i32..4, 0u8..2, 0usize..4, 0usize..5), 1..6)
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_is_identity(actions in prop::collection::vec(arb_action(), 1..12)) {
        let mut grid = CellGrid::new(5, 4, 2).unwrap();
        grid.commit_initial();
        let initial = snapshot(&grid);
        let mut history: HistoryEngine<usize> = HistoryEngine::new();

        for (i, writes) in actions.iter().enumerate() {
            for &(era, x, y, floor, layer, obj) in writes {
                let era = Era::from_id(era).unwrap();
                let addr = CellAddr::new(x, y, floor, Layer::ALL[layer]);
                grid.set_in(era, addr, PALETTE[obj]).unwrap();
            }
            history.push_undo(HistoryFrame {
                delta: grid.take_journal(),
                status: HistoryStatus::plain(),
                before: i,
                after: i + 1,
                recorded: false,
                digest: 0,
            });
        }
        let final_state = snapshot(&grid);
        let n = actions.len();

        for _ in 0..n {
            prop_assert!(history.undo(&mut grid).is_some());
            prop_assert_eq!(history.undo_depth() + history.redo_depth(), n);
        }
        prop_assert_eq!(snapshot(&grid), initial);

        for _ in 0..n {
            prop_assert!(history.redo(&mut grid).is_some());
        }
        prop_assert_eq!(snapshot(&grid), final_state);
    }

    #[test]
    fn rollback_discards_partial_step(writes in arb_action()) {
        let mut grid = CellGrid::new(5, 4, 2).unwrap();
        let before = snapshot(&grid);
        let mark = grid.journal_mark();
        for &(era, x, y, floor, layer, obj) in &writes {
            let era = Era::from_id(era).unwrap();
            grid.set_in(era, CellAddr::new(x, y, floor, Layer::ALL[layer]), PALETTE[obj]).unwrap();
        }
        grid.rollback_to(mark);
        prop_assert_eq!(snapshot(&grid), before);
    }
}
