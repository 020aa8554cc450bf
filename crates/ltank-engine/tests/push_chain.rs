//! Chain pushes along a walled corridor.

use ltank_core::{ArenaObject, HistoryStatus, Position};
use ltank_engine::{Request, StepControl};
use ltank_test_utils::fixtures::{lower, push_chain_level, session};
use proptest::prelude::*;

const RIGHT: Request = Request::Movement { dx: 1, dy: 0 };

proptest! {
    #[test]
    fn free_chain_moves_as_one(k in 1usize..10) {
        let mut s = session(push_chain_level(k, false));
        let report = s.resolve(RIGHT, &StepControl::detached()).unwrap();

        prop_assert_eq!(report.status, Some(HistoryStatus::plain()));
        prop_assert_eq!(s.player(), Position::new(2, 1, 0));
        prop_assert_eq!(lower(&s, 1, 1), ArenaObject::Empty);
        for x in 3..3 + k as i32 {
            prop_assert_eq!(lower(&s, x, 1), ArenaObject::Block);
        }
        prop_assert_eq!(s.replay_log().len(), 1);
    }

    #[test]
    fn blocked_chain_changes_nothing(k in 1usize..10) {
        let mut s = session(push_chain_level(k, true));
        let before = s.digest();
        let report = s.resolve(RIGHT, &StepControl::detached()).unwrap();

        prop_assert_eq!(report.status, None);
        prop_assert_eq!(s.digest(), before);
        prop_assert_eq!(s.player(), Position::new(1, 1, 0));
        prop_assert!(!s.try_undo());
        prop_assert!(s.replay_log().is_empty());
    }
}

#[test]
fn undo_returns_the_whole_chain() {
    let mut s = session(push_chain_level(3, false));
    let before = s.digest();
    s.resolve(RIGHT, &StepControl::detached()).unwrap();
    assert_ne!(s.digest(), before);

    s.undo().unwrap();
    assert_eq!(s.digest(), before);
    assert_eq!(s.player(), Position::new(1, 1, 0));
    for x in 2..5 {
        assert_eq!(lower(&s, x, 1), ArenaObject::Block);
    }
}
