//! What a session tells its presenter.

use ltank_core::SoundEvent;
use ltank_engine::{Request, StepControl};
use ltank_test_utils::fixtures::{ascii_level, session};
use ltank_test_utils::RecordingPresenter;

#[test]
fn move_plays_and_marks_dirty() {
    let presenter = RecordingPresenter::new();
    let mut s = session(ascii_level("walk", &[">.."])).with_presenter(presenter.boxed());
    s.resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
        .unwrap();

    let log = presenter.snapshot();
    assert_eq!(log.sounds, vec![SoundEvent::Move]);
    assert!(log.dirty_floors.contains(&0));
    assert!(log.dialogs.is_empty());
}

#[test]
fn dead_tank_gets_a_dialog() {
    let presenter = RecordingPresenter::new();
    let mut s = session(ascii_level("pond", &[">~."])).with_presenter(presenter.boxed());
    let ctl = StepControl::detached();
    s.resolve(Request::Movement { dx: 1, dy: 0 }, &ctl).unwrap();
    assert!(s.is_dead());
    assert!(presenter.heard(SoundEvent::Death));

    presenter.clear();
    assert!(s.resolve(Request::Movement { dx: 1, dy: 0 }, &ctl).is_err());
    assert_eq!(presenter.dialogs().len(), 1);
    assert!(presenter.sounds().is_empty());
}

#[test]
fn goal_plays_win() {
    let presenter = RecordingPresenter::new();
    let mut s = session(ascii_level("goal", &[">$"])).with_presenter(presenter.boxed());
    let report = s
        .resolve(Request::Movement { dx: 1, dy: 0 }, &StepControl::detached())
        .unwrap();
    assert!(report.solved);
    assert!(presenter.heard(SoundEvent::Win));
    assert!(presenter.heard(SoundEvent::Move));
}
