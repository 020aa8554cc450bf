//! Shots from the standard 10×10 laser scenario.

use ltank_core::{AmmoKind, ArenaObject, HistoryStatus, SoundEvent};
use ltank_engine::StepControl;
use ltank_test_utils::fixtures::{laser_scenario, lower, session, stocked_inventory};
use ltank_test_utils::RecordingPresenter;

#[test]
fn green_shot_stops_at_the_wall() {
    let presenter = RecordingPresenter::new();
    let mut s = session(laser_scenario()).with_presenter(presenter.boxed());
    let shot = s.fire().unwrap();
    let report = s.resolve(shot, &StepControl::detached()).unwrap();

    assert_eq!(report.status, Some(HistoryStatus::laser()));
    assert!(report.recorded);
    assert_eq!(lower(&s, 7, 5), ArenaObject::Wall);
    assert_eq!(lower(&s, 8, 5), ArenaObject::Brick);
    assert_eq!(s.counters().shots, 1);
    assert_eq!(s.what_was(), Some(HistoryStatus::laser()));
    assert!(presenter.heard(SoundEvent::Laser));
    assert!(!presenter.heard(SoundEvent::Destroy));
}

#[test]
fn missile_takes_the_wall_and_stops() {
    let mut level = laser_scenario();
    level.inventory = stocked_inventory();
    let mut s = session(level);
    s.select_ammo(Some(AmmoKind::Missile));
    let shot = s.fire().unwrap();
    let report = s.resolve(shot, &StepControl::detached()).unwrap();

    assert_eq!(report.status, Some(HistoryStatus::missile()));
    assert_eq!(lower(&s, 7, 5), ArenaObject::Empty);
    assert_eq!(lower(&s, 8, 5), ArenaObject::Brick);
    assert_eq!(s.inventory().missiles, 1);
    // Only green shots have a replay code.
    assert!(!report.recorded);
    assert!(s.export_solution().is_err());

    s.undo().unwrap();
    assert_eq!(lower(&s, 7, 5), ArenaObject::Wall);
    assert_eq!(s.inventory().missiles, 2);
}

#[test]
fn beam_marks_are_cleared_after_the_run() {
    let mut s = session(laser_scenario());
    let shot = s.fire().unwrap();
    s.resolve(shot, &StepControl::detached()).unwrap();
    let virtual_cells = s
        .grid()
        .find(ltank_core::Layer::Virtual, |obj| obj != ArenaObject::Empty)
        .count();
    assert_eq!(virtual_cells, 0);
}
