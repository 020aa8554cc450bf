//! A live run, exported and played back, reproduces itself exactly.

use ltank_core::LaserType;
use ltank_engine::{GameSession, Playback, Request, SimulationWorker, StepControl, WorkerConfig};
use ltank_replay::{compare_traces, decode_solution, encode_solution, ReplayEntry};
use ltank_test_utils::fixtures::{replay_level, session, REPLAY_SOLUTION};

fn play_live(entries: &[ReplayEntry]) -> GameSession {
    let mut s = session(replay_level());
    let ctl = StepControl::detached();
    for &entry in entries {
        let request = match entry.direction() {
            Some(dir) => {
                let d = dir.delta();
                Request::Movement { dx: d.dx, dy: d.dy }
            }
            None => s.shot(LaserType::Green).unwrap(),
        };
        s.resolve(request, &ctl).unwrap();
    }
    s
}

#[test]
fn live_solution_solves_the_level() {
    let live = play_live(&REPLAY_SOLUTION);
    assert!(live.is_solved());
    assert!(!live.is_dead());
    assert_eq!(live.replay_log().entries(), &REPLAY_SOLUTION[..]);
}

#[test]
fn exported_solution_replays_identically() {
    let live = play_live(&REPLAY_SOLUTION);
    let solution = live.export_solution().unwrap();
    assert_eq!(solution.header.level_name, "replay");

    let bytes = encode_solution(&solution.header, &solution.entries).unwrap();
    let decoded = decode_solution(&bytes).unwrap();
    assert_eq!(decoded, solution);

    let mut replayed = session(replay_level());
    let summary = Playback::new(&decoded).run_session(&mut replayed).unwrap();
    assert_eq!(summary.applied, REPLAY_SOLUTION.len());
    assert!(summary.solved);

    assert_eq!(replayed.digest(), live.digest());
    assert_eq!(replayed.counters(), live.counters());
    assert_eq!(replayed.marks(), live.marks());
    assert_eq!(compare_traces(&live.trace(), &replayed.trace()), None);
}

#[test]
fn worker_playback_matches_live_run() {
    let live = play_live(&REPLAY_SOLUTION);
    let solution = live.export_solution().unwrap();

    let mut worker = SimulationWorker::new(session(replay_level()), WorkerConfig::default()).unwrap();
    let summary = Playback::new(&solution).run_worker(&mut worker).unwrap();
    assert!(summary.solved);

    let replayed = worker.session().unwrap();
    assert_eq!(replayed.digest(), live.digest());
    assert_eq!(compare_traces(&live.trace(), &replayed.trace()), None);
}

#[test]
fn truncated_solution_diverges() {
    let live = play_live(&REPLAY_SOLUTION);
    let mut short = session(replay_level());
    Playback::from_entries(REPLAY_SOLUTION[..8].to_vec())
        .run_session(&mut short)
        .unwrap();

    assert!(!short.is_solved());
    let report = compare_traces(&live.trace(), &short.trace()).unwrap();
    assert_eq!(report.index, 8);
}
