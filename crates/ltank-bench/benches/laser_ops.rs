//! Criterion benchmarks for beam tracing, walks and history replay.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use ltank_bench::{random_walk, reference_arena};
use ltank_core::LaserType;
use ltank_engine::{GameSession, Request, SessionConfig, StepControl};
use ltank_replay::ReplayEntry;

fn cheat_session() -> GameSession {
    let config = SessionConfig {
        cheats: true,
        ..SessionConfig::default()
    };
    GameSession::new(reference_arena(42).unwrap(), config).unwrap()
}

fn request_for(session: &GameSession, entry: ReplayEntry) -> Option<Request> {
    match entry.direction() {
        Some(dir) => {
            let d = dir.delta();
            Some(Request::Movement { dx: d.dx, dy: d.dy })
        }
        None => session.shot(LaserType::Green),
    }
}

/// Benchmark: one green shot across the 64×64 reference arena, undone.
fn bench_laser_shot(c: &mut Criterion) {
    let mut session = cheat_session();
    let ctl = StepControl::detached();

    c.bench_function("laser_shot_64x64", |b| {
        b.iter(|| {
            let shot = session.shot(LaserType::Green).unwrap();
            let report = session.resolve(shot, &ctl).unwrap();
            if report.status.is_some() {
                session.undo().unwrap();
            }
            black_box(&report);
        });
    });
}

/// Benchmark: a blue beam, which cuts through bricks instead of stopping.
fn bench_blue_laser(c: &mut Criterion) {
    let mut session = cheat_session();
    let ctl = StepControl::detached();

    c.bench_function("laser_blue_64x64", |b| {
        b.iter(|| {
            let shot = session.shot(LaserType::Blue).unwrap();
            let report = session.resolve(shot, &ctl).unwrap();
            if report.status.is_some() {
                session.undo().unwrap();
            }
            black_box(&report);
        });
    });
}

/// Benchmark: 1000 seeded random intents from a fresh session.
fn bench_random_walk(c: &mut Criterion) {
    let walk = random_walk(1000, 7);
    let ctl = StepControl::detached();

    c.bench_function("random_walk_1k", |b| {
        b.iter_batched(
            cheat_session,
            |mut session| {
                for &entry in &walk {
                    if session.is_dead() || session.is_solved() {
                        break;
                    }
                    if let Some(request) = request_for(&session, entry) {
                        let _ = session.resolve(request, &ctl);
                    }
                }
                black_box(session.digest())
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: unwind and rewind a 200-frame history.
fn bench_undo_redo(c: &mut Criterion) {
    let mut session = cheat_session();
    let ctl = StepControl::detached();
    for entry in random_walk(200, 11) {
        if session.is_dead() {
            break;
        }
        if let Some(request) = request_for(&session, entry) {
            let _ = session.resolve(request, &ctl);
        }
    }

    c.bench_function("undo_redo_200", |b| {
        b.iter(|| {
            while session.try_undo() {
                session.undo().unwrap();
            }
            while session.try_redo() {
                session.redo().unwrap();
            }
            black_box(session.digest());
        });
    });
}

criterion_group!(
    benches,
    bench_laser_shot,
    bench_blue_laser,
    bench_random_walk,
    bench_undo_redo
);
criterion_main!(benches);
