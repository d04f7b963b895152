#![allow(clippy::unwrap_used, clippy::expect_used)]

use glam::Vec3;
use sim_core::{GameEvent, GameState};

#[test]
fn first_wave_spawns_its_quota_on_the_ring_and_pays_a_bonus() {
    let mut gs = GameState::headless(21);
    let mut events = Vec::new();
    // 10 s countdown plus seven spawns 1.8 s apart.
    for _ in 0..600 {
        gs.update(0.05);
        events.extend(gs.drain_events());
    }

    let started: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WaveStarted { wave, target, .. } => Some((*wave, *target)),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![(1, 7)]);
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemySpawned { wave: 1, boss: false, .. }))
        .count();
    assert_eq!(spawned, 7);
    assert!(events.contains(&GameEvent::WaveCompleted { wave: 1, bonus: 10 }));
    assert_eq!(gs.waves.total_waves, 1);
    assert!(!gs.waves.in_progress());
    assert_eq!(gs.waves.spawned_this_wave, 7);
    assert!(gs.progress.money >= 110);
}

#[test]
fn countdown_does_not_start_early() {
    let mut gs = GameState::headless(21);
    for _ in 0..190 {
        gs.update(0.05);
    }
    assert_eq!(gs.waves.current_wave, 0);
    assert!(gs.store.enemies().is_empty());
    let left = gs.waves.countdown_s();
    assert!(left > 0.0 && left < 1.0, "{left}");
}

#[test]
fn oversized_steps_are_clamped() {
    let mut gs = GameState::headless(21);
    gs.update(10.0);
    assert!((gs.now_s() - 0.05).abs() < 1e-6);
    gs.update(-1.0);
    gs.update(f32::NAN);
    assert!((gs.now_s() - 0.05).abs() < 1e-6);
    assert_eq!(gs.waves.current_wave, 0);
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut gs = GameState::headless(seed);
        for _ in 0..500 {
            gs.update(0.05);
        }
        gs.store.enemies().into_iter().map(|id| gs.position(id).unwrap()).collect::<Vec<Vec3>>()
    };
    let a = run(4);
    assert!(!a.is_empty());
    assert_eq!(a, run(4));
    assert_ne!(a, run(5));
}
