//! Applies wave director transitions: spawns, sounds, rewards.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::GameState;
use crate::events::GameEvent;
use crate::providers::Sound;
use crate::schedule::Ctx;
use crate::waves::WaveAction;

pub fn run(gs: &mut GameState, ctx: &Ctx) {
    for action in gs.waves.advance(ctx.dt) {
        match action {
            WaveAction::Started {
                wave,
                target,
                enemy_health,
            } => {
                gs.backends.play(Sound::WaveStart);
                metrics::counter!("waves.started_total").increment(1);
                log::info!("wave {wave} started: {target} enemies at {enemy_health} hp");
                gs.events.push(GameEvent::WaveStarted {
                    wave,
                    target,
                    enemy_health,
                });
            }
            WaveAction::Spawn { wave, boss, health } => {
                let pos = spawn_point(gs, boss);
                let id = gs.spawn_enemy(pos, wave);
                if let Some(h) = gs.store.health_mut(id) {
                    h.reset(health, health);
                }
                if boss {
                    gs.promote_to_boss(id);
                    log::info!("boss spawned for wave {wave}");
                }
                gs.events.push(GameEvent::EnemySpawned { id, wave, boss });
            }
            WaveAction::Completed { wave, bonus } => {
                gs.progress.reward(bonus);
                gs.backends.play(Sound::WaveComplete);
                log::info!("wave {wave} complete; bonus {bonus}");
                gs.events.push(GameEvent::WaveCompleted { wave, bonus });
            }
        }
    }
}

/// Bosses enter at a fixed point; everyone else on a random ring.
fn spawn_point(gs: &mut GameState, boss: bool) -> Vec3 {
    let w = &gs.cfg.waves;
    if boss {
        return Vec3::new(w.boss_spawn[0], w.spawn_y, w.boss_spawn[1]);
    }
    let (lo, hi, y) = (w.spawn_ring_min, w.spawn_ring_max, w.spawn_y);
    let angle = gs.rng.random::<f32>() * TAU;
    let dist = lo + gs.rng.random::<f32>() * (hi - lo);
    Vec3::new(angle.cos() * dist, y, angle.sin() * dist)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::geom::dist_xz;

    #[test]
    fn ring_spawns_stay_in_band() {
        let mut gs = GameState::headless(7);
        for _ in 0..200 {
            let p = spawn_point(&mut gs, false);
            let d = dist_xz(p, Vec3::ZERO);
            assert!((39.99..=60.01).contains(&d), "spawn distance {d}");
            assert_eq!(p.y, 1.0);
        }
        assert_eq!(spawn_point(&mut gs, true), Vec3::new(0.0, 1.0, 50.0));
    }

    #[test]
    fn same_seed_same_points() {
        let mut a = GameState::headless(99);
        let mut b = GameState::headless(99);
        for _ in 0..10 {
            assert_eq!(spawn_point(&mut a, false), spawn_point(&mut b, false));
        }
    }
}
