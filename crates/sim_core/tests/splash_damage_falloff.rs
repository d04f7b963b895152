#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::towers::TowerKind;
use glam::vec3;
use sim_core as sc;
use sim_core::schedule::Ctx;
use sim_core::{GameState, GridCell};

#[test]
fn splash_hits_half_damage_within_radius_only() {
    let mut gs = GameState::headless(1);
    gs.progress.money = 1000;
    let spec = gs.cfg.towers.get(TowerKind::Splash).clone();
    assert_eq!((spec.damage, spec.splash_radius), (30.0, Some(5.0)));
    // Tower at (20, 2, 0).
    gs.place_tower(TowerKind::Splash, GridCell::new(5, 0)).unwrap();

    let primary = gs.spawn_enemy(vec3(14.0, 1.0, 0.0), 1);
    let near = gs.spawn_enemy(vec3(10.0, 1.0, 0.0), 1);
    let edge = gs.spawn_enemy(vec3(14.0, 1.0, -5.0), 1);
    let far = gs.spawn_enemy(vec3(14.0, 1.0, 6.0), 1);

    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });

    let hp = |gs: &GameState, id| gs.store.health(id).unwrap().current();
    assert_eq!(hp(&gs, primary), 70.0);
    assert_eq!(hp(&gs, near), 85.0);
    assert_eq!(hp(&gs, edge), 85.0, "radius is inclusive");
    assert_eq!(hp(&gs, far), 100.0);
}

#[test]
fn tower_waits_for_its_cooldown() {
    let mut gs = GameState::headless(1);
    // Basic: 10 damage, one shot per second.
    gs.place_tower(TowerKind::Basic, GridCell::new(5, 0)).unwrap();
    let e = gs.spawn_enemy(vec3(14.0, 1.0, 0.0), 1);

    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });
    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.5 });
    assert_eq!(gs.store.health(e).unwrap().current(), 90.0);
    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 2.0 });
    assert_eq!(gs.store.health(e).unwrap().current(), 80.0);
}

#[test]
fn tower_ignores_enemies_out_of_range() {
    let mut gs = GameState::headless(1);
    gs.place_tower(TowerKind::Basic, GridCell::new(5, 0)).unwrap();
    let e = gs.spawn_enemy(vec3(40.0, 1.0, 0.0), 1);
    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });
    assert_eq!(gs.store.health(e).unwrap().current(), 100.0);
    assert_eq!(gs.towers.towers()[0].last_shot_s, f64::NEG_INFINITY);
}

#[test]
fn tower_kill_pays_the_difficulty_reward() {
    let mut gs = GameState::headless(1);
    gs.place_tower(TowerKind::Basic, GridCell::new(5, 0)).unwrap();
    let e = gs.spawn_enemy(vec3(14.0, 1.0, 0.0), 1);
    gs.store.health_mut(e).unwrap().set_current(10.0);
    let (money, score) = (gs.progress.money, gs.progress.score);

    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });
    assert!(!gs.store.contains(e));
    assert_eq!(gs.progress.money, money + 3);
    assert_eq!(gs.progress.score, score + 3);
    assert_eq!(gs.progress.enemies_killed, 1);
}

#[test]
fn tower_hits_flash_every_enemy_they_damage() {
    let mut gs = GameState::headless(1);
    gs.progress.money = 1000;
    gs.place_tower(TowerKind::Splash, GridCell::new(5, 0)).unwrap();
    let primary = gs.spawn_enemy(vec3(14.0, 1.0, 0.0), 1);
    let splashed = gs.spawn_enemy(vec3(10.0, 1.0, 0.0), 1);
    let far = gs.spawn_enemy(vec3(14.0, 1.0, 6.0), 1);
    let mesh = |gs: &GameState, id| gs.store.mesh(id).unwrap().mesh;
    let (pm, sm, fm) = (mesh(&gs, primary), mesh(&gs, splashed), mesh(&gs, far));

    sc::systems::tower_fire::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });
    assert_eq!(gs.backends.render.color(pm), Some(0xffffff));
    assert_eq!(gs.backends.render.color(sm), Some(0xffffff));
    assert_eq!(gs.backends.render.color(fm), Some(0xff4444));

    gs.effects.tick(gs.backends.render.as_mut(), 0.15);
    assert_eq!(gs.backends.render.color(pm), Some(0xff4444));
    assert_eq!(gs.backends.render.color(sm), Some(0xff4444));
}
