#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use data_runtime::configs::towers::TowerKind;
use glam::vec3;
use sim_core as sc;
use sim_core::headless::{HeadlessRender, KinematicPhysics};
use sim_core::schedule::Ctx;
use sim_core::{AudioProvider, Backends, GameEvent, GameState, GridCell, Sound};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Sound>>>);

impl AudioProvider for Recorder {
    fn play(&mut self, sound: Sound) -> anyhow::Result<()> {
        self.0.borrow_mut().push(sound);
        Ok(())
    }
}

#[test]
fn enemy_wears_down_a_tower_and_the_cell_opens_up() {
    let audio = Recorder::default();
    let backends = Backends::new(KinematicPhysics::default(), HeadlessRender::default(), audio.clone());
    let mut gs = GameState::new(Default::default(), backends, 1);
    let cell = GridCell::new(5, 5);
    // Tower at (20, 2, 20); enemy right next to it and far from everything else.
    let tower = gs.place_tower(TowerKind::Basic, cell).unwrap();
    let mesh = gs.store.mesh(tower).unwrap().mesh;
    gs.spawn_enemy(vec3(21.0, 1.0, 20.0), 1);
    gs.drain_events();

    for i in 0..9 {
        sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: f64::from(i) });
    }
    assert_eq!(gs.store.health(tower).unwrap().current(), 10.0);
    assert_eq!(gs.backends.render.color(mesh), Some(0xffff00), "hit flash is yellow");
    assert!(gs.towers.is_occupied(cell));

    sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: 9.0 });
    assert!(!gs.store.contains(tower));
    assert!(!gs.towers.is_occupied(cell));
    assert!(gs.towers.is_empty());
    assert!(gs.backends.render.color(mesh).is_none());
    assert_eq!(gs.drain_events(), vec![GameEvent::TowerDestroyed { id: tower, cell }]);
    let sounds = audio.0.borrow();
    assert_eq!(sounds.iter().filter(|&&s| s == Sound::TowerHit).count(), 10);
    assert_eq!(sounds.last(), Some(&Sound::TowerDestroyed));
    drop(sounds);

    assert!(!gs.is_over(), "losing a tower is not fatal");
    gs.place_tower(TowerKind::Basic, cell).expect("cell is free again");
}

#[test]
fn demolish_is_a_no_op_for_non_towers() {
    let mut gs = GameState::headless(1);
    let s = gs.structure.unwrap();
    assert!(!gs.demolish_tower(s));
    assert!(gs.store.contains(s));
}

#[test]
fn enemy_between_two_towers_only_hits_the_first_placed() {
    let mut gs = GameState::headless(1);
    gs.progress.money = 1000;
    // (24, 2, 20) then (20, 2, 20); the enemy is 2.0 from each.
    let first = gs.place_tower(TowerKind::Basic, GridCell::new(6, 5)).unwrap();
    let second = gs.place_tower(TowerKind::Basic, GridCell::new(5, 5)).unwrap();
    gs.spawn_enemy(vec3(22.0, 1.0, 20.0), 1);

    // Player right beside the enemy: that hit takes the shared cooldown.
    let player = gs.player.unwrap();
    let body = gs.store.body(player).unwrap().body;
    gs.backends.physics.set_translation(body, vec3(22.0, 1.0, 21.5));
    let hp = |gs: &GameState, id| gs.store.health(id).unwrap().current();

    sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: 1.0 });
    sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: 2.0 });
    assert_eq!(hp(&gs, player), 80.0);
    assert_eq!((hp(&gs, first), hp(&gs, second)), (100.0, 100.0), "no tower hit in the same tick");

    gs.backends.physics.set_translation(body, vec3(0.0, 1.0, 60.0));
    sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: 3.0 });
    sc::systems::combat::run(&mut gs, &Ctx { dt: 0.0, now_s: 4.0 });
    assert_eq!((hp(&gs, first), hp(&gs, second)), (80.0, 100.0));
}
