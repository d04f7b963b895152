#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::towers::TowerKind;
use glam::vec3;
use sim_core::{GameState, GridCell, PlacementError};

#[test]
fn ghost_tracks_aim_and_turns_red_on_bad_cells() {
    let mut gs = GameState::headless(1);
    assert!(gs.toggle_build_mode());
    let ghost = gs.towers.ghost.unwrap().entity;
    let mesh = gs.store.mesh(ghost).unwrap().mesh;
    let basic = gs.cfg.towers.basic.color;

    gs.aim_ghost(vec3(1.0, 0.0, 1.0));
    let g = gs.towers.ghost.unwrap();
    assert_eq!(g.cell, Some(GridCell::new(0, 0)));
    assert!(!g.valid);
    assert_eq!(gs.backends.render.color(mesh), Some(0xff0000));

    gs.aim_ghost(vec3(12.5, 0.0, -7.5));
    let g = gs.towers.ghost.unwrap();
    assert_eq!(g.cell, Some(GridCell::new(3, -2)));
    assert!(g.valid);
    assert_eq!(gs.backends.render.color(mesh), Some(basic));
    assert_eq!(gs.store.transform(ghost).unwrap().pos, vec3(12.0, 2.0, -8.0));

    gs.select_tower(TowerKind::Rapid);
    assert_eq!(gs.backends.render.color(mesh), Some(gs.cfg.towers.rapid.color));

    let id = gs.place_at_ghost().unwrap();
    assert_eq!(gs.towers.tower(id).unwrap().kind, TowerKind::Rapid);
    assert_eq!(gs.progress.money, 0);

    // The cell is taken now; the next tick repaints the stationary ghost.
    gs.update(0.05);
    assert!(!gs.towers.ghost.unwrap().valid);
    assert_eq!(gs.backends.render.color(mesh), Some(0xff0000));
}

#[test]
fn leaving_build_mode_releases_the_ghost() {
    let mut gs = GameState::headless(1);
    gs.toggle_build_mode();
    let ghost = gs.towers.ghost.unwrap().entity;
    let mesh = gs.store.mesh(ghost).unwrap().mesh;
    assert!(!gs.toggle_build_mode());
    assert!(gs.towers.ghost.is_none());
    assert!(!gs.store.contains(ghost));
    assert!(gs.backends.render.color(mesh).is_none());
    assert_eq!(gs.place_at_ghost(), Err(PlacementError::NotBuilding));
}

#[test]
fn placing_without_an_aim_point_is_rejected() {
    let mut gs = GameState::headless(1);
    gs.toggle_build_mode();
    assert_eq!(gs.place_at_ghost(), Err(PlacementError::NotBuilding));
    assert_eq!(gs.progress.money, 100);
}

#[test]
fn reselecting_before_aiming_recolours_the_ghost() {
    let mut gs = GameState::headless(1);
    gs.toggle_build_mode();
    let mesh = gs.store.mesh(gs.towers.ghost.unwrap().entity).unwrap().mesh;
    assert_eq!(gs.backends.render.color(mesh), Some(gs.cfg.towers.basic.color));
    gs.select_tower(TowerKind::Heavy);
    assert_eq!(gs.backends.render.color(mesh), Some(gs.cfg.towers.heavy.color));
}
