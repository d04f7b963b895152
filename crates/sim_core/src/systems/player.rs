//! Player avatar movement from the current intent.

use glam::Vec3;

use crate::GameState;

pub fn apply_move_intent(gs: &mut GameState) {
    let Some(body) = gs.player.and_then(|p| gs.store.body(p)).map(|b| b.body) else { return };
    let dir = gs.move_intent.normalize_or_zero() * gs.cfg.world.player_speed;
    let vy = gs.backends.physics.linvel(body).map(|v| v.y).unwrap_or(0.0);
    gs.backends.physics.set_linvel(body, Vec3::new(dir.x, vy, dir.z));
}
