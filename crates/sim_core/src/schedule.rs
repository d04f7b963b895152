//! Fixed-order system pipeline run once per tick.

use crate::GameState;
use crate::systems;

/// Per-tick inputs shared by every system.
#[derive(Debug, Clone, Copy)]
pub struct Ctx {
    pub dt: f32,
    pub now_s: f64,
}

pub struct Schedule;

impl Schedule {
    pub fn run(&self, gs: &mut GameState, ctx: &Ctx) {
        gs.waves.enemies_alive = gs.store.enemies().len() as u32;
        gs.backends.physics.step(ctx.dt);
        systems::player::apply_move_intent(gs);
        systems::combat::run(gs, ctx);
        // Game over is terminal; skip the remaining gameplay systems.
        if !gs.is_over() {
            systems::tower_fire::run(gs, ctx);
            gs.update_ghost();
            systems::waves::run(gs, ctx);
            systems::ai::run(gs, ctx);
        }
        systems::sync::run(gs);
        gs.effects.tick(gs.backends.render.as_mut(), ctx.dt);
    }
}
