//! Tower auto-fire with optional splash.

use ecs_core::EntityId;
use glam::Vec3;

use crate::GameState;
use crate::geom::dist_xz;
use crate::schedule::Ctx;

const HIT_FLASH: u32 = 0xffffff;

pub fn run(gs: &mut GameState, ctx: &Ctx) {
    let (tracer_s, flash_s) = (gs.cfg.combat.tracer_s, gs.cfg.combat.hit_flash_s);
    for i in 0..gs.towers.len() {
        let t = &gs.towers.towers()[i];
        if ctx.now_s - t.last_shot_s < t.spec.cooldown_s() {
            continue;
        }
        let (entity, range, damage, splash, color) =
            (t.entity, t.spec.range, t.spec.damage, t.spec.splash_radius, t.spec.color);
        let Some(origin) = gs.store.transform(entity).map(|tr| tr.pos) else { continue };
        let Some((target, target_pos)) = nearest_enemy(gs, origin, range) else { continue };

        gs.towers.towers_mut()[i].last_shot_s = ctx.now_s;
        gs.effects
            .tracer(gs.backends.render.as_mut(), origin, target_pos, color, tracer_s);
        flash_enemy(gs, target, flash_s);
        gs.damage_enemy(target, damage);

        if let Some(radius) = splash {
            for other in gs.store.enemies() {
                if other == target {
                    continue;
                }
                let Some(p) = gs.position(other) else { continue };
                if dist_xz(p, target_pos) <= radius {
                    flash_enemy(gs, other, flash_s);
                    gs.damage_enemy(other, damage * 0.5);
                }
            }
        }
    }
}

fn flash_enemy(gs: &mut GameState, id: EntityId, hold_s: f32) {
    if let Some(m) = gs.store.mesh(id).copied() {
        gs.effects.flash(gs.backends.render.as_mut(), m.mesh, HIT_FLASH, hold_s);
    }
}

/// Nearest enemy strictly inside `range` on the ground plane.
fn nearest_enemy(gs: &GameState, from: Vec3, range: f32) -> Option<(EntityId, Vec3)> {
    let mut best: Option<(f32, EntityId, Vec3)> = None;
    for id in gs.store.enemies() {
        let Some(p) = gs.position(id) else { continue };
        let d = dist_xz(from, p);
        if d >= range {
            continue;
        }
        if best.map(|(b, _, _)| d < b).unwrap_or(true) {
            best = Some((d, id, p));
        }
    }
    best.map(|(_, id, p)| (id, p))
}
