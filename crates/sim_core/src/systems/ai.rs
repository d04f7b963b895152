//! Enemy steering: periodic retargeting to the nearest defender, then walk.

use glam::{Quat, Vec3};

use crate::GameState;
use crate::geom::{dir_xz, dist_xz};
use crate::schedule::Ctx;

pub fn run(gs: &mut GameState, ctx: &Ctx) {
    let w = &gs.cfg.world;
    let (retarget_s, speed, slow_speed, slow_radius) =
        (w.retarget_s, w.enemy_speed, w.enemy_slow_speed, w.enemy_slow_radius);
    let defenders = defender_positions(gs);
    for id in gs.store.enemies() {
        let Some(body) = gs.store.body(id).map(|b| b.body) else { continue };
        let Some(pos) = gs.backends.physics.translation(body) else { continue };
        let Some(ai) = gs.store.ai_mut(id) else { continue };
        ai.since_retarget_s += ctx.dt;
        if ai.since_retarget_s >= retarget_s {
            ai.since_retarget_s = 0.0;
            ai.target = nearest(pos, &defenders);
        }
        let Some(target) = ai.target else { continue };
        let dist = dist_xz(pos, target);
        let v = if dist < slow_radius { slow_speed } else { speed };
        let dir = dir_xz(pos, target);
        let vy = gs.backends.physics.linvel(body).map(|v| v.y).unwrap_or(0.0);
        gs.backends.physics.set_linvel(body, Vec3::new(dir.x * v, vy, dir.z * v));
        if dir != Vec3::ZERO
            && let Some(t) = gs.store.transform_mut(id)
        {
            t.rot = Quat::from_rotation_y(dir.x.atan2(dir.z));
        }
    }
}

/// Player, structure and towers, in that order.
fn defender_positions(gs: &GameState) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(2 + gs.towers.len());
    out.extend(gs.player_position());
    out.extend(gs.structure_position());
    out.extend(gs.towers.towers().iter().filter_map(|t| gs.store.transform(t.entity).map(|tr| tr.pos)));
    out
}

fn nearest(from: Vec3, candidates: &[Vec3]) -> Option<Vec3> {
    let mut best: Option<(f32, Vec3)> = None;
    for &c in candidates {
        let d = dist_xz(from, c);
        if best.map(|(b, _)| d < b).unwrap_or(true) {
            best = Some((d, c));
        }
    }
    best.map(|(_, c)| c)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn retargets_after_interval_and_walks_toward_structure() {
        let mut gs = GameState::headless(3);
        // Player far away on the other side.
        let p = gs.player.unwrap();
        let pb = gs.store.body(p).unwrap().body;
        gs.backends.physics.set_translation(pb, vec3(0.0, 1.0, 200.0));
        let e = gs.spawn_enemy(vec3(-40.0, 1.0, 0.0), 1);
        let body = gs.store.body(e).unwrap().body;

        run(&mut gs, &Ctx { dt: 0.25, now_s: 0.25 });
        assert!(gs.store.ai(e).unwrap().target.is_none());
        assert_eq!(gs.backends.physics.linvel(body).unwrap(), Vec3::ZERO);

        run(&mut gs, &Ctx { dt: 0.25, now_s: 0.5 });
        assert_eq!(gs.store.ai(e).unwrap().target, Some(Vec3::ZERO));
        let v = gs.backends.physics.linvel(body).unwrap();
        assert!((v.x - 2.0).abs() < 1e-5 && v.z.abs() < 1e-5, "vel {v}");
        // Facing +x: a quarter turn about the vertical axis.
        let facing = gs.store.transform(e).unwrap().rot * Vec3::Z;
        assert!(facing.abs_diff_eq(Vec3::X, 1e-5), "facing {facing}");
    }

    #[test]
    fn slows_down_near_target() {
        assert_eq!(nearest(Vec3::ZERO, &[]), None);
        let mut gs = GameState::headless(3);
        let p = gs.player.unwrap();
        let pb = gs.store.body(p).unwrap().body;
        gs.backends.physics.set_translation(pb, vec3(0.0, 1.0, 200.0));
        let e = gs.spawn_enemy(vec3(1.0, 1.0, 0.0), 1);
        let body = gs.store.body(e).unwrap().body;
        run(&mut gs, &Ctx { dt: 0.6, now_s: 0.6 });
        let v = gs.backends.physics.linvel(body).unwrap();
        assert!((v.length() - 0.5).abs() < 1e-5);
    }
}
