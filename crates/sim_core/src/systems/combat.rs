//! Enemy contact damage against the player, the structure and towers.
//!
//! Each enemy tests its targets in a fixed priority order. One cooldown per
//! attacker covers all three target classes, so a hit on the player also
//! delays the next hit on the structure.

use ecs_core::EntityId;

use crate::GameState;
use crate::events::GameOverReason;
use crate::geom::dist_xz;
use crate::providers::Sound;
use crate::schedule::Ctx;

const FLASH_RED: u32 = 0xff0000;
const FLASH_YELLOW: u32 = 0xffff00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Player,
    Structure,
    Tower,
}

pub fn run(gs: &mut GameState, ctx: &Ctx) {
    if gs.is_over() {
        return;
    }
    let (player_r, structure_r, tower_r) = {
        let c = &gs.cfg.combat;
        (c.player_range, c.structure_range, c.tower_range)
    };
    let player = gs.player.zip(gs.player_position());
    let structure = gs.structure.zip(gs.structure_position());
    for eid in gs.store.enemies() {
        let Some(epos) = gs.position(eid) else { continue };
        if let Some((pid, ppos)) = player
            && epos.distance(ppos) < player_r
        {
            strike(gs, ctx, eid, pid, Target::Player);
            if gs.is_over() {
                return;
            }
        }
        if let Some((sid, spos)) = structure
            && dist_xz(epos, spos) < structure_r
        {
            strike(gs, ctx, eid, sid, Target::Structure);
            if gs.is_over() {
                return;
            }
        }
        // Only the first tower in range is considered.
        let tower = gs
            .towers
            .towers()
            .iter()
            .map(|t| t.entity)
            .find(|&t| gs.store.transform(t).is_some_and(|tr| dist_xz(epos, tr.pos) < tower_r));
        if let Some(tid) = tower {
            strike(gs, ctx, eid, tid, Target::Tower);
        }
    }
}

/// Apply one hit if the attacker's cooldown allows it. Returns `true` on a hit.
fn strike(gs: &mut GameState, ctx: &Ctx, attacker: EntityId, target: EntityId, class: Target) -> bool {
    let Some(combat) = gs.store.combat(attacker).copied() else { return false };
    if !combat.ready(ctx.now_s) {
        return false;
    }
    let Some(health) = gs.store.health_mut(target) else { return false };
    let left = health.apply_damage(combat.damage);
    if let Some(c) = gs.store.combat_mut(attacker) {
        c.last_attack_s = ctx.now_s;
    }

    let (color, sound) = match class {
        Target::Player => (FLASH_RED, Sound::PlayerHit),
        Target::Structure => (FLASH_RED, Sound::StructureHit),
        Target::Tower => (FLASH_YELLOW, Sound::TowerHit),
    };
    if let Some(m) = gs.store.mesh(target).copied() {
        let hold = gs.cfg.combat.damage_flash_s;
        gs.effects.flash(gs.backends.render.as_mut(), m.mesh, color, hold);
    }
    gs.backends.play(sound);
    log::trace!("{attacker:?} hit {class:?} {target:?} for {}; {left} left", combat.damage);

    if left <= 0.0 {
        match class {
            Target::Player => gs.raise_game_over(GameOverReason::PlayerDied),
            Target::Structure => gs.raise_game_over(GameOverReason::StructureDestroyed),
            Target::Tower => {
                gs.backends.play(Sound::TowerDestroyed);
                gs.demolish_tower(target);
            }
        }
    }
    true
}
