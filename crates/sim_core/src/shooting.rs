//! Player hitscan gun.

use data_runtime::configs::combat::CombatCfg;
use ecs_core::EntityId;
use glam::Vec3;

use crate::GameState;
use crate::geom::ray_box_distance;
use crate::providers::Sound;

const HIT_FLASH: u32 = 0xffffff;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerGun {
    pub damage: f32,
    pub cooldown_s: f32,
    pub max_range: f32,
    pub last_shot_s: f64,
}

impl PlayerGun {
    pub fn new(cfg: &CombatCfg) -> Self {
        Self {
            damage: cfg.gun_damage,
            cooldown_s: cfg.gun_cooldown_s,
            max_range: cfg.gun_max_range,
            last_shot_s: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn ready(&self, now_s: f64) -> bool { now_s - self.last_shot_s >= f64::from(self.cooldown_s) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Still cooling down, or the session is over.
    Rejected,
    Miss,
    Hit { target: EntityId, killed: bool },
}

impl GameState {
    /// Fire the player's gun along `dir` from `origin`. The nearest enemy
    /// box crossed by the ray takes the damage.
    pub fn shoot(&mut self, origin: Vec3, dir: Vec3) -> ShotOutcome {
        let now = self.now_s();
        if self.is_over() || !self.gun.ready(now) {
            return ShotOutcome::Rejected;
        }
        self.gun.last_shot_s = now;
        self.backends.play(Sound::Shoot);
        let muzzle = origin + dir.normalize_or_zero() * 0.5;
        let muzzle_s = self.cfg.combat.muzzle_flash_s;
        self.effects.muzzle(self.backends.render.as_mut(), muzzle, muzzle_s);

        let Some(target) = self.pick_enemy(origin, dir) else {
            return ShotOutcome::Miss;
        };
        self.backends.play(Sound::EnemyHit);
        if let Some(m) = self.store.mesh(target).copied() {
            let hold = self.cfg.combat.hit_flash_s;
            self.effects.flash(self.backends.render.as_mut(), m.mesh, HIT_FLASH, hold);
        }
        let killed = self.damage_enemy(target, self.gun.damage);
        ShotOutcome::Hit { target, killed }
    }

    fn pick_enemy(&self, origin: Vec3, dir: Vec3) -> Option<EntityId> {
        let base = Vec3::from_array(self.cfg.combat.enemy_half_extents);
        let mut best: Option<(f32, EntityId)> = None;
        for id in self.store.enemies() {
            let Some(center) = self.position(id) else { continue };
            let scale = self.store.transform(id).map(|t| t.scale).unwrap_or(Vec3::ONE);
            let Some(d) = ray_box_distance(origin, dir, self.gun.max_range, center, base * scale) else {
                continue;
            };
            if best.map(|(b, _)| d < b).unwrap_or(true) {
                best = Some((d, id));
            }
        }
        best.map(|(_, id)| id)
    }
}
