//! Combat tuning: contact ranges, enemy baseline, player gun and hit feedback.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatCfg {
    /// 3D distance at which an enemy can strike the player.
    pub player_range: f32,
    /// Planar distance to the structure centre.
    pub structure_range: f32,
    /// Planar distance to a tower.
    pub tower_range: f32,
    pub enemy_health: f32,
    pub enemy_damage: f32,
    pub enemy_cooldown_s: f32,
    /// Enemy hit box half extents (x, y, z) before transform scale.
    pub enemy_half_extents: [f32; 3],
    pub gun_damage: f32,
    pub gun_cooldown_s: f32,
    pub gun_max_range: f32,
    pub muzzle_flash_s: f32,
    pub hit_flash_s: f32,
    pub damage_flash_s: f32,
    pub tracer_s: f32,
}

impl Default for CombatCfg {
    fn default() -> Self {
        Self {
            player_range: 2.0,
            structure_range: 6.0,
            tower_range: 3.0,
            enemy_health: 100.0,
            enemy_damage: 10.0,
            enemy_cooldown_s: 1.0,
            enemy_half_extents: [0.5, 1.0, 0.5],
            gun_damage: 25.0,
            gun_cooldown_s: 0.2,
            gun_max_range: 1000.0,
            muzzle_flash_s: 0.05,
            hit_flash_s: 0.1,
            damage_flash_s: 0.2,
            tracer_s: 0.2,
        }
    }
}

fn clamp(mut cfg: CombatCfg) -> CombatCfg {
    if cfg.enemy_cooldown_s < 0.0 { cfg.enemy_cooldown_s = 0.0; }
    if cfg.gun_cooldown_s < 0.0 { cfg.gun_cooldown_s = 0.0; }
    if cfg.gun_max_range <= 0.0 { cfg.gun_max_range = 1000.0; }
    cfg
}

pub fn load_default() -> Result<CombatCfg> {
    let cfg = crate::loader::load_toml::<CombatCfg>("config/combat.toml")?.unwrap_or_default();
    Ok(clamp(cfg))
}
