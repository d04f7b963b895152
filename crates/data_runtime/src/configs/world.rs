//! Arena layout: player, structure, build grid, enemy steering and tick limits.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldCfg {
    pub player_spawn: [f32; 3],
    pub player_health: f32,
    pub player_speed: f32,
    pub structure_pos: [f32; 3],
    pub structure_health: f32,
    pub structure_color: u32,
    /// Edge length of one build cell in world units.
    pub grid_cell: f32,
    /// Towers may not sit where `|x| < half && |z| < half`.
    pub exclusion_half: f32,
    pub tower_health: f32,
    pub tower_y: f32,
    pub enemy_color: u32,
    pub enemy_speed: f32,
    pub enemy_slow_speed: f32,
    pub enemy_slow_radius: f32,
    pub retarget_s: f32,
    /// Upper bound for a single tick's delta.
    pub max_dt: f32,
}

impl Default for WorldCfg {
    fn default() -> Self {
        Self {
            player_spawn: [0.0, 10.0, 20.0],
            player_health: 100.0,
            player_speed: 5.0,
            structure_pos: [0.0, 0.0, 0.0],
            structure_health: 1000.0,
            structure_color: 0x8b7355,
            grid_cell: 4.0,
            exclusion_half: 5.0,
            tower_health: 100.0,
            tower_y: 2.0,
            enemy_color: 0xff4444,
            enemy_speed: 2.0,
            enemy_slow_speed: 0.5,
            enemy_slow_radius: 1.5,
            retarget_s: 0.5,
            max_dt: 0.05,
        }
    }
}

fn clamp(mut cfg: WorldCfg) -> WorldCfg {
    if cfg.grid_cell < 0.5 { cfg.grid_cell = 0.5; }
    if cfg.max_dt.is_nan() || cfg.max_dt <= 0.0 { cfg.max_dt = 0.05; }
    if cfg.retarget_s < 0.0 { cfg.retarget_s = 0.0; }
    cfg
}

pub fn load_default() -> Result<WorldCfg> {
    let cfg = crate::loader::load_toml::<WorldCfg>("config/world.toml")?.unwrap_or_default();
    Ok(clamp(cfg))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_or_file_loads() {
        let cfg = load_default().expect("load");
        assert!(cfg.grid_cell >= 0.5);
        assert!(cfg.max_dt > 0.0);
    }

    #[test]
    fn degenerate_values_clamped() {
        let cfg = clamp(toml::from_str("grid_cell = 0.0\nmax_dt = -1.0").unwrap());
        assert_eq!(cfg.grid_cell, 0.5);
        assert_eq!(cfg.max_dt, 0.05);
    }
}
