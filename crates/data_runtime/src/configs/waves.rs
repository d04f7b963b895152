//! Wave pacing loaded from data/config/waves.toml with defaults and clamping.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveCfg {
    /// Countdown before the very first wave.
    pub initial_countdown_s: f32,
    /// Countdown after each completed wave.
    pub between_waves_s: f32,
    pub base_enemies: u32,
    pub enemies_per_wave: u32,
    pub base_health: f32,
    pub health_per_wave: f32,
    pub initial_spawn_interval_s: f32,
    /// Subtracted `step * wave` at every wave start (compounding).
    pub spawn_interval_step_s: f32,
    pub min_spawn_interval_s: f32,
    pub boss_every: u32,
    pub boss_health_mult: f32,
    pub boss_damage_mult: f32,
    pub boss_scale: f32,
    pub boss_color: u32,
    pub boss_spawn: [f32; 2],
    pub spawn_ring_min: f32,
    pub spawn_ring_max: f32,
    pub spawn_y: f32,
    pub bonus_per_wave: u32,
}

impl Default for WaveCfg {
    fn default() -> Self {
        Self {
            initial_countdown_s: 10.0,
            between_waves_s: 20.0,
            base_enemies: 5,
            enemies_per_wave: 2,
            base_health: 50.0,
            health_per_wave: 10.0,
            initial_spawn_interval_s: 2.0,
            spawn_interval_step_s: 0.2,
            min_spawn_interval_s: 0.1,
            boss_every: 5,
            boss_health_mult: 3.0,
            boss_damage_mult: 2.0,
            boss_scale: 1.5,
            boss_color: 0x8b0000,
            boss_spawn: [0.0, 50.0],
            spawn_ring_min: 40.0,
            spawn_ring_max: 60.0,
            spawn_y: 1.0,
            bonus_per_wave: 10,
        }
    }
}

impl WaveCfg {
    pub fn target_for(&self, wave: u32) -> u32 { self.base_enemies + self.enemies_per_wave * wave }

    pub fn health_for(&self, wave: u32) -> f32 { self.base_health + self.health_per_wave * wave as f32 }

    pub fn is_boss_wave(&self, wave: u32) -> bool { self.boss_every > 0 && wave > 0 && wave % self.boss_every == 0 }

    /// Interval in effect after starting wave `wave`, replaying the compounding
    /// reduction from the initial interval.
    pub fn interval_after(&self, wave: u32) -> f32 {
        (1..=wave).fold(self.initial_spawn_interval_s, |iv, w| self.next_interval(iv, w))
    }

    pub fn next_interval(&self, current: f32, wave: u32) -> f32 {
        (current - self.spawn_interval_step_s * wave as f32).max(self.min_spawn_interval_s)
    }
}

fn clamp(mut cfg: WaveCfg) -> WaveCfg {
    if cfg.min_spawn_interval_s < 0.01 { cfg.min_spawn_interval_s = 0.01; }
    if cfg.initial_spawn_interval_s < cfg.min_spawn_interval_s {
        cfg.initial_spawn_interval_s = cfg.min_spawn_interval_s;
    }
    if cfg.spawn_ring_max < cfg.spawn_ring_min { cfg.spawn_ring_max = cfg.spawn_ring_min; }
    if cfg.base_health <= 0.0 { cfg.base_health = 1.0; }
    cfg
}

pub fn load_default() -> Result<WaveCfg> {
    let cfg = crate::loader::load_toml::<WaveCfg>("config/waves.toml")?.unwrap_or_default();
    Ok(clamp(cfg))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_or_file_loads() {
        let cfg = load_default().expect("load");
        assert!(cfg.base_enemies >= 1);
        assert!(cfg.min_spawn_interval_s > 0.0);
    }

    #[test]
    fn per_wave_formulas() {
        let cfg = WaveCfg::default();
        assert_eq!(cfg.target_for(5), 15);
        assert_eq!(cfg.health_for(5), 100.0);
        assert!(cfg.is_boss_wave(5) && cfg.is_boss_wave(10));
        assert!(!cfg.is_boss_wave(4) && !cfg.is_boss_wave(0));
    }

    #[test]
    fn interval_compounds_then_floors() {
        let cfg = WaveCfg::default();
        assert!((cfg.interval_after(1) - 1.8).abs() < 1e-5);
        assert!((cfg.interval_after(2) - 1.4).abs() < 1e-5);
        assert!((cfg.interval_after(3) - 0.8).abs() < 1e-5);
        assert!((cfg.interval_after(4) - 0.1).abs() < 1e-5);
        assert!((cfg.interval_after(9) - 0.1).abs() < 1e-5);
    }
}
