//! Aggregate of every gameplay config, handed to `sim_core::GameState::new`.

use anyhow::{Context, Result};

use super::{combat::CombatCfg, economy::EconomyCfg, towers::TowerCatalog, waves::WaveCfg, world::WorldCfg};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameConfig {
    pub world: WorldCfg,
    pub combat: CombatCfg,
    pub waves: WaveCfg,
    pub economy: EconomyCfg,
    pub towers: TowerCatalog,
}

impl GameConfig {
    /// Load every section from `data/config/`, each falling back to defaults.
    pub fn load_default() -> Result<Self> {
        Ok(Self {
            world: super::world::load_default().context("world config")?,
            combat: super::combat::load_default().context("combat config")?,
            waves: super::waves::load_default().context("waves config")?,
            economy: super::economy::load_default().context("economy config")?,
            towers: super::towers::load_default().context("tower catalog")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn shipped_files_match_builtin_defaults() {
        let cfg = GameConfig::load_default().expect("load");
        assert_eq!(cfg, GameConfig::default());
    }
}
