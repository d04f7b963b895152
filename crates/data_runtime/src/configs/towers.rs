//! Tower catalog loaded from data/config/towers.toml with built-in presets.
//!
//! The set of kinds is fixed; the file may only retune the numbers of the
//! five presets.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    Basic,
    Rapid,
    Heavy,
    Sniper,
    Splash,
}

impl TowerKind {
    pub const ALL: [TowerKind; 5] = [
        TowerKind::Basic,
        TowerKind::Rapid,
        TowerKind::Heavy,
        TowerKind::Sniper,
        TowerKind::Splash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TowerKind::Basic => "basic",
            TowerKind::Rapid => "rapid",
            TowerKind::Heavy => "heavy",
            TowerKind::Sniper => "sniper",
            TowerKind::Splash => "splash",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for TowerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        TowerKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown tower kind '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub name: String,
    pub cost: u32,
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub range: f32,
    pub color: u32,
    #[serde(default)]
    pub splash_radius: Option<f32>,
}

impl TowerSpec {
    /// Seconds between shots. A non-positive rate never fires.
    pub fn cooldown_s(&self) -> f64 {
        if self.fire_rate > 0.0 { 1.0 / f64::from(self.fire_rate) } else { f64::INFINITY }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerCatalog {
    pub basic: TowerSpec,
    pub rapid: TowerSpec,
    pub heavy: TowerSpec,
    pub sniper: TowerSpec,
    pub splash: TowerSpec,
}

fn spec(name: &str, cost: u32, damage: f32, fire_rate: f32, range: f32, color: u32) -> TowerSpec {
    TowerSpec {
        name: name.to_string(),
        cost,
        damage,
        fire_rate,
        range,
        color,
        splash_radius: None,
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            basic: spec("Basic Tower", 50, 10.0, 1.0, 15.0, 0x4a90e2),
            rapid: spec("Rapid Tower", 100, 5.0, 5.0, 12.0, 0xe24a4a),
            heavy: spec("Heavy Tower", 150, 50.0, 0.5, 20.0, 0x9b4ae2),
            sniper: spec("Sniper Tower", 200, 100.0, 0.3, 30.0, 0x2ecc71),
            splash: TowerSpec {
                splash_radius: Some(5.0),
                ..spec("Splash Tower", 250, 30.0, 0.8, 18.0, 0xf39c12)
            },
        }
    }
}

impl TowerCatalog {
    pub fn get(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Basic => &self.basic,
            TowerKind::Rapid => &self.rapid,
            TowerKind::Heavy => &self.heavy,
            TowerKind::Sniper => &self.sniper,
            TowerKind::Splash => &self.splash,
        }
    }

    fn get_mut(&mut self, kind: TowerKind) -> &mut TowerSpec {
        match kind {
            TowerKind::Basic => &mut self.basic,
            TowerKind::Rapid => &mut self.rapid,
            TowerKind::Heavy => &mut self.heavy,
            TowerKind::Sniper => &mut self.sniper,
            TowerKind::Splash => &mut self.splash,
        }
    }
}

fn clamp(mut cat: TowerCatalog) -> TowerCatalog {
    for kind in TowerKind::ALL {
        let s = cat.get_mut(kind);
        if !(s.range.is_finite() && s.range > 0.0) { s.range = 1.0; }
        if !(s.fire_rate.is_finite() && s.fire_rate >= 0.0) { s.fire_rate = 0.0; }
        if !(s.damage.is_finite() && s.damage >= 0.0) { s.damage = 0.0; }
        if let Some(r) = s.splash_radius
            && !(r.is_finite() && r > 0.0)
        {
            s.splash_radius = None;
        }
    }
    cat
}

/// Load the catalog from the default location, falling back to the presets.
pub fn load_default() -> Result<TowerCatalog> {
    let cat = crate::loader::load_toml::<TowerCatalog>("config/towers.toml")?.unwrap_or_default();
    Ok(clamp(cat))
}
