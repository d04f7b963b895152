//! Starting funds and difficulty-scaled kill rewards.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => anyhow::bail!("unknown difficulty '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillRewards {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for KillRewards {
    fn default() -> Self { Self { easy: 3, medium: 2, hard: 1 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyCfg {
    pub starting_money: u32,
    pub difficulty: Difficulty,
    pub kill_reward: KillRewards,
}

impl Default for EconomyCfg {
    fn default() -> Self {
        Self {
            starting_money: 100,
            difficulty: Difficulty::Easy,
            kill_reward: KillRewards::default(),
        }
    }
}

impl EconomyCfg {
    pub fn reward_for(&self, d: Difficulty) -> u32 {
        match d {
            Difficulty::Easy => self.kill_reward.easy,
            Difficulty::Medium => self.kill_reward.medium,
            Difficulty::Hard => self.kill_reward.hard,
        }
    }
}

pub fn load_default() -> Result<EconomyCfg> {
    Ok(crate::loader::load_toml::<EconomyCfg>("config/economy.toml")?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn rewards_scale_inversely_with_difficulty() {
        let e = EconomyCfg::default();
        assert_eq!(e.reward_for(Difficulty::Easy), 3);
        assert_eq!(e.reward_for(Difficulty::Medium), 2);
        assert_eq!(e.reward_for(Difficulty::Hard), 1);
        assert_eq!(e.difficulty, Difficulty::Easy);
    }

    #[test]
    fn difficulty_parses_case_insensitive() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn default_or_file_loads() {
        let cfg = load_default().expect("load");
        assert!(cfg.starting_money > 0);
    }
}
