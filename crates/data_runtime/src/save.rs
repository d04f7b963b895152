//! Save document schema and the single local save slot.
//!
//! The document is JSON with camelCase keys. A slot holds at most one
//! document; loading a document whose `version` differs from
//! [`SAVE_VERSION`], or one that fails to parse, clears the slot and reports
//! that no save exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::configs::economy::Difficulty;

pub const SAVE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDoc {
    pub version: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub game_store: GameStoreSave,
    pub towers: Vec<TowerSave>,
    pub enemies: Vec<EnemySave>,
    pub player: PlayerSave,
    pub library: StructureSave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStoreSave {
    pub money: u32,
    pub score: u32,
    pub high_score: u32,
    pub player_health: f32,
    pub player_max_health: f32,
    pub enemies_killed: u32,
    pub current_wave: u32,
    pub wave_in_progress: bool,
    pub wave_countdown: f32,
    pub enemies_spawned_this_wave: u32,
    pub enemies_alive: u32,
    pub total_waves: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerSave {
    /// Catalog kind name (`basic`, `rapid`, ...). Kept as text so an unknown
    /// kind surfaces as a restore validation error rather than a parse error.
    #[serde(rename = "type")]
    pub kind: String,
    pub grid_x: i32,
    pub grid_z: i32,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemySave {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub health: f32,
    pub max_health: f32,
    pub wave_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSave {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSave {
    pub health: f32,
    pub max_health: f32,
}

/// Summary shown before resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveInfo {
    pub timestamp: u64,
    pub wave: u32,
    pub score: u32,
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Raw storage for one serialized document.
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>>;
    fn write(&mut self, doc: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemorySaveStore {
    slot: Option<String>,
}

impl MemorySaveStore {
    pub fn new() -> Self { Self::default() }
    pub fn with_contents(doc: impl Into<String>) -> Self { Self { slot: Some(doc.into()) } }
}

impl SaveStore for MemorySaveStore {
    fn read(&self) -> Result<Option<String>> { Ok(self.slot.clone()) }

    fn write(&mut self, doc: &str) -> Result<()> {
        self.slot = Some(doc.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}

/// One JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// `data/saves/bastion.json` under the data root.
    pub fn default_location() -> Self { Self::new(crate::loader::data_root().join("saves/bastion.json")) }

    pub fn path(&self) -> &Path { &self.path }
}

impl SaveStore for FileSaveStore {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let txt = std::fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path.display()))?;
        Ok(Some(txt))
    }

    fn write(&mut self, doc: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        // Write to a sibling then rename so a crash never leaves half a document.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, doc).with_context(|| format!("write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path).with_context(|| format!("rename into {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", self.path.display())),
        }
    }
}

/// Versioned access to a [`SaveStore`].
pub struct SaveSlot<S: SaveStore> {
    store: S,
}

impl<S: SaveStore> SaveSlot<S> {
    pub fn new(store: S) -> Self { Self { store } }

    pub fn store(&self) -> &S { &self.store }

    pub fn has_saved_game(&self) -> bool { matches!(self.store.read(), Ok(Some(_))) }

    pub fn save(&mut self, doc: &SaveDoc) -> Result<()> {
        let txt = serde_json::to_string_pretty(doc).context("serialize save")?;
        self.store.write(&txt)
    }

    /// Returns the stored document if it parses and carries the current
    /// version. Anything else is discarded.
    pub fn load(&mut self) -> Option<SaveDoc> {
        let txt = match self.store.read() {
            Ok(Some(t)) => t,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("save read failed: {e:#}");
                return None;
            }
        };
        let doc = match serde_json::from_str::<SaveDoc>(&txt) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("discarding unreadable save: {e}");
                self.discard();
                return None;
            }
        };
        if doc.version != SAVE_VERSION {
            log::warn!("discarding save with version {} (expected {SAVE_VERSION})", doc.version);
            self.discard();
            return None;
        }
        Some(doc)
    }

    pub fn clear(&mut self) -> Result<()> { self.store.clear() }

    /// Timestamp, wave and score of the stored save, without validating it
    /// against the running version.
    pub fn save_info(&self) -> Option<SaveInfo> {
        let txt = self.store.read().ok().flatten()?;
        let doc = serde_json::from_str::<SaveDoc>(&txt).ok()?;
        Some(SaveInfo {
            timestamp: doc.timestamp,
            wave: doc.game_store.current_wave,
            score: doc.game_store.score,
        })
    }

    fn discard(&mut self) {
        if let Err(e) = self.store.clear() {
            log::warn!("failed to clear save slot: {e:#}");
        }
    }
}
