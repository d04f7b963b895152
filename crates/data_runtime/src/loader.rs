//! Path resolution and TOML loading shared by the config modules.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub fn data_root() -> PathBuf {
    // Prefer top-level workspace `data/` so tests and tools can run from any crate.
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Parse `data/<rel>` as TOML, or return `None` when the file does not exist.
pub fn load_toml<T: DeserializeOwned>(rel: impl AsRef<Path>) -> Result<Option<T>> {
    let path = data_root().join(rel);
    if !path.is_file() {
        log::debug!("config {} missing; using defaults", path.display());
        return Ok(None);
    }
    let txt = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let parsed = toml::from_str::<T>(&txt).with_context(|| format!("parse TOML {}", path.display()))?;
    Ok(Some(parsed))
}
