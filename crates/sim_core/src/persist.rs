//! Save/restore adapter between [`GameState`] and the save document.
//!
//! Restore validates the entire document before touching the session, so a
//! bad document leaves the running game exactly as it was.

use std::collections::HashSet;

use data_runtime::configs::towers::TowerKind;
use data_runtime::save::{
    EnemySave, GameStoreSave, PlayerSave, SAVE_VERSION, SaveDoc, SaveSlot, SaveStore, StructureSave, TowerSave,
    now_millis,
};
use ecs_core::Health;
use glam::Vec3;

use crate::GameState;
use crate::towers::{GridCell, Tower};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RestoreError {
    #[error("save version {found} does not match {SAVE_VERSION}")]
    Version { found: String },
    #[error("unknown tower type '{0}'")]
    UnknownTower(String),
    #[error("two towers on cell {0}")]
    DuplicateCell(GridCell),
    #[error("tower on forbidden cell {0}")]
    ForbiddenCell(GridCell),
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
    #[error("{0} max health must be positive")]
    BadMaxHealth(&'static str),
}

/// Snapshot the session into a save document.
pub fn capture(gs: &GameState) -> SaveDoc {
    let (player_health, player_max_health) = gs
        .player
        .and_then(|p| gs.store.health(p))
        .map(|h| (h.current(), h.max()))
        .unwrap_or((0.0, gs.cfg.world.player_health));
    let player = gs.player_position().unwrap_or(Vec3::from_array(gs.cfg.world.player_spawn));
    let library = gs
        .structure
        .and_then(|s| gs.store.health(s))
        .map(|h| StructureSave { health: h.current(), max_health: h.max() })
        .unwrap_or(StructureSave { health: 0.0, max_health: gs.cfg.world.structure_health });

    let towers = gs
        .towers
        .towers()
        .iter()
        .map(|t| {
            let h = gs.store.health(t.entity).copied().unwrap_or(Health::new(gs.cfg.world.tower_health));
            TowerSave {
                kind: t.kind.as_str().to_string(),
                grid_x: t.cell.x,
                grid_z: t.cell.z,
                health: h.current(),
                max_health: h.max(),
            }
        })
        .collect();

    let enemies = gs
        .store
        .enemies()
        .into_iter()
        .filter_map(|id| {
            let pos = gs.position(id)?;
            let h = gs.store.health(id)?;
            let info = gs.store.enemy(id)?;
            Some(EnemySave {
                pos_x: pos.x,
                pos_y: pos.y,
                pos_z: pos.z,
                health: h.current(),
                max_health: h.max(),
                wave_number: info.wave,
            })
        })
        .collect();

    let w = &gs.waves;
    SaveDoc {
        version: SAVE_VERSION.to_string(),
        timestamp: now_millis(),
        game_store: GameStoreSave {
            money: gs.progress.money,
            score: gs.progress.score,
            high_score: gs.progress.high_score,
            player_health,
            player_max_health,
            enemies_killed: gs.progress.enemies_killed,
            current_wave: w.current_wave,
            wave_in_progress: w.in_progress(),
            wave_countdown: w.countdown_s(),
            enemies_spawned_this_wave: w.spawned_this_wave,
            enemies_alive: w.enemies_alive,
            total_waves: w.total_waves,
            difficulty: Some(gs.progress.difficulty),
        },
        towers,
        enemies,
        player: PlayerSave {
            pos_x: player.x,
            pos_y: player.y,
            pos_z: player.z,
        },
        library,
    }
}

fn finite(v: f32, what: &'static str) -> Result<(), RestoreError> {
    if v.is_finite() { Ok(()) } else { Err(RestoreError::NotFinite(what)) }
}

fn max_health(v: f32, what: &'static str) -> Result<(), RestoreError> {
    finite(v, what)?;
    if v > 0.0 { Ok(()) } else { Err(RestoreError::BadMaxHealth(what)) }
}

/// Check everything restore relies on. Returns the parsed tower kinds in
/// document order.
pub fn validate(gs: &GameState, doc: &SaveDoc) -> Result<Vec<TowerKind>, RestoreError> {
    if doc.version != SAVE_VERSION {
        return Err(RestoreError::Version { found: doc.version.clone() });
    }
    let s = &doc.game_store;
    finite(s.player_health, "player health")?;
    max_health(s.player_max_health, "player")?;
    finite(s.wave_countdown, "wave countdown")?;
    finite(doc.library.health, "structure health")?;
    max_health(doc.library.max_health, "structure")?;
    for v in [doc.player.pos_x, doc.player.pos_y, doc.player.pos_z] {
        finite(v, "player position")?;
    }

    let mut kinds = Vec::with_capacity(doc.towers.len());
    let mut seen = HashSet::new();
    for t in &doc.towers {
        let kind = t
            .kind
            .parse::<TowerKind>()
            .map_err(|_| RestoreError::UnknownTower(t.kind.clone()))?;
        let cell = GridCell::new(t.grid_x, t.grid_z);
        if !seen.insert(cell) {
            return Err(RestoreError::DuplicateCell(cell));
        }
        if gs.towers.is_forbidden(cell) {
            return Err(RestoreError::ForbiddenCell(cell));
        }
        finite(t.health, "tower health")?;
        max_health(t.max_health, "tower")?;
        kinds.push(kind);
    }
    for e in &doc.enemies {
        for v in [e.pos_x, e.pos_y, e.pos_z, e.health] {
            finite(v, "enemy")?;
        }
        max_health(e.max_health, "enemy")?;
    }
    Ok(kinds)
}

/// Replace the session's world with the document's. On error nothing changes.
pub fn restore(gs: &mut GameState, doc: &SaveDoc) -> Result<(), RestoreError> {
    let kinds = validate(gs, doc)?;

    // Clear current dynamic content.
    for t in gs.towers.drain() {
        gs.release_entity(t.entity);
    }
    for id in gs.store.enemies() {
        gs.release_entity(id);
    }

    let s = &doc.game_store;
    gs.progress.money = s.money;
    gs.progress.score = s.score;
    gs.progress.high_score = s.high_score.max(s.score);
    gs.progress.enemies_killed = s.enemies_killed;
    if let Some(d) = s.difficulty {
        gs.progress.difficulty = d;
    }

    if let Some(sid) = gs.structure
        && let Some(h) = gs.store.health_mut(sid)
    {
        h.reset(doc.library.health, doc.library.max_health);
    }
    if let Some(pid) = gs.player {
        if let Some(h) = gs.store.health_mut(pid) {
            h.reset(s.player_health, s.player_max_health);
        }
        let pos = Vec3::new(doc.player.pos_x, doc.player.pos_y, doc.player.pos_z);
        if let Some(b) = gs.store.body(pid).copied() {
            gs.backends.physics.set_translation(b.body, pos);
            gs.backends.physics.set_linvel(b.body, Vec3::ZERO);
        }
        if let Some(t) = gs.store.transform_mut(pid) {
            t.pos = pos;
        }
    }

    for (t, kind) in doc.towers.iter().zip(kinds) {
        let spec = gs.cfg.towers.get(kind).clone();
        let cell = GridCell::new(t.grid_x, t.grid_z);
        let entity = gs.spawn_tower_entity(cell, spec.color, Health::with_values(t.health, t.max_health));
        gs.towers.insert(Tower {
            entity,
            kind,
            spec,
            last_shot_s: f64::NEG_INFINITY,
            cell,
        });
    }

    for e in &doc.enemies {
        restore_enemy(gs, e);
    }

    gs.waves.restore(
        s.current_wave,
        s.wave_in_progress,
        s.wave_countdown,
        s.enemies_spawned_this_wave,
        doc.enemies.len() as u32,
        s.total_waves,
    );
    gs.clear_game_over();
    log::info!(
        "restored wave {} with {} towers and {} enemies",
        s.current_wave,
        doc.towers.len(),
        doc.enemies.len()
    );
    Ok(())
}

fn restore_enemy(gs: &mut GameState, e: &EnemySave) {
    let id = gs.spawn_enemy(Vec3::new(e.pos_x, e.pos_y, e.pos_z), e.wave_number);
    if let Some(h) = gs.store.health_mut(id) {
        h.reset(e.health, e.max_health);
    }
    // Boss status is not persisted; a restored boss keeps its health only.
}

/// Capture and write the session to `slot`.
pub fn save_game<S: SaveStore>(gs: &GameState, slot: &mut SaveSlot<S>) -> anyhow::Result<()> {
    let doc = capture(gs);
    slot.save(&doc)?;
    log::info!("saved wave {} score {}", doc.game_store.current_wave, doc.game_store.score);
    Ok(())
}

/// Load from `slot` and restore. Returns `false` when there was nothing
/// usable; an invalid document is cleared from the slot.
pub fn load_game<S: SaveStore>(gs: &mut GameState, slot: &mut SaveSlot<S>) -> bool {
    let Some(doc) = slot.load() else { return false };
    match restore(gs, &doc) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("discarding save: {e}");
            if let Err(e) = slot.clear() {
                log::warn!("failed to clear save slot: {e:#}");
            }
            false
        }
    }
}
