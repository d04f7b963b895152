//! Tower placement on the build grid, the build-mode ghost and demolition.

use std::collections::HashSet;

use data_runtime::configs::towers::{TowerKind, TowerSpec};
use ecs_core::{Component, EntityId, Health, MeshRef, Transform};
use glam::Vec3;

use crate::GameState;
use crate::events::GameEvent;
use crate::providers::{MeshDesc, Sound};

const GHOST_INVALID: u32 = 0xff0000;
const PLACE_FLASH: u32 = 0xffffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub const fn new(x: i32, z: i32) -> Self { Self { x, z } }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "({}, {})", self.x, self.z) }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("need {need} money, have {have}")]
    InsufficientFunds { need: u32, have: u32 },
    #[error("cell {0} is occupied")]
    Occupied(GridCell),
    #[error("cell {0} is inside the structure footprint")]
    Forbidden(GridCell),
    #[error("build mode is off or the ghost has no aim point")]
    NotBuilding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub entity: EntityId,
    pub kind: TowerKind,
    pub spec: TowerSpec,
    pub last_shot_s: f64,
    pub cell: GridCell,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub entity: EntityId,
    pub aim: Option<Vec3>,
    pub cell: Option<GridCell>,
    pub valid: bool,
}

/// Owns the tower roster and grid occupancy. Entity components live in the
/// store; this only tracks which cells are taken and by whom.
#[derive(Debug, Clone)]
pub struct TowerManager {
    cell_size: f32,
    exclusion_half: f32,
    pub build_mode: bool,
    pub selected: TowerKind,
    pub ghost: Option<Ghost>,
    towers: Vec<Tower>,
    occupied: HashSet<GridCell>,
}

impl TowerManager {
    pub fn new(cell_size: f32, exclusion_half: f32) -> Self {
        Self {
            cell_size,
            exclusion_half,
            build_mode: false,
            selected: TowerKind::Basic,
            ghost: None,
            towers: Vec::new(),
            occupied: HashSet::new(),
        }
    }

    /// Towers in placement order.
    pub fn towers(&self) -> &[Tower] { &self.towers }
    pub(crate) fn towers_mut(&mut self) -> &mut [Tower] { &mut self.towers }
    pub fn len(&self) -> usize { self.towers.len() }
    pub fn is_empty(&self) -> bool { self.towers.is_empty() }

    pub fn snap(&self, pos: Vec3) -> GridCell {
        GridCell::new(
            (pos.x / self.cell_size).round() as i32,
            (pos.z / self.cell_size).round() as i32,
        )
    }

    pub fn cell_center(&self, cell: GridCell, y: f32) -> Vec3 {
        Vec3::new(cell.x as f32 * self.cell_size, y, cell.z as f32 * self.cell_size)
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool { self.occupied.contains(&cell) }

    /// Inside the structure's footprint, measured at the cell centre.
    pub fn is_forbidden(&self, cell: GridCell) -> bool {
        let c = self.cell_center(cell, 0.0);
        c.x.abs() < self.exclusion_half && c.z.abs() < self.exclusion_half
    }

    /// Occupancy and footprint checks, in that order.
    pub fn check_cell(&self, cell: GridCell) -> Result<(), PlacementError> {
        if self.is_occupied(cell) {
            return Err(PlacementError::Occupied(cell));
        }
        if self.is_forbidden(cell) {
            return Err(PlacementError::Forbidden(cell));
        }
        Ok(())
    }

    pub fn tower(&self, entity: EntityId) -> Option<&Tower> { self.towers.iter().find(|t| t.entity == entity) }

    pub(crate) fn insert(&mut self, tower: Tower) {
        self.occupied.insert(tower.cell);
        self.towers.push(tower);
    }

    pub(crate) fn remove(&mut self, entity: EntityId) -> Option<Tower> {
        let idx = self.towers.iter().position(|t| t.entity == entity)?;
        let t = self.towers.remove(idx);
        self.occupied.remove(&t.cell);
        Some(t)
    }

    pub(crate) fn drain(&mut self) -> Vec<Tower> {
        self.occupied.clear();
        std::mem::take(&mut self.towers)
    }
}

impl GameState {
    /// Enter or leave build mode. Entering creates the ghost preview,
    /// leaving releases it. Returns the new mode.
    pub fn toggle_build_mode(&mut self) -> bool {
        if self.towers.build_mode {
            self.towers.build_mode = false;
            if let Some(g) = self.towers.ghost.take() {
                self.release_entity(g.entity);
            }
        } else {
            self.towers.build_mode = true;
            let entity = self.spawn_ghost();
            self.towers.ghost = Some(Ghost {
                entity,
                aim: None,
                cell: None,
                valid: false,
            });
        }
        log::debug!("build mode {}", self.towers.build_mode);
        self.towers.build_mode
    }

    pub fn select_tower(&mut self, kind: TowerKind) {
        self.towers.selected = kind;
        self.update_ghost();
    }

    /// Point the ghost at a world position (usually the crosshair hit).
    pub fn aim_ghost(&mut self, at: Vec3) {
        if let Some(g) = self.towers.ghost.as_mut() {
            g.aim = Some(at);
        }
        self.update_ghost();
    }

    /// Snap, move and recolour the ghost. Runs every tick because occupancy
    /// changes underneath a stationary aim point.
    pub(crate) fn update_ghost(&mut self) {
        let Some(mut g) = self.towers.ghost else { return };
        let Some(aim) = g.aim else {
            if let Some(m) = self.store.mesh(g.entity).copied() {
                let color = self.cfg.towers.get(self.towers.selected).color;
                self.backends.render.set_color(m.mesh, color);
            }
            return;
        };
        let cell = self.towers.snap(aim);
        let valid = self.towers.check_cell(cell).is_ok();
        let pos = self.towers.cell_center(cell, self.cfg.world.tower_y);
        if let Some(t) = self.store.transform_mut(g.entity) {
            t.pos = pos;
        }
        if let Some(m) = self.store.mesh(g.entity).copied() {
            let color = if valid { self.cfg.towers.get(self.towers.selected).color } else { GHOST_INVALID };
            self.backends.render.set_position(m.mesh, pos);
            self.backends.render.set_color(m.mesh, color);
        }
        g.cell = Some(cell);
        g.valid = valid;
        self.towers.ghost = Some(g);
    }

    /// Place the selected kind where the ghost currently sits.
    pub fn place_at_ghost(&mut self) -> Result<EntityId, PlacementError> {
        let aim = self
            .towers
            .ghost
            .filter(|_| self.towers.build_mode)
            .and_then(|g| g.aim);
        let Some(aim) = aim else {
            return Err(self.reject(PlacementError::NotBuilding));
        };
        let kind = self.towers.selected;
        self.place_tower_at(kind, aim)
    }

    /// Snap a world position to its cell and place there.
    pub fn place_tower_at(&mut self, kind: TowerKind, at: Vec3) -> Result<EntityId, PlacementError> {
        let cell = self.towers.snap(at);
        self.place_tower(kind, cell)
    }

    /// Commit a tower on `cell` if funds, occupancy and footprint allow it.
    /// A rejection changes nothing.
    pub fn place_tower(&mut self, kind: TowerKind, cell: GridCell) -> Result<EntityId, PlacementError> {
        let spec = self.cfg.towers.get(kind).clone();
        if self.progress.money < spec.cost {
            let have = self.progress.money;
            return Err(self.reject(PlacementError::InsufficientFunds { need: spec.cost, have }));
        }
        if let Err(e) = self.towers.check_cell(cell) {
            return Err(self.reject(e));
        }
        self.progress.money -= spec.cost;
        let health = self.cfg.world.tower_health;
        let entity = self.spawn_tower_entity(cell, spec.color, Health::new(health));
        if let Some(m) = self.store.mesh(entity).copied() {
            let dur = self.cfg.combat.damage_flash_s;
            self.effects.flash(self.backends.render.as_mut(), m.mesh, PLACE_FLASH, dur);
        }
        self.towers.insert(Tower {
            entity,
            kind,
            spec,
            last_shot_s: f64::NEG_INFINITY,
            cell,
        });
        self.backends.play(Sound::TowerPlace);
        metrics::counter!("towers.placed_total", "kind" => kind.as_str()).increment(1);
        log::info!("placed {kind} tower at {cell}; money left {}", self.progress.money);
        self.events.push(GameEvent::TowerPlaced { id: entity, kind, cell });
        Ok(entity)
    }

    /// Remove a tower, free its cell and release its entity. Returns `false`
    /// if `entity` is not a tower.
    pub fn demolish_tower(&mut self, entity: EntityId) -> bool {
        let Some(t) = self.towers.remove(entity) else { return false };
        self.release_entity(entity);
        log::info!("tower at {} destroyed", t.cell);
        self.events.push(GameEvent::TowerDestroyed { id: entity, cell: t.cell });
        true
    }

    pub(crate) fn spawn_tower_entity(&mut self, cell: GridCell, color: u32, health: Health) -> EntityId {
        let pos = self.towers.cell_center(cell, self.cfg.world.tower_y);
        let mesh = self.backends.render.create_mesh(MeshDesc {
            size: Vec3::new(2.0, 4.0, 2.0),
            color,
            pos,
            translucent: false,
        });
        self.spawn_with(&[
            Component::Transform(Transform::at(pos)),
            Component::Health(health),
            Component::Mesh(MeshRef { mesh }),
        ])
    }

    fn spawn_ghost(&mut self) -> EntityId {
        let color = self.cfg.towers.get(self.towers.selected).color;
        let mesh = self.backends.render.create_mesh(MeshDesc {
            size: Vec3::new(2.0, 4.0, 2.0),
            color,
            pos: Vec3::ZERO,
            translucent: true,
        });
        self.spawn_with(&[
            Component::Transform(Transform::default()),
            Component::Mesh(MeshRef { mesh }),
        ])
    }

    fn reject(&mut self, e: PlacementError) -> PlacementError {
        log::debug!("placement rejected: {e}");
        self.events.push(GameEvent::PlacementRejected(e.clone()));
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn snap_rounds_to_nearest_cell() {
        let m = TowerManager::new(4.0, 5.0);
        assert_eq!(m.snap(vec3(9.9, 0.0, -6.1)), GridCell::new(2, -2));
        assert_eq!(m.snap(vec3(1.9, 3.0, 2.1)), GridCell::new(0, 1));
        assert_eq!(m.cell_center(GridCell::new(2, -3), 2.0), vec3(8.0, 2.0, -12.0));
    }

    #[test]
    fn footprint_covers_three_by_three_cells() {
        let m = TowerManager::new(4.0, 5.0);
        for x in -1..=1 {
            for z in -1..=1 {
                assert!(m.is_forbidden(GridCell::new(x, z)), "({x},{z}) should be forbidden");
            }
        }
        assert!(!m.is_forbidden(GridCell::new(2, 0)));
        assert!(!m.is_forbidden(GridCell::new(-1, 2)));
    }

    #[test]
    fn occupancy_follows_insert_and_remove() {
        let mut m = TowerManager::new(4.0, 5.0);
        let cell = GridCell::new(3, 3);
        let spec = data_runtime::configs::towers::TowerCatalog::default().basic;
        m.insert(Tower {
            entity: EntityId(9),
            kind: TowerKind::Basic,
            spec,
            last_shot_s: 0.0,
            cell,
        });
        assert_eq!(m.check_cell(cell), Err(PlacementError::Occupied(cell)));
        assert!(m.remove(EntityId(9)).is_some());
        assert!(m.check_cell(cell).is_ok());
        assert!(m.remove(EntityId(9)).is_none());
    }
}
