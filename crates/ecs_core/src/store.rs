//! Entity store: id allocation plus one optional slot per component kind.

use std::collections::BTreeMap;

use crate::components::{
    AiState, BodyRef, Combat, Component, ComponentKind, EnemyInfo, EntityId, Health, MeshRef,
    Transform,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),
}

#[derive(Debug, Default, Clone)]
struct Row {
    transform: Option<Transform>,
    health: Option<Health>,
    combat: Option<Combat>,
    body: Option<BodyRef>,
    mesh: Option<MeshRef>,
    ai: Option<AiState>,
    enemy: Option<EnemyInfo>,
}

impl Row {
    fn insert(&mut self, c: Component) {
        match c {
            Component::Transform(v) => self.transform = Some(v),
            Component::Health(v) => self.health = Some(v),
            Component::Combat(v) => self.combat = Some(v),
            Component::RigidBody(v) => self.body = Some(v),
            Component::Mesh(v) => self.mesh = Some(v),
            Component::Ai(v) => self.ai = Some(v),
            Component::Enemy(v) => self.enemy = Some(v),
        }
    }

    fn get(&self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Transform => self.transform.map(Component::Transform),
            ComponentKind::Health => self.health.map(Component::Health),
            ComponentKind::Combat => self.combat.map(Component::Combat),
            ComponentKind::RigidBody => self.body.map(Component::RigidBody),
            ComponentKind::Mesh => self.mesh.map(Component::Mesh),
            ComponentKind::Ai => self.ai.map(Component::Ai),
            ComponentKind::Enemy => self.enemy.map(Component::Enemy),
        }
    }

    fn take(&mut self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Transform => self.transform.take().map(Component::Transform),
            ComponentKind::Health => self.health.take().map(Component::Health),
            ComponentKind::Combat => self.combat.take().map(Component::Combat),
            ComponentKind::RigidBody => self.body.take().map(Component::RigidBody),
            ComponentKind::Mesh => self.mesh.take().map(Component::Mesh),
            ComponentKind::Ai => self.ai.take().map(Component::Ai),
            ComponentKind::Enemy => self.enemy.take().map(Component::Enemy),
        }
    }

    fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transform.is_some(),
            ComponentKind::Health => self.health.is_some(),
            ComponentKind::Combat => self.combat.is_some(),
            ComponentKind::RigidBody => self.body.is_some(),
            ComponentKind::Mesh => self.mesh.is_some(),
            ComponentKind::Ai => self.ai.is_some(),
            ComponentKind::Enemy => self.enemy.is_some(),
        }
    }
}

/// Owns every entity and its components.
///
/// Ids grow monotonically, so iterating the ordered map yields entities in
/// creation order. Systems rely on that for deterministic enemy ordering.
#[derive(Debug, Clone)]
pub struct EntityStore {
    next_id: u64,
    rows: BTreeMap<EntityId, Row>,
}

impl Default for EntityStore {
    fn default() -> Self { Self::new() }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.rows.len() }
    #[inline]
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    #[inline]
    pub fn contains(&self, id: EntityId) -> bool { self.rows.contains_key(&id) }

    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.rows.insert(id, Row::default());
        id
    }

    /// Remove the entity and all of its components. Returns `false` when the
    /// id was not present.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool { self.rows.remove(&id).is_some() }

    /// Insert or replace the component of `c`'s kind.
    pub fn add_component(&mut self, id: EntityId, c: Component) -> Result<(), StoreError> {
        let row = self.rows.get_mut(&id).ok_or(StoreError::UnknownEntity(id))?;
        row.insert(c);
        Ok(())
    }

    pub fn get_component(&self, id: EntityId, kind: ComponentKind) -> Option<Component> {
        self.rows.get(&id).and_then(|r| r.get(kind))
    }

    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> Option<Component> {
        self.rows.get_mut(&id).and_then(|r| r.take(kind))
    }

    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.rows.get(&id).is_some_and(|r| r.has(kind))
    }

    /// Ids carrying `kind`, in creation order.
    pub fn with_kind(&self, kind: ComponentKind) -> Vec<EntityId> {
        self.rows
            .iter()
            .filter(|(_, r)| r.has(kind))
            .map(|(id, _)| *id)
            .collect()
    }

    /// All live enemies in creation order.
    pub fn enemies(&self) -> Vec<EntityId> { self.with_kind(ComponentKind::Enemy) }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ { self.rows.keys().copied() }

    /// Drop every row. Id allocation keeps counting so old ids stay dead.
    pub fn clear(&mut self) { self.rows.clear(); }

    pub fn transform(&self, id: EntityId) -> Option<&Transform> { self.rows.get(&id)?.transform.as_ref() }
    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.rows.get_mut(&id)?.transform.as_mut()
    }
    pub fn health(&self, id: EntityId) -> Option<&Health> { self.rows.get(&id)?.health.as_ref() }
    pub fn health_mut(&mut self, id: EntityId) -> Option<&mut Health> { self.rows.get_mut(&id)?.health.as_mut() }
    pub fn combat(&self, id: EntityId) -> Option<&Combat> { self.rows.get(&id)?.combat.as_ref() }
    pub fn combat_mut(&mut self, id: EntityId) -> Option<&mut Combat> { self.rows.get_mut(&id)?.combat.as_mut() }
    pub fn body(&self, id: EntityId) -> Option<&BodyRef> { self.rows.get(&id)?.body.as_ref() }
    pub fn mesh(&self, id: EntityId) -> Option<&MeshRef> { self.rows.get(&id)?.mesh.as_ref() }
    pub fn ai(&self, id: EntityId) -> Option<&AiState> { self.rows.get(&id)?.ai.as_ref() }
    pub fn ai_mut(&mut self, id: EntityId) -> Option<&mut AiState> { self.rows.get_mut(&id)?.ai.as_mut() }
    pub fn enemy(&self, id: EntityId) -> Option<&EnemyInfo> { self.rows.get(&id)?.enemy.as_ref() }
}
