//! Entity factories for the player, the structure and enemies.

use ecs_core::{AiState, BodyRef, Combat, Component, EnemyInfo, EntityId, Health, MeshRef, Transform};
use glam::Vec3;

use crate::GameState;
use crate::providers::{BodyDesc, BodyKind, ColliderShape, MeshDesc};

impl GameState {
    /// Create an entity carrying `comps`.
    pub(crate) fn spawn_with(&mut self, comps: &[Component]) -> EntityId {
        let id = self.store.create_entity();
        for c in comps {
            if let Err(e) = self.store.add_component(id, *c) {
                log::error!("spawn {id:?}: {e}");
            }
        }
        id
    }

    pub(crate) fn spawn_player(&mut self) -> EntityId {
        let w = &self.cfg.world;
        let pos = Vec3::from_array(w.player_spawn);
        let health = Health::new(w.player_health);
        let body = self.backends.physics.create_body(BodyDesc {
            pos,
            kind: BodyKind::Dynamic,
            lock_rotations: true,
        });
        let collider = self
            .backends
            .physics
            .create_collider(ColliderShape::Capsule { half_height: 0.5, radius: 0.5 }, body);
        self.spawn_with(&[
            Component::Transform(Transform::at(pos)),
            Component::Health(health),
            Component::RigidBody(BodyRef {
                body,
                collider: Some(collider),
            }),
        ])
    }

    pub(crate) fn spawn_structure(&mut self) -> EntityId {
        let w = &self.cfg.world;
        let pos = Vec3::from_array(w.structure_pos);
        let health = Health::new(w.structure_health);
        let mesh = self.backends.render.create_mesh(MeshDesc {
            size: Vec3::new(10.0, 8.0, 10.0),
            color: w.structure_color,
            pos,
            translucent: false,
        });
        self.spawn_with(&[
            Component::Transform(Transform::at(pos)),
            Component::Health(health),
            Component::Mesh(MeshRef { mesh }),
        ])
    }

    /// Spawn a baseline enemy at `pos`: dynamic body, mesh, baseline health
    /// and melee stats. Callers adjust health and damage afterwards.
    pub fn spawn_enemy(&mut self, pos: Vec3, wave: u32) -> EntityId {
        let c = &self.cfg.combat;
        let health = Health::new(c.enemy_health);
        let combat = Combat::new(c.enemy_damage, c.enemy_cooldown_s);
        let half = Vec3::from_array(c.enemy_half_extents);
        let color = self.cfg.world.enemy_color;
        let body = self.backends.physics.create_body(BodyDesc {
            pos,
            kind: BodyKind::Dynamic,
            lock_rotations: true,
        });
        let collider = self
            .backends
            .physics
            .create_collider(ColliderShape::Cuboid { half_extents: half }, body);
        let mesh = self.backends.render.create_mesh(MeshDesc {
            size: half * 2.0,
            color,
            pos,
            translucent: false,
        });
        let id = self.spawn_with(&[
            Component::Transform(Transform::at(pos)),
            Component::Health(health),
            Component::Combat(combat),
            Component::RigidBody(BodyRef {
                body,
                collider: Some(collider),
            }),
            Component::Mesh(MeshRef { mesh }),
            Component::Ai(AiState::default()),
            Component::Enemy(EnemyInfo { wave, boss: false }),
        ]);
        self.waves.enemies_alive += 1;
        id
    }

    /// Turn a freshly spawned enemy into a boss.
    pub(crate) fn promote_to_boss(&mut self, id: EntityId) {
        let wc = &self.cfg.waves;
        let (scale, color, mult) = (wc.boss_scale, wc.boss_color, wc.boss_damage_mult);
        if let Some(c) = self.store.combat_mut(id) {
            c.damage *= mult;
        }
        if let Some(t) = self.store.transform_mut(id) {
            t.scale = Vec3::splat(scale);
        }
        if let Some(info) = self.store.enemy(id).copied() {
            let _ = self.store.add_component(id, Component::Enemy(EnemyInfo { boss: true, ..info }));
        }
        if let Some(m) = self.store.mesh(id).copied() {
            self.backends.render.set_scale(m.mesh, scale);
            self.backends.render.set_color(m.mesh, color);
        }
    }
}
