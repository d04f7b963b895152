//! Entity teardown: provider handles first, then the store row.

use ecs_core::EntityId;

use crate::GameState;
use crate::events::GameEvent;

impl GameState {
    /// Release an entity's body and mesh through the providers (best effort)
    /// and remove it from the store.
    pub(crate) fn release_entity(&mut self, id: EntityId) {
        if let Some(b) = self.store.body(id).copied() {
            self.backends.release_body(b.body, b.collider);
        }
        if let Some(m) = self.store.mesh(id).copied() {
            self.effects.forget_mesh(m.mesh);
            self.backends.release_mesh(m.mesh);
        }
        self.store.destroy_entity(id);
    }

    /// Remove a dead (or doomed) enemy and credit the kill. Returns `false`
    /// when `id` is not a live enemy.
    pub fn kill_enemy(&mut self, id: EntityId) -> bool {
        let Some(info) = self.store.enemy(id).copied() else { return false };
        self.release_entity(id);
        self.waves.enemies_alive = self.waves.enemies_alive.saturating_sub(1);
        self.progress.enemies_killed += 1;
        let reward = self.cfg.economy.reward_for(self.progress.difficulty);
        self.progress.reward(reward);
        metrics::counter!("enemies.killed_total").increment(1);
        log::debug!(
            "enemy {id:?} (wave {}{}) killed; +{reward}",
            info.wave,
            if info.boss { ", boss" } else { "" }
        );
        self.events.push(GameEvent::EnemyKilled { id, reward });
        true
    }

    /// Apply `amount` to an enemy and run the kill routine if it dies.
    /// Returns `true` on a kill.
    pub(crate) fn damage_enemy(&mut self, id: EntityId, amount: f32) -> bool {
        let Some(h) = self.store.health_mut(id) else { return false };
        if h.apply_damage(amount) > 0.0 {
            return false;
        }
        self.kill_enemy(id)
    }

    /// Release every entity and drop pending effects. The session keeps its
    /// scalars but has no world left afterwards.
    pub fn teardown(&mut self) {
        self.effects.clear(self.backends.render.as_mut());
        self.towers.drain();
        self.towers.ghost = None;
        self.towers.build_mode = false;
        for id in self.store.ids().collect::<Vec<_>>() {
            self.release_entity(id);
        }
        self.player = None;
        self.structure = None;
        self.waves.enemies_alive = 0;
        log::info!("session torn down");
    }
}
