//! Component definitions.
//!
//! Handles to physics bodies and render meshes are opaque ids minted by the
//! providers in `sim_core`; the store never looks inside them.

use glam::{Quat, Vec3};

/// Opaque entity identifier. Minted by [`crate::EntityStore`], never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    #[inline]
    pub fn at(pos: Vec3) -> Self { Self { pos, ..Self::default() } }
}

/// Hit points. `current` always stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Full health. A non-positive or non-finite `max` is bumped to 1.
    pub fn new(max: f32) -> Self {
        let max = sanitize_max(max);
        Self { current: max, max }
    }

    /// Explicit values, clamped into range.
    pub fn with_values(current: f32, max: f32) -> Self {
        let mut h = Self::new(max);
        h.set_current(current);
        h
    }

    #[inline]
    pub fn current(&self) -> f32 { self.current }
    #[inline]
    pub fn max(&self) -> f32 { self.max }
    #[inline]
    pub fn alive(&self) -> bool { self.current > 0.0 }
    #[inline]
    pub fn depleted(&self) -> bool { self.current <= 0.0 }

    /// Subtract `amount` (negative amounts are ignored) and return the new value.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount.is_finite() && amount > 0.0 {
            self.current = (self.current - amount).max(0.0);
        }
        self.current
    }

    pub fn set_current(&mut self, v: f32) {
        self.current = if v.is_finite() { v.clamp(0.0, self.max) } else { 0.0 };
    }

    /// Replace both values; used by the wave director when it overrides the
    /// spawn baseline and by save restore.
    pub fn reset(&mut self, current: f32, max: f32) {
        self.max = sanitize_max(max);
        self.set_current(current);
    }
}

fn sanitize_max(max: f32) -> f32 {
    if max.is_finite() && max > 0.0 { max } else { 1.0 }
}

/// Melee attacker state. `last_attack_s` is on the sim clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combat {
    pub damage: f32,
    pub attack_cooldown_s: f32,
    pub last_attack_s: f64,
}

impl Combat {
    pub fn new(damage: f32, attack_cooldown_s: f32) -> Self {
        Self {
            damage,
            attack_cooldown_s,
            last_attack_s: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn ready(&self, now_s: f64) -> bool { now_s - self.last_attack_s >= f64::from(self.attack_cooldown_s) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRef {
    pub body: BodyHandle,
    pub collider: Option<ColliderHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRef {
    pub mesh: MeshHandle,
}

/// Enemy steering memory: last chosen target and time since it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AiState {
    pub target: Option<Vec3>,
    pub since_retarget_s: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyInfo {
    pub wave: u32,
    pub boss: bool,
}

/// Closed set of components an entity may carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Transform(Transform),
    Health(Health),
    Combat(Combat),
    RigidBody(BodyRef),
    Mesh(MeshRef),
    Ai(AiState),
    Enemy(EnemyInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Health,
    Combat,
    RigidBody,
    Mesh,
    Ai,
    Enemy,
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::Health(_) => ComponentKind::Health,
            Component::Combat(_) => ComponentKind::Combat,
            Component::RigidBody(_) => ComponentKind::RigidBody,
            Component::Mesh(_) => ComponentKind::Mesh,
            Component::Ai(_) => ComponentKind::Ai,
            Component::Enemy(_) => ComponentKind::Enemy,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut h = Health::new(30.0);
        assert_eq!(h.apply_damage(25.0), 5.0);
        assert_eq!(h.apply_damage(25.0), 0.0);
        assert!(h.depleted());
        h.apply_damage(10.0);
        assert_eq!(h.current(), 0.0);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut h = Health::with_values(40.0, 100.0);
        h.apply_damage(-50.0);
        assert_eq!(h.current(), 40.0);
    }

    #[test]
    fn values_clamped_into_range() {
        let h = Health::with_values(250.0, 100.0);
        assert_eq!(h.current(), 100.0);
        let h = Health::with_values(5.0, 0.0);
        assert_eq!(h.max(), 1.0);
        assert_eq!(h.current(), 1.0);
        let mut h = Health::new(100.0);
        h.reset(300.0, 300.0);
        assert_eq!((h.current(), h.max()), (300.0, 300.0));
    }

    #[test]
    fn fresh_combat_is_ready() {
        let c = Combat::new(10.0, 1.0);
        assert!(c.ready(0.0));
        let c = Combat { last_attack_s: 2.0, ..c };
        assert!(!c.ready(2.5));
        assert!(c.ready(3.0));
    }
}
