//! Seams to the physics engine, renderer and audio mixer.
//!
//! The simulation only creates, moves, recolours and releases opaque handles
//! through these traits. Release and playback may fail; callers log and move
//! on, they never abort a tick over it.

use anyhow::Result;
use ecs_core::{BodyHandle, ColliderHandle, MeshHandle};
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub pos: Vec3,
    pub kind: BodyKind,
    pub lock_rotations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Capsule { half_height: f32, radius: f32 },
    Cuboid { half_extents: Vec3 },
}

pub trait PhysicsProvider {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;
    fn create_collider(&mut self, shape: ColliderShape, body: BodyHandle) -> ColliderHandle;
    fn remove_collider(&mut self, collider: ColliderHandle) -> Result<()>;
    /// Removes the body and any collider still attached to it.
    fn remove_rigid_body(&mut self, body: BodyHandle) -> Result<()>;
    fn translation(&self, body: BodyHandle) -> Option<Vec3>;
    fn linvel(&self, body: BodyHandle) -> Option<Vec3>;
    fn set_linvel(&mut self, body: BodyHandle, vel: Vec3);
    fn set_translation(&mut self, body: BodyHandle, pos: Vec3);
    fn step(&mut self, dt: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDesc {
    pub size: Vec3,
    pub color: u32,
    pub pos: Vec3,
    pub translucent: bool,
}

pub trait RenderProvider {
    fn create_mesh(&mut self, desc: MeshDesc) -> MeshHandle;
    fn remove_mesh(&mut self, mesh: MeshHandle) -> Result<()>;
    fn set_color(&mut self, mesh: MeshHandle, color: u32);
    fn color(&self, mesh: MeshHandle) -> Option<u32>;
    fn set_position(&mut self, mesh: MeshHandle, pos: Vec3);
    fn set_scale(&mut self, mesh: MeshHandle, scale: f32);
    /// Show the muzzle light at `at`, or hide it with `None`.
    fn set_muzzle_flash(&mut self, at: Option<Vec3>);
}

/// Fixed sound vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    PlayerHit,
    StructureHit,
    TowerHit,
    TowerDestroyed,
    EnemyHit,
    Shoot,
    TowerPlace,
    WaveStart,
    WaveComplete,
}

impl Sound {
    pub fn as_str(self) -> &'static str {
        match self {
            Sound::PlayerHit => "player_hit",
            Sound::StructureHit => "structure_hit",
            Sound::TowerHit => "tower_hit",
            Sound::TowerDestroyed => "tower_destroyed",
            Sound::EnemyHit => "enemy_hit",
            Sound::Shoot => "shoot",
            Sound::TowerPlace => "tower_place",
            Sound::WaveStart => "wave_start",
            Sound::WaveComplete => "wave_complete",
        }
    }
}

pub trait AudioProvider {
    fn play(&mut self, sound: Sound) -> Result<()>;
}

/// The three providers a [`crate::GameState`] is wired to.
pub struct Backends {
    pub physics: Box<dyn PhysicsProvider>,
    pub render: Box<dyn RenderProvider>,
    pub audio: Box<dyn AudioProvider>,
}

impl Backends {
    pub fn new(
        physics: impl PhysicsProvider + 'static,
        render: impl RenderProvider + 'static,
        audio: impl AudioProvider + 'static,
    ) -> Self {
        Self {
            physics: Box::new(physics),
            render: Box::new(render),
            audio: Box::new(audio),
        }
    }

    /// In-process implementations with no engine behind them.
    pub fn headless() -> Self {
        Self::new(
            crate::headless::KinematicPhysics::default(),
            crate::headless::HeadlessRender::default(),
            crate::headless::LogAudio,
        )
    }

    /// Fire-and-forget playback.
    pub fn play(&mut self, sound: Sound) {
        if let Err(e) = self.audio.play(sound) {
            provider_error("audio.play", &e);
        }
    }

    /// Best-effort release of a physics body: collider first, then the body.
    pub fn release_body(&mut self, body: BodyHandle, collider: Option<ColliderHandle>) {
        if let Some(c) = collider
            && let Err(e) = self.physics.remove_collider(c)
        {
            provider_error("physics.remove_collider", &e);
        }
        if let Err(e) = self.physics.remove_rigid_body(body) {
            provider_error("physics.remove_rigid_body", &e);
        }
    }

    pub fn release_mesh(&mut self, mesh: MeshHandle) {
        if let Err(e) = self.render.remove_mesh(mesh) {
            provider_error("render.remove_mesh", &e);
        }
    }
}

pub(crate) fn provider_error(site: &'static str, e: &anyhow::Error) {
    log::warn!("{site} failed: {e:#}");
    metrics::counter!("sim.provider_errors_total", "site" => site).increment(1);
}
