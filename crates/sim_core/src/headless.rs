//! Engine-free providers for tests and the headless runner.

use std::collections::HashMap;

use anyhow::{Result, bail};
use ecs_core::{BodyHandle, ColliderHandle, MeshHandle};
use glam::Vec3;

use crate::providers::{
    AudioProvider, BodyDesc, BodyKind, ColliderShape, MeshDesc, PhysicsProvider, RenderProvider, Sound,
};

#[derive(Debug, Clone, Copy)]
struct Body {
    pos: Vec3,
    vel: Vec3,
    kind: BodyKind,
}

/// Explicit Euler integration of velocities; no gravity, no contacts.
#[derive(Debug, Default)]
pub struct KinematicPhysics {
    next: u64,
    bodies: HashMap<BodyHandle, Body>,
    colliders: HashMap<ColliderHandle, (BodyHandle, ColliderShape)>,
}

impl KinematicPhysics {
    pub fn body_count(&self) -> usize { self.bodies.len() }
    pub fn collider_count(&self) -> usize { self.colliders.len() }

    fn mint(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

impl PhysicsProvider for KinematicPhysics {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let h = BodyHandle(self.mint());
        self.bodies.insert(
            h,
            Body {
                pos: desc.pos,
                vel: Vec3::ZERO,
                kind: desc.kind,
            },
        );
        h
    }

    fn create_collider(&mut self, shape: ColliderShape, body: BodyHandle) -> ColliderHandle {
        let h = ColliderHandle(self.mint());
        self.colliders.insert(h, (body, shape));
        h
    }

    fn remove_collider(&mut self, collider: ColliderHandle) -> Result<()> {
        if self.colliders.remove(&collider).is_none() {
            bail!("collider {collider:?} not found");
        }
        Ok(())
    }

    fn remove_rigid_body(&mut self, body: BodyHandle) -> Result<()> {
        if self.bodies.remove(&body).is_none() {
            bail!("body {body:?} not found");
        }
        self.colliders.retain(|_, (b, _)| *b != body);
        Ok(())
    }

    fn translation(&self, body: BodyHandle) -> Option<Vec3> { self.bodies.get(&body).map(|b| b.pos) }

    fn linvel(&self, body: BodyHandle) -> Option<Vec3> { self.bodies.get(&body).map(|b| b.vel) }

    fn set_linvel(&mut self, body: BodyHandle, vel: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body)
            && b.kind == BodyKind::Dynamic
        {
            b.vel = vel;
        }
    }

    fn set_translation(&mut self, body: BodyHandle, pos: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.pos = pos;
        }
    }

    fn step(&mut self, dt: f32) {
        for b in self.bodies.values_mut() {
            if b.kind == BodyKind::Dynamic {
                b.pos += b.vel * dt;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshState {
    pub color: u32,
    pub pos: Vec3,
    pub scale: f32,
    pub translucent: bool,
}

/// Keeps the last requested state of every mesh.
#[derive(Debug, Default)]
pub struct HeadlessRender {
    next: u64,
    meshes: HashMap<MeshHandle, MeshState>,
    muzzle: Option<Vec3>,
}

impl HeadlessRender {
    pub fn mesh(&self, mesh: MeshHandle) -> Option<&MeshState> { self.meshes.get(&mesh) }
    pub fn mesh_count(&self) -> usize { self.meshes.len() }
    pub fn muzzle(&self) -> Option<Vec3> { self.muzzle }
}

impl RenderProvider for HeadlessRender {
    fn create_mesh(&mut self, desc: MeshDesc) -> MeshHandle {
        self.next += 1;
        let h = MeshHandle(self.next);
        self.meshes.insert(
            h,
            MeshState {
                color: desc.color,
                pos: desc.pos,
                scale: 1.0,
                translucent: desc.translucent,
            },
        );
        h
    }

    fn remove_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        if self.meshes.remove(&mesh).is_none() {
            bail!("mesh {mesh:?} not found");
        }
        Ok(())
    }

    fn set_color(&mut self, mesh: MeshHandle, color: u32) {
        if let Some(m) = self.meshes.get_mut(&mesh) {
            m.color = color;
        }
    }

    fn color(&self, mesh: MeshHandle) -> Option<u32> { self.meshes.get(&mesh).map(|m| m.color) }

    fn set_position(&mut self, mesh: MeshHandle, pos: Vec3) {
        if let Some(m) = self.meshes.get_mut(&mesh) {
            m.pos = pos;
        }
    }

    fn set_scale(&mut self, mesh: MeshHandle, scale: f32) {
        if let Some(m) = self.meshes.get_mut(&mesh) {
            m.scale = scale;
        }
    }

    fn set_muzzle_flash(&mut self, at: Option<Vec3>) { self.muzzle = at; }
}

/// Writes every sound to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioProvider for LogAudio {
    fn play(&mut self, sound: Sound) -> Result<()> {
        log::debug!(target: "audio", "play {}", sound.as_str());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn dynamic_bodies_integrate_fixed_do_not() {
        let mut p = KinematicPhysics::default();
        let d = p.create_body(BodyDesc { pos: Vec3::ZERO, kind: BodyKind::Dynamic, lock_rotations: true });
        let f = p.create_body(BodyDesc { pos: Vec3::ZERO, kind: BodyKind::Fixed, lock_rotations: true });
        p.set_linvel(d, vec3(2.0, 0.0, -1.0));
        p.set_linvel(f, vec3(2.0, 0.0, -1.0));
        p.step(0.5);
        assert_eq!(p.translation(d).unwrap(), vec3(1.0, 0.0, -0.5));
        assert_eq!(p.translation(f).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn removing_body_drops_its_colliders() {
        let mut p = KinematicPhysics::default();
        let b = p.create_body(BodyDesc { pos: Vec3::ZERO, kind: BodyKind::Dynamic, lock_rotations: true });
        let c = p.create_collider(ColliderShape::Capsule { half_height: 0.5, radius: 0.5 }, b);
        p.remove_rigid_body(b).unwrap();
        assert_eq!(p.collider_count(), 0);
        assert!(p.remove_collider(c).is_err());
        assert!(p.remove_rigid_body(b).is_err());
        assert!(p.translation(b).is_none());
    }

    #[test]
    fn mesh_removal_twice_errors() {
        let mut r = HeadlessRender::default();
        let m = r.create_mesh(MeshDesc { size: Vec3::ONE, color: 0x123456, pos: Vec3::ZERO, translucent: false });
        r.set_color(m, 0xffffff);
        assert_eq!(r.color(m), Some(0xffffff));
        r.remove_mesh(m).unwrap();
        assert!(r.remove_mesh(m).is_err());
        assert!(r.color(m).is_none());
    }
}
