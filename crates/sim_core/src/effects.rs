//! Deferred cosmetic effects: colour flashes, the muzzle light and shot tracers.
//!
//! Entries are advanced once per tick and fire when their timer runs out.
//! Nothing here feeds back into gameplay.

use ecs_core::MeshHandle;
use glam::Vec3;

use crate::providers::{MeshDesc, RenderProvider, provider_error};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Effect {
    RestoreColor { mesh: MeshHandle, color: u32 },
    HideMuzzle,
    Tracer { mesh: MeshHandle, from: Vec3, to: Vec3 },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    effect: Effect,
    duration_s: f32,
    elapsed_s: f32,
}

#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<Pending>,
}

impl EffectQueue {
    pub fn new() -> Self { Self::default() }
    #[inline]
    pub fn len(&self) -> usize { self.pending.len() }
    #[inline]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Tint `mesh` with `color` for `hold_s`, then restore its resting colour.
    /// Overlapping flashes keep the colour captured by the first one.
    pub fn flash(&mut self, render: &mut dyn RenderProvider, mesh: MeshHandle, color: u32, hold_s: f32) {
        let prior = self.pending.iter().position(|p| {
            matches!(p.effect, Effect::RestoreColor { mesh: m, .. } if m == mesh)
        });
        let resting = match prior {
            Some(i) => match self.pending.swap_remove(i).effect {
                Effect::RestoreColor { color, .. } => Some(color),
                _ => None,
            },
            None => render.color(mesh),
        };
        let Some(resting) = resting else { return };
        render.set_color(mesh, color);
        self.push(Effect::RestoreColor { mesh, color: resting }, hold_s);
    }

    pub fn muzzle(&mut self, render: &mut dyn RenderProvider, at: Vec3, hold_s: f32) {
        self.pending.retain(|p| p.effect != Effect::HideMuzzle);
        render.set_muzzle_flash(Some(at));
        self.push(Effect::HideMuzzle, hold_s);
    }

    /// A short-lived marker travelling from `from` to `to`.
    pub fn tracer(&mut self, render: &mut dyn RenderProvider, from: Vec3, to: Vec3, color: u32, duration_s: f32) {
        let mesh = render.create_mesh(MeshDesc {
            size: Vec3::splat(0.2),
            color,
            pos: from,
            translucent: false,
        });
        self.push(Effect::Tracer { mesh, from, to }, duration_s);
    }

    /// Drop pending restores for a mesh that is about to be released.
    pub fn forget_mesh(&mut self, mesh: MeshHandle) {
        self.pending
            .retain(|p| !matches!(p.effect, Effect::RestoreColor { mesh: m, .. } if m == mesh));
    }

    pub fn tick(&mut self, render: &mut dyn RenderProvider, dt: f32) {
        let mut i = 0;
        while i < self.pending.len() {
            let p = &mut self.pending[i];
            p.elapsed_s += dt;
            if p.elapsed_s < p.duration_s {
                if let Effect::Tracer { mesh, from, to } = p.effect {
                    let t = (p.elapsed_s / p.duration_s).clamp(0.0, 1.0);
                    render.set_position(mesh, from.lerp(to, t));
                }
                i += 1;
                continue;
            }
            let done = self.pending.swap_remove(i);
            fire(render, done.effect);
        }
    }

    /// Discard everything. Tracer meshes are released, other timers dropped
    /// without firing.
    pub fn clear(&mut self, render: &mut dyn RenderProvider) {
        for p in self.pending.drain(..) {
            if let Effect::Tracer { mesh, .. } = p.effect
                && let Err(e) = render.remove_mesh(mesh)
            {
                provider_error("render.remove_mesh", &e);
            }
        }
    }

    fn push(&mut self, effect: Effect, duration_s: f32) {
        self.pending.push(Pending {
            effect,
            duration_s: duration_s.max(0.0),
            elapsed_s: 0.0,
        });
    }
}

fn fire(render: &mut dyn RenderProvider, effect: Effect) {
    match effect {
        Effect::RestoreColor { mesh, color } => render.set_color(mesh, color),
        Effect::HideMuzzle => render.set_muzzle_flash(None),
        Effect::Tracer { mesh, .. } => {
            if let Err(e) = render.remove_mesh(mesh) {
                provider_error("render.remove_mesh", &e);
            }
        }
    }
}
