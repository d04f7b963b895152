//! Small geometry helpers reusable by systems.

use glam::{Vec2, Vec3};

/// Distance on the ground plane, ignoring height.
#[inline]
pub fn dist_xz(a: Vec3, b: Vec3) -> f32 { Vec2::new(a.x - b.x, a.z - b.z).length() }

/// Planar unit direction from `from` to `to`, or zero when they coincide.
#[inline]
pub fn dir_xz(from: Vec3, to: Vec3) -> Vec3 { Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero() }

/// Parametric `t` at which a segment `[p0, p1]` first enters an axis-aligned
/// box. Returns `None` when no intersection occurs. `t` is in `[0, 1]`.
#[inline]
pub fn segment_aabb_enter_t(p0: Vec3, p1: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let d = p1 - p0;
    let mut tmin = 0.0f32;
    let mut tmax = 1.0f32;
    for i in 0..3 {
        let s = p0[i];
        let dir = d[i];
        if dir.abs() < 1e-6 {
            if s < min[i] || s > max[i] {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (min[i] - s) * inv;
            let mut t1 = (max[i] - s) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
            if tmin > tmax {
                return None;
            }
        }
    }
    Some(tmin)
}

/// Distance along `dir` at which a ray of length `max_len` from `origin`
/// enters the box centred at `center` with `half` extents.
pub fn ray_box_distance(origin: Vec3, dir: Vec3, max_len: f32, center: Vec3, half: Vec3) -> Option<f32> {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    let p1 = origin + dir * max_len;
    segment_aabb_enter_t(origin, p1, center - half, center + half).map(|t| t * max_len)
}
