//! Orthonormal-frame construction and hemisphere sampling.
//!
//! The path tracer picks bounce directions by sampling a cosine-weighted
//! distribution over the hemisphere around the hit normal, then rotating the
//! local sample into world space through an orthonormal basis.

use glint_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

/// An orthonormal basis {u, v, w} with w aligned to a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis whose w axis is the given unit normal.
    ///
    /// u is the normal rotated a quarter turn about the x axis,
    /// `(0, -w.z, w.y)`, which is orthogonal to w by construction; v closes
    /// the frame as `w x u`. Returns `None` when the normal is (nearly)
    /// parallel to the x axis and the construction collapses - callers are
    /// expected to treat that as an unusable hit rather than divide by zero.
    pub fn from_normal(normal: Vec3) -> Option<Self> {
        let w = normal;
        let u = Vec3::new(0.0, -w.z, w.y);

        if u.length_squared() < 1e-12 {
            return None;
        }

        let u = u.normalize();
        let v = w.cross(u);
        Some(Self { u, v, w })
    }

    /// Rotate a local-frame vector into world space.
    #[inline]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        local.x * self.u + local.y * self.v + local.z * self.w
    }
}

/// Draw a cosine-weighted direction on the local +z hemisphere.
///
/// Uses the Malley mapping: a point on the unit disk, distributed with
/// radius sqrt(r2) and azimuth 2*pi*r1, projected up onto the hemisphere.
pub fn cosine_hemisphere(rng: &mut dyn RngCore) -> Vec3 {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();

    let x = (TAU * r1).cos() * r2.sqrt();
    let y = (TAU * r1).sin() * r2.sqrt();
    let z = (1.0 - r2).sqrt();

    Vec3::new(x, y, z)
}
