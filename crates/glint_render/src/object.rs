//! Object trait and HitInfo for ray-object intersection.

use crate::{Color, Material, Ray};
use glint_math::Vec3;

/// A dummy material backing `HitInfo::default()`.
/// Black, non-emissive, opaque - it absorbs everything.
struct DummyMaterial;

impl Material for DummyMaterial {
    fn albedo(&self) -> Color {
        Color::ZERO
    }

    fn emissive_strength(&self) -> f32 {
        0.0
    }
}

/// Static dummy material instance for the Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
///
/// The default value is a "no hit" placeholder only; validity is carried by
/// the `bool` returned from [`Object::intersect`], never by `t` alone
/// (a legitimate hit can sit arbitrarily close to `t = 0`).
#[derive(Clone)]
pub struct HitInfo<'a> {
    /// Hit distance along the ray parameter
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Surface normal at the intersection (unit length)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> Default for HitInfo<'a> {
    fn default() -> Self {
        Self {
            t: 0.0,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
        }
    }
}

/// Trait for scene geometry that can be hit by rays.
///
/// Implemented independently by each primitive kind; the scene dispatcher
/// only ever holds `dyn Object` handles and never inspects the concrete type.
pub trait Object: Send + Sync {
    /// Test the ray against this object.
    ///
    /// Returns true and fills in the record with the *nearest*
    /// self-intersection along the ray, or false on a miss.
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool;
}
