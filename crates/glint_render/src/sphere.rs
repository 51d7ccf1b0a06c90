//! Sphere primitive.

use crate::{
    object::{HitInfo, Object},
    Material, Ray,
};
use glint_math::Vec3;
use std::sync::Arc;

/// Minimum accepted hit distance, so rays starting on a surface do not
/// report that surface again.
const T_MIN: f32 = 1e-4;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Object for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return false;
        }

        let sqrt_d = discriminant.sqrt();

        // Nearest root in front of the ray; the far root covers rays that
        // start inside the sphere.
        let mut t = (h - sqrt_d) / a;
        if t < T_MIN {
            t = (h + sqrt_d) / a;
            if t < T_MIN {
                return false;
            }
        }

        let position = ray.at(t);

        info.t = t;
        info.position = position;
        info.normal = (position - self.center) / self.radius;
        info.material = self.material.as_ref();

        true
    }
}
