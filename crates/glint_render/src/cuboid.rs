//! Oriented box primitive.
//!
//! The box is axis-aligned in its own local space and carries a transform;
//! rays are mapped into local space for a slab test, the same way instanced
//! geometry maps rays into prototype space.

use crate::{
    object::{HitInfo, Object},
    Material, Ray,
};
use glint_math::{Mat4, Mat4Ext, Vec3};
use std::sync::Arc;

const T_MIN: f32 = 1e-4;

/// A box with arbitrary orientation, defined by a transform and its
/// dimensions along the local axes.
pub struct Cuboid {
    transform: Mat4,
    inv_transform: Mat4,
    half_extents: Vec3,
    material: Arc<dyn Material>,
}

impl Cuboid {
    /// Create a box. `size` gives the full extent along each local axis;
    /// `transform` places the box center in the world.
    pub fn new(transform: Mat4, size: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            transform,
            inv_transform: transform.inverse(),
            half_extents: 0.5 * size.abs(),
            material,
        }
    }
}

impl Object for Cuboid {
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
        let local_origin = self.inv_transform.transform_point3(ray.origin());
        let local_dir = self.inv_transform.transform_vector3(ray.direction());

        // Slab test per local axis, tracking which axis bounds the interval
        // on each side so the hit face (and its normal) is known.
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_axis = 0;
        let mut far_axis = 0;

        for axis in 0..3 {
            let o = local_origin[axis];
            let d = local_dir[axis];
            let e = self.half_extents[axis];

            if d.abs() < 1e-12 {
                // Parallel to this slab: either always inside it or never
                if o.abs() > e {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (-e - o) * inv;
            let mut t1 = (e - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_near {
                t_near = t0;
                near_axis = axis;
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = axis;
            }
            if t_near > t_far {
                return false;
            }
        }

        // Entering face if the ray starts outside, exit face if it starts
        // inside the box.
        let (t_local, face_axis) = if t_near > T_MIN {
            (t_near, near_axis)
        } else if t_far > T_MIN {
            (t_far, far_axis)
        } else {
            return false;
        };

        let local_position = local_origin + t_local * local_dir;

        let mut local_normal = Vec3::ZERO;
        local_normal[face_axis] = local_position[face_axis].signum();

        let position = self.transform.transform_point3(local_position);

        info.t = (position - ray.origin()).dot(ray.direction());
        info.position = position;
        info.normal = self
            .transform
            .transform_vector3(local_normal)
            .normalize_or_zero();
        info.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, ConstMaterial};
    use std::f32::consts::FRAC_PI_2;

    fn white() -> Arc<dyn Material> {
        Arc::new(ConstMaterial::diffuse(Color::ONE))
    }

    #[test]
    fn test_axis_aligned_hit() {
        let cuboid = Cuboid::new(
            Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
            Vec3::new(2.0, 2.0, 2.0),
            white(),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut info = HitInfo::default();
        assert!(cuboid.intersect(&ray, &mut info));
        assert!((info.t - 4.0).abs() < 1e-4);
        assert!((info.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_miss() {
        let cuboid = Cuboid::new(
            Mat4::from_translation(Vec3::new(0.0, 10.0, -5.0)),
            Vec3::ONE,
            white(),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut info = HitInfo::default();
        assert!(!cuboid.intersect(&ray, &mut info));
    }

    #[test]
    fn test_rotated_hit() {
        // A thin wall rotated to face the ray: rotating a (4, 4, 0.2) slab
        // a quarter turn about Y swaps its x and z extents.
        let transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0))
            * Mat4::from_rotation_y(FRAC_PI_2);
        let cuboid = Cuboid::new(transform, Vec3::new(0.2, 4.0, 4.0), white());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // After rotation the wall is 0.2 thick along world z, centered at
        // z = -3, so the near face sits at z = -2.9.
        let mut info = HitInfo::default();
        assert!(cuboid.intersect(&ray, &mut info));
        assert!((info.t - 2.9).abs() < 1e-3);
        assert!((info.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-3);
    }

    #[test]
    fn test_hit_from_inside_reports_exit_face() {
        let cuboid = Cuboid::new(Mat4::IDENTITY, Vec3::new(4.0, 4.0, 4.0), white());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let mut info = HitInfo::default();
        assert!(cuboid.intersect(&ray, &mut info));
        assert!((info.t - 2.0).abs() < 1e-4);
        // Outward normal of the +x face
        assert!((info.normal - Vec3::X).length() < 1e-4);
    }
}
