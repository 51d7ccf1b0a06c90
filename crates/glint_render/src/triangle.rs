//! Triangle, triangle-mesh, and mesh-instance primitives.
//!
//! Intersection uses the Möller-Trumbore algorithm. A [`Mesh`] scans its own
//! triangles linearly for the nearest hit; a [`MeshInstance`] shares one
//! prototype mesh across placements by mapping rays into the prototype's
//! local space instead of duplicating geometry.

use crate::{
    object::{HitInfo, Object},
    Material, Ray,
};
use glint_math::{Mat4, Mat4Ext, Vec3};
use std::sync::Arc;

const T_MIN: f32 = 1e-4;

/// Möller-Trumbore ray/triangle test. Returns the hit parameter, or None.
fn ray_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to the triangle plane
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t >= T_MIN).then_some(t)
}

/// Face normal oriented against the incoming ray, so shading always sees a
/// normal on the side the ray arrived from.
fn facing_normal(face_normal: Vec3, direction: Vec3) -> Vec3 {
    if direction.dot(face_normal) < 0.0 {
        face_normal
    } else {
        -face_normal
    }
}

/// A single triangle primitive.
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices, winding counter-clockwise.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }
}

impl Object for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
        let Some(t) = ray_triangle(ray.origin(), ray.direction(), self.v0, self.v1, self.v2)
        else {
            return false;
        };

        info.t = t;
        info.position = ray.at(t);
        info.normal = facing_normal(self.normal, ray.direction());
        info.material = self.material.as_ref();

        true
    }
}

/// Triangle data held inside a mesh, normal pre-computed.
struct MeshTriangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    normal: Vec3,
}

/// A triangle mesh with a single material.
pub struct Mesh {
    triangles: Vec<MeshTriangle>,
    material: Arc<dyn Material>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new(material: Arc<dyn Material>) -> Self {
        Self {
            triangles: Vec::new(),
            material,
        }
    }

    /// Create a mesh from vertex triples.
    pub fn from_triangles(triangles: &[[Vec3; 3]], material: Arc<dyn Material>) -> Self {
        let mut mesh = Self::new(material);
        for [v0, v1, v2] in triangles {
            mesh.push_triangle(*v0, *v1, *v2);
        }
        mesh
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        self.triangles.push(MeshTriangle { v0, v1, v2, normal });
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Object for Mesh {
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
        let mut closest = f32::INFINITY;
        let mut hit_anything = false;

        for tri in &self.triangles {
            let Some(t) = ray_triangle(ray.origin(), ray.direction(), tri.v0, tri.v1, tri.v2)
            else {
                continue;
            };

            if t < closest {
                closest = t;
                info.t = t;
                info.position = ray.at(t);
                info.normal = facing_normal(tri.normal, ray.direction());
                info.material = self.material.as_ref();
                hit_anything = true;
            }
        }

        hit_anything
    }
}

/// A placement of a shared prototype mesh.
///
/// The prototype is intersected in its own local space; hit position and
/// normal are mapped back into the world afterwards.
pub struct MeshInstance {
    mesh: Arc<Mesh>,
    transform: Mat4,
    inv_transform: Mat4,
}

impl MeshInstance {
    /// Instance a mesh under the given local-to-world transform.
    pub fn new(mesh: Arc<Mesh>, transform: Mat4) -> Self {
        Self {
            mesh,
            transform,
            inv_transform: transform.inverse(),
        }
    }
}

impl Object for MeshInstance {
    fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
        let local_ray = Ray::new(
            self.inv_transform.transform_point3(ray.origin()),
            self.inv_transform.transform_vector3(ray.direction()),
        );

        let mut local_info = HitInfo::default();
        if !self.mesh.intersect(&local_ray, &mut local_info) {
            return false;
        }

        let position = self.transform.transform_point3(local_info.position);

        info.t = (position - ray.origin()).dot(ray.direction());
        info.position = position;
        info.normal = self
            .transform
            .transform_vector3(local_info.normal)
            .normalize_or_zero();
        info.material = local_info.material;

        true
    }
}
