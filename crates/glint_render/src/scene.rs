//! Scene container, intersection dispatch, and the recursive radiance
//! estimator.
//!
//! This is the core of the renderer. A [`Scene`] owns the object and light
//! collections plus the recursion limit; [`Scene::trace_ray`] estimates the
//! radiance arriving along a ray by classifying each path vertex into one of
//! four outcomes (depth exceeded, miss, emissive hit, diffuse bounce) and
//! recursing on the last of them.

use crate::{cosine_hemisphere, Color, HitInfo, Light, Object, Onb, Ray};
use glint_math::Vec3;
use rand::RngCore;
use std::sync::Arc;

/// Default number of diffuse bounces traced before a path is truncated.
pub const DEFAULT_RECURSION_LIMIT: u32 = 5;

/// Offset applied to a bounce ray's origin along its direction, so the new
/// ray does not re-intersect the surface it just left.
const SELF_INTERSECTION_EPSILON: f32 = 1e-3;

/// Outcome of a single `trace_ray` invocation, resolved once per call.
///
/// Only `DiffuseBounce` continues the path; every other variant terminates
/// it, which is what bounds the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEvent {
    /// Depth passed the scene's recursion limit; no intersection was run.
    DepthExceeded,
    /// The ray escaped the scene.
    Miss,
    /// The ray hit a luminaire.
    EmissiveHit,
    /// The ray hit a non-emissive surface and the path continues.
    DiffuseBounce,
}

/// A renderable scene: objects, lights, and the recursion limit.
///
/// Objects and lights are held behind `Arc` so callers can keep their own
/// handles (materials are likewise shared); the scene never mutates them.
/// Lights are stored for direct-lighting extensions but the hemisphere-
/// sampling estimator here does not read them.
pub struct Scene {
    objects: Vec<Arc<dyn Object>>,
    lights: Vec<Arc<dyn Light>>,
    recursion_limit: u32,
}

impl Scene {
    /// Create an empty scene with the default recursion limit.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Set the recursion limit. Fixed once the scene is built.
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Arc<dyn Object>) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Arc<dyn Light>) {
        self.lights.push(light);
    }

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of lights in the scene.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// The configured recursion limit.
    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }

    /// Find the nearest intersection of the ray with any scene object.
    ///
    /// Every object is tested unconditionally - an early exit on the first
    /// hit would be wrong, since a later object in the collection may sit
    /// closer along the ray. When `include_transparent` is false, hits on
    /// transparent materials are discarded outright, as if those objects
    /// were absent from this query. Ties on distance go to scan order.
    ///
    /// Returns true and fills `info` from the winning hit, or false (leaving
    /// `info` untouched) when nothing qualifies.
    pub fn test_intersection<'a>(
        &'a self,
        ray: &Ray,
        include_transparent: bool,
        info: &mut HitInfo<'a>,
    ) -> bool {
        let mut closest = f32::INFINITY;
        let mut hit_anything = false;

        for object in &self.objects {
            let mut candidate = HitInfo::default();
            if !object.intersect(ray, &mut candidate) {
                continue;
            }

            if candidate.material.is_transparent() && !include_transparent {
                continue;
            }

            // A malformed hit distance (negative or non-finite) is a miss.
            if !candidate.t.is_finite() || candidate.t < 0.0 {
                continue;
            }

            if candidate.t < closest {
                closest = candidate.t;
                *info = candidate;
            }
            hit_anything = true;
        }

        hit_anything
    }

    /// Classify what happens to a path vertex at the given depth.
    ///
    /// The depth check comes first, before any intersection work, so a path
    /// past the limit costs nothing. On `EmissiveHit` and `DiffuseBounce`
    /// the record has been filled from the nearest hit.
    pub fn classify<'a>(&'a self, ray: &Ray, depth: u32, info: &mut HitInfo<'a>) -> PathEvent {
        if depth > self.recursion_limit {
            return PathEvent::DepthExceeded;
        }

        if !self.test_intersection(ray, true, info) {
            return PathEvent::Miss;
        }

        if info.material.emissive_strength() > 0.0 {
            return PathEvent::EmissiveHit;
        }

        PathEvent::DiffuseBounce
    }

    /// Estimate the radiance arriving at `origin` from `direction`.
    ///
    /// Terminal cases return immediately: zero radiance for a truncated or
    /// escaped path, `emissive_strength * albedo` for a luminaire hit (no
    /// distance or angle falloff - the luminaire contributes its radiance
    /// directly). A non-emissive hit bounces once into a cosine-weighted
    /// hemisphere direction around the hit normal and recurses; the
    /// recursive estimate is scaled by the surface albedo and an
    /// inverse-square of the hit distance.
    ///
    /// Note the combination is intentionally not a textbook unbiased
    /// estimator: there is no division by the sample PDF, and the per-bounce
    /// `1/t^2` term is kept as-is. Matching the established output is the
    /// contract here.
    pub fn trace_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let ray = Ray::new(origin, direction);
        let mut info = HitInfo::default();

        match self.classify(&ray, depth, &mut info) {
            PathEvent::DepthExceeded | PathEvent::Miss => Color::ZERO,
            PathEvent::EmissiveHit => info.material.emissive_strength() * info.material.albedo(),
            PathEvent::DiffuseBounce => {
                // A hit normal parallel to the x axis defeats the frame
                // construction; drop the path instead of propagating NaN.
                let Some(basis) = Onb::from_normal(info.normal) else {
                    return Color::ZERO;
                };

                let bounce = basis.local_to_world(cosine_hemisphere(rng)).normalize();
                let next_origin = info.position + SELF_INTERSECTION_EPSILON * bounce;

                let incoming = self.trace_ray(next_origin, bounce, depth + 1, rng);
                incoming * info.material.albedo() / (info.t * info.t)
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstMaterial, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock object that always reports a hit at a fixed distance and counts
    /// how many times it was queried.
    struct ProbeObject {
        t: f32,
        material: ConstMaterial,
        queries: AtomicU32,
    }

    impl ProbeObject {
        fn at(t: f32, material: ConstMaterial) -> Self {
            Self {
                t,
                material,
                queries: AtomicU32::new(0),
            }
        }

        fn queries(&self) -> u32 {
            self.queries.load(Ordering::Relaxed)
        }
    }

    impl Object for ProbeObject {
        fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
            self.queries.fetch_add(1, Ordering::Relaxed);
            info.t = self.t;
            info.position = ray.at(self.t);
            info.normal = Vec3::Y;
            info.material = &self.material;
            true
        }
    }

    /// Mock object that reports a hit with a malformed distance.
    struct BrokenObject {
        t: f32,
        material: ConstMaterial,
    }

    impl Object for BrokenObject {
        fn intersect<'a>(&'a self, ray: &Ray, info: &mut HitInfo<'a>) -> bool {
            info.t = self.t;
            info.position = ray.at(self.t);
            info.normal = Vec3::Y;
            info.material = &self.material;
            true
        }
    }

    fn any_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        let mut info = HitInfo::default();

        assert!(!scene.test_intersection(&any_ray(), true, &mut info));
        assert!(!scene.test_intersection(&any_ray(), false, &mut info));

        let mut rng = StdRng::seed_from_u64(0);
        for depth in 0..=scene.recursion_limit() {
            let radiance = scene.trace_ray(Vec3::ZERO, Vec3::Z, depth, &mut rng);
            assert_eq!(radiance, Color::ZERO);
        }
    }

    #[test]
    fn test_miss_returns_exact_zero() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::new(ConstMaterial::diffuse(Color::ONE)),
        )));

        // Ray pointing away from the only object
        let mut rng = StdRng::seed_from_u64(1);
        for depth in 0..=scene.recursion_limit() {
            let radiance = scene.trace_ray(Vec3::ZERO, Vec3::Z, depth, &mut rng);
            assert_eq!(radiance, Color::ZERO);
        }
    }

    #[test]
    fn test_depth_exceeded_skips_intersection() {
        let probe = Arc::new(ProbeObject::at(1.0, ConstMaterial::diffuse(Color::ONE)));
        let mut scene = Scene::new();
        scene.add_object(probe.clone());

        let mut rng = StdRng::seed_from_u64(2);
        let radiance = scene.trace_ray(Vec3::ZERO, Vec3::Z, scene.recursion_limit() + 1, &mut rng);

        assert_eq!(radiance, Color::ZERO);
        assert_eq!(probe.queries(), 0, "no intersection test past the limit");
    }

    #[test]
    fn test_emissive_hit_returns_strength_times_albedo() {
        let albedo = Color::new(0.2, 0.4, 0.8);
        let probe = Arc::new(ProbeObject::at(3.0, ConstMaterial::emissive(albedo, 10.0)));
        let mut scene = Scene::new();
        scene.add_object(probe.clone());

        let mut rng = StdRng::seed_from_u64(3);
        for depth in 0..=scene.recursion_limit() {
            let radiance = scene.trace_ray(Vec3::ZERO, Vec3::Z, depth, &mut rng);
            // Exact, independent of depth and of hit distance/normal
            assert_eq!(radiance, 10.0 * albedo);
        }
    }

    #[test]
    fn test_closest_hit_wins() {
        let near = ConstMaterial::diffuse(Color::new(1.0, 0.0, 0.0));
        let far = ConstMaterial::diffuse(Color::new(0.0, 1.0, 0.0));

        // Insertion order must not matter
        for near_first in [true, false] {
            let mut scene = Scene::new();
            let near_obj = Arc::new(ProbeObject::at(1.0, near.clone()));
            let far_obj = Arc::new(ProbeObject::at(2.0, far.clone()));
            if near_first {
                scene.add_object(near_obj);
                scene.add_object(far_obj);
            } else {
                scene.add_object(far_obj);
                scene.add_object(near_obj);
            }

            let mut info = HitInfo::default();
            assert!(scene.test_intersection(&any_ray(), true, &mut info));
            assert_eq!(info.t, 1.0);
            assert_eq!(info.material.albedo(), Color::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_transparency_filter() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(ProbeObject::at(
            1.0,
            ConstMaterial::diffuse(Color::ONE).with_transparency(),
        )));
        scene.add_object(Arc::new(ProbeObject::at(
            2.0,
            ConstMaterial::diffuse(Color::ONE),
        )));

        let mut info = HitInfo::default();
        assert!(scene.test_intersection(&any_ray(), false, &mut info));
        assert_eq!(info.t, 2.0, "transparent near hit skipped entirely");
        assert!(!info.material.is_transparent());

        let mut info = HitInfo::default();
        assert!(scene.test_intersection(&any_ray(), true, &mut info));
        assert_eq!(info.t, 1.0, "transparent near hit wins when included");
        assert!(info.material.is_transparent());
    }

    #[test]
    fn test_malformed_hit_distances_are_misses() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(BrokenObject {
            t: f32::NAN,
            material: ConstMaterial::default(),
        }));
        scene.add_object(Arc::new(BrokenObject {
            t: -1.0,
            material: ConstMaterial::default(),
        }));

        let mut info = HitInfo::default();
        assert!(!scene.test_intersection(&any_ray(), true, &mut info));
    }

    #[test]
    fn test_recursion_performs_limit_plus_one_dispatches() {
        // A non-emissive object that always hits: every level bounces until
        // the depth check cuts the path off.
        let probe = Arc::new(ProbeObject::at(1.0, ConstMaterial::diffuse(Color::ONE)));
        let mut scene = Scene::new();
        scene.add_object(probe.clone());

        let mut rng = StdRng::seed_from_u64(4);
        let radiance = scene.trace_ray(Vec3::ZERO, Vec3::Z, 0, &mut rng);

        assert_eq!(radiance, Color::ZERO, "path truncated with no light found");
        assert_eq!(probe.queries(), scene.recursion_limit() + 1);
    }

    #[test]
    fn test_classify_outcomes() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(ProbeObject::at(
            1.0,
            ConstMaterial::emissive(Color::ONE, 5.0),
        )));

        let mut info = HitInfo::default();
        assert_eq!(
            scene.classify(&any_ray(), scene.recursion_limit() + 1, &mut info),
            PathEvent::DepthExceeded
        );
        assert_eq!(scene.classify(&any_ray(), 0, &mut info), PathEvent::EmissiveHit);

        let empty = Scene::new();
        let mut info = HitInfo::default();
        assert_eq!(empty.classify(&any_ray(), 0, &mut info), PathEvent::Miss);
    }

    #[test]
    fn test_trace_is_deterministic_under_seed() {
        // A floor to bounce off and an enclosing luminaire so bounced paths
        // terminate with nonzero radiance.
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, -101.0, 0.0),
            100.0,
            Arc::new(ConstMaterial::diffuse(Color::new(0.8, 0.8, 0.8))),
        )));
        scene.add_object(Arc::new(Sphere::new(
            Vec3::ZERO,
            50.0,
            Arc::new(ConstMaterial::emissive(Color::ONE, 4.0)),
        )));

        // Straight down onto the floor sphere's apex: every bounce leaves
        // the floor upward and must reach the luminaire.
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let direction = Vec3::new(0.0, -1.0, 0.0);

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        let a = scene.trace_ray(origin, direction, 0, &mut rng_a);
        let b = scene.trace_ray(origin, direction, 0, &mut rng_b);

        assert_eq!(a, b, "identical seeds must give bit-identical radiance");
        assert_ne!(a, Color::ZERO);
    }
}
