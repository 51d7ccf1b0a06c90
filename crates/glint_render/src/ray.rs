//! Ray type for path tracing.

use glint_math::Vec3;

/// A ray with an origin and a normalized direction.
///
/// Rays are immutable: each bounce of the path tracer constructs a fresh
/// `Ray` rather than mutating the previous one.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized here; a zero-length
    /// direction is passed through unchanged and will simply never hit
    /// anything.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the ray's direction vector (unit length).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));

        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.direction(), Vec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_ray_degenerate_direction() {
        // A zero direction never produces NaN, it stays zero
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);

        assert_eq!(ray.direction(), Vec3::ZERO);
        assert_eq!(ray.at(5.0), Vec3::new(1.0, 2.0, 3.0));
    }
}
