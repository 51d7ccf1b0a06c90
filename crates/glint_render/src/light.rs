//! Light sources.
//!
//! Lights live on the scene for direct-lighting extensions; the hemisphere-
//! sampling path tracer finds luminaires by hitting emissive geometry and
//! never consults these. They are kept read-only behind a small capability.

use crate::Color;
use glint_math::Vec3;

/// A light source description.
pub trait Light: Send + Sync {
    /// Light color (RGB in [0,1]).
    fn color(&self) -> Color;

    /// Emission scale.
    fn intensity(&self) -> f32;
}

/// A point light radiating equally in all directions.
#[derive(Debug, Clone)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            position,
        }
    }
}

impl Light for PointLight {
    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// A light infinitely far away, shining along a fixed direction.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub direction: Vec3,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32, direction: Vec3) -> Self {
        Self {
            color,
            intensity,
            direction: direction.normalize_or_zero(),
        }
    }
}

impl Light for DirectionalLight {
    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// A cone-shaped light with a soft falloff between the inner and outer cone.
#[derive(Debug, Clone)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub direction: Vec3,
    /// Full-intensity cone half-angle, degrees
    pub inner_angle: f32,
    /// Zero-intensity cone half-angle, degrees
    pub outer_angle: f32,
}

impl SpotLight {
    pub fn new(
        color: Color,
        intensity: f32,
        position: Vec3,
        direction: Vec3,
        inner_angle: f32,
        outer_angle: f32,
    ) -> Self {
        Self {
            color,
            intensity,
            position,
            direction: direction.normalize_or_zero(),
            inner_angle,
            outer_angle: outer_angle.max(inner_angle),
        }
    }
}

impl Light for SpotLight {
    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light_normalizes() {
        let light = DirectionalLight::new(Color::ONE, 2.0, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(light.direction, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(light.intensity(), 2.0);
    }

    #[test]
    fn test_spot_light_outer_at_least_inner() {
        let light = SpotLight::new(Color::ONE, 1.0, Vec3::ZERO, Vec3::NEG_Z, 20.0, 15.0);
        assert_eq!(light.outer_angle, 20.0);
    }
}
