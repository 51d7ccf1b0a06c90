//! Material capability for surface shading.

use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Read-only surface description consumed by the path tracer.
///
/// The tracer only ever reads three things from a material: its diffuse
/// reflectance, whether it emits light, and whether intersection tests should
/// be able to see through it.
pub trait Material: Send + Sync {
    /// Diffuse reflectance (RGB in [0,1]).
    fn albedo(&self) -> Color;

    /// Emission scale. Anything greater than zero marks this surface as a
    /// luminaire and terminates paths that hit it.
    fn emissive_strength(&self) -> f32;

    /// Whether the surface is transparent. Transparent surfaces can be
    /// excluded from intersection queries; most materials are opaque.
    fn is_transparent(&self) -> bool {
        false
    }
}

/// A material with constant parameters over the whole surface.
#[derive(Debug, Clone)]
pub struct ConstMaterial {
    pub albedo: Color,
    pub emissive_strength: f32,
    /// Specular share of the surface response. Stored for completeness;
    /// the diffuse path tracer does not consume it.
    pub reflectiveness: f32,
    pub transparent: bool,
}

impl ConstMaterial {
    /// Create an opaque, non-emissive diffuse material.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            albedo,
            emissive_strength: 0.0,
            reflectiveness: 0.0,
            transparent: false,
        }
    }

    /// Create a luminaire with the given emission scale.
    pub fn emissive(albedo: Color, emissive_strength: f32) -> Self {
        Self {
            albedo,
            emissive_strength,
            reflectiveness: 0.0,
            transparent: false,
        }
    }

    /// Set the specular share.
    pub fn with_reflectiveness(mut self, reflectiveness: f32) -> Self {
        self.reflectiveness = reflectiveness;
        self
    }

    /// Mark the material transparent.
    pub fn with_transparency(mut self) -> Self {
        self.transparent = true;
        self
    }
}

impl Default for ConstMaterial {
    fn default() -> Self {
        Self::diffuse(Color::new(0.5, 0.5, 0.5))
    }
}

impl Material for ConstMaterial {
    fn albedo(&self) -> Color {
        self.albedo
    }

    fn emissive_strength(&self) -> f32 {
        self.emissive_strength
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }
}
