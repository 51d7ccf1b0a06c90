//! Glint - offline CPU path tracing
//!
//! A Monte Carlo renderer: rays are fired from a camera into a scene of
//! geometric objects and bounced recursively off diffuse surfaces until they
//! escape, hit a luminaire, or exhaust the scene's recursion limit.
//!
//! The scene intersection test is an exhaustive scan over all objects, with
//! no acceleration structure. That is a deliberate trade-off for this
//! renderer's scene sizes, not an oversight.

mod ray;
mod object;
mod material;
mod sampling;
mod scene;
mod sphere;
mod cuboid;
mod triangle;
mod light;
mod camera;
mod renderer;

pub use ray::Ray;
pub use object::{HitInfo, Object};
pub use material::{Color, ConstMaterial, Material};
pub use sampling::{cosine_hemisphere, Onb};
pub use scene::{PathEvent, Scene, DEFAULT_RECURSION_LIMIT};
pub use sphere::Sphere;
pub use cuboid::Cuboid;
pub use triangle::{Mesh, MeshInstance, Triangle};
pub use light::{DirectionalLight, Light, PointLight, SpotLight};
pub use camera::Camera;
pub use renderer::{color_to_rgb8, render, render_pixel, ImageBuffer, RenderConfig, RenderError};

/// Re-export common math types from glint_math
pub use glint_math::{Mat4, Mat4Ext, Vec3};
