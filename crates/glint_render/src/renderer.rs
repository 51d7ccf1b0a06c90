//! Render loop and image output.
//!
//! Drives the camera and the scene's radiance estimator over every pixel,
//! averages the per-pixel samples, and converts the result to an 8-bit
//! image. The loop is single-threaded by design; callers that want
//! parallelism can split the image themselves and hand each worker its own
//! RNG stream.

use crate::{Camera, Color, Scene};
use rand::RngCore;
use std::path::Path;

/// Render configuration. The bounce limit is scene state, not render
/// configuration, so only sampling lives here.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
        }
    }
}

/// Errors from the image output surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGB with gamma correction.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b]
}

/// Render output, one linear-light color per pixel.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Save the image as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage);
        }

        let rgb = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8())
            .ok_or(RenderError::EmptyImage)?;
        rgb.save(path)?;
        Ok(())
    }
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += scene.trace_ray(ray.origin(), ray.direction(), 0, rng);
    }

    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Render the scene to an image buffer.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    log::info!(
        "rendering {}x{} @ {} spp, {} objects, bounce limit {}",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        scene.object_count(),
        scene.recursion_limit(),
    );

    let progress_rows = (camera.image_height / 10).max(1);
    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config, rng);
            image.set(x, y, color);
        }
        if (y + 1) % progress_rows == 0 {
            log::info!("scanline {}/{}", y + 1, camera.image_height);
        }
    }

    image
}
