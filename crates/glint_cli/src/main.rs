//! Renders the reference room scene and saves it as a PNG.
//!
//! The scene is a small closed room holding two metalish spheres and a
//! rotated gold box, lit by an emissive ceiling panel. Output path can be
//! given as the first argument; defaults to `render.png`.

use anyhow::{Context, Result};
use glint_math::{Mat4, Vec3};
use glint_render::{
    render, Camera, Color, ConstMaterial, Cuboid, PointLight, RenderConfig, Scene, Sphere,
    SpotLight,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "render.png".to_string());

    let scene = build_scene();
    log::info!(
        "scene ready: {} objects, {} lights",
        scene.object_count(),
        scene.light_count()
    );

    let mut camera = Camera::new()
        .with_resolution(960, 540)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_vfov(60.0);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 64,
    };

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let image = render(&camera, &scene, &config, &mut rng);
    log::info!("rendered in {:.1?}", start.elapsed());

    image
        .save_png(&output)
        .with_context(|| format!("saving {output}"))?;
    log::info!("saved {output}");

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    // Materials
    let red = Arc::new(ConstMaterial::diffuse(Color::new(1.0, 0.0, 0.0)));
    let blue = Arc::new(ConstMaterial::diffuse(Color::new(0.0, 0.0, 1.0)));
    let white = Arc::new(ConstMaterial::diffuse(Color::ONE));
    let gold = Arc::new(
        ConstMaterial::diffuse(Color::new(1.0, 0.766, 0.336)).with_reflectiveness(0.2),
    );
    let silver = Arc::new(
        ConstMaterial::diffuse(Color::new(0.972, 0.960, 0.915)).with_reflectiveness(0.1),
    );
    let copper = Arc::new(
        ConstMaterial::diffuse(Color::new(0.955, 0.637, 0.538)).with_reflectiveness(0.1),
    );
    let panel = Arc::new(ConstMaterial::emissive(Color::ONE, 10.0));

    // Two spheres in the room
    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(-1.0, -0.2, -4.5),
        0.2,
        silver,
    )));
    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(1.0, -0.2, -4.5),
        0.2,
        copper,
    )));

    // Rotated box between them
    let cube_transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.5))
        * Mat4::from_rotation_x(15f32.to_radians())
        * Mat4::from_rotation_y(45f32.to_radians());
    scene.add_object(Arc::new(Cuboid::new(
        cube_transform,
        Vec3::new(0.5, 0.5, 0.5),
        gold,
    )));

    // The room: floor, ceiling, back wall, side walls, front wall
    let slab = Vec3::new(3.0, 0.1, 5.4);
    let wall = Vec3::new(3.0, 0.1, 1.5);

    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(0.0, -0.55, -2.3)),
        slab,
        white.clone(),
    )));
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(0.0, 0.75, -2.3)),
        slab,
        white.clone(),
    )));
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(0.0, 0.2, -5.0))
            * Mat4::from_rotation_x(90f32.to_radians()),
        wall,
        white.clone(),
    )));
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(-1.25, 0.2, -2.3))
            * Mat4::from_rotation_z(90f32.to_radians()),
        slab,
        blue,
    )));
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(1.25, 0.2, -2.3))
            * Mat4::from_rotation_z(90f32.to_radians()),
        slab,
        red,
    )));
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(0.0, 0.2, 0.5))
            * Mat4::from_rotation_x(90f32.to_radians()),
        wall,
        white,
    )));

    // Emissive ceiling panel - the luminaire paths actually terminate on
    scene.add_object(Arc::new(Cuboid::new(
        Mat4::from_translation(Vec3::new(0.0, 0.69, -4.0)),
        Vec3::new(1.2, 0.02, 1.2),
        panel,
    )));

    // Analytic lights: stored for direct-lighting extensions
    scene.add_light(Arc::new(PointLight::new(
        Color::ONE,
        10.0,
        Vec3::new(0.0, 0.6, 0.0),
    )));
    scene.add_light(Arc::new(PointLight::new(
        Color::ONE,
        10.0,
        Vec3::new(0.0, 0.6, -4.0),
    )));
    scene.add_light(Arc::new(SpotLight::new(
        Color::ONE,
        15.0,
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, -1.0),
        15.0,
        20.0,
    )));

    scene
}
