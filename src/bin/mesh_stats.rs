//! Generate every mesh and the grass field once and report their sizes.
//!
//! Usage: mesh_stats [config.toml]

use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec3;
use meadow_engine::{
    generate_blade_shape, generate_quad, GeometryConfig, GrassField, SphereGenerator,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GeometryConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => {
            log::info!("No config given, using defaults");
            GeometryConfig::default()
        }
    };

    let start = Instant::now();
    let sphere = SphereGenerator::generate(config.sphere).context("Sphere generation failed")?;
    log::info!(
        "Sphere: {} vertices, {} triangles, {} lines, {} + {} bytes in {:?}",
        sphere.buffer.vertex_count(),
        sphere.buffer.triangle_count(),
        sphere.buffer.line_count(),
        sphere.buffer.vertex_bytes().len(),
        sphere.buffer.index_bytes().len(),
        start.elapsed()
    );

    let quad = generate_quad(Vec3::ZERO)?;
    let blade_shape = generate_blade_shape()?;
    log::info!(
        "Quad: {} vertices, blade shape: {} vertices",
        quad.buffer.vertex_count(),
        blade_shape.buffer.vertex_count()
    );

    let start = Instant::now();
    let mut field = GrassField::generate(config.grass, config.field)
        .context("Grass field generation failed")?;
    log::info!(
        "Grass field: {} blades, {} bytes in {:?}",
        field.len(),
        field.as_bytes().len(),
        start.elapsed()
    );

    let start = Instant::now();
    field.regenerate();
    log::info!("Regenerated grass field in {:?}", start.elapsed());

    Ok(())
}
