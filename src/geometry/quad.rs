use glam::{Vec2, Vec3, Vec4};

use crate::constants::world::{BLUE, GREEN, RED, WHITE};
use crate::error::GeometryResult;
use crate::renderer::{GeometryBuffer, MeshTransform};

/// Unit square in the XY plane at z = 0, counter-clockwise from bottom-left
const QUAD_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// A generated quad and where it should be drawn
#[derive(Debug, Clone)]
pub struct QuadMesh {
    pub buffer: GeometryBuffer,
    pub transform: MeshTransform,
}

fn build_quad(tex_coords: [Vec2; 4], colors: [[f32; 4]; 4], position: Vec3) -> GeometryResult<QuadMesh> {
    let mut buffer = GeometryBuffer::with_capacity(4, QUAD_INDICES.len(), 0);
    for ((corner, tex_coord), color) in QUAD_CORNERS.iter().zip(tex_coords).zip(colors) {
        buffer.add_vertex(*corner, tex_coord, Vec4::from_array(color))?;
    }
    for triangle in QUAD_INDICES.chunks_exact(3) {
        buffer.add_triangle(triangle[0], triangle[1], triangle[2])?;
    }
    Ok(QuadMesh {
        buffer,
        transform: MeshTransform::from_position(position),
    })
}

/// Screen/world quad, uniformly white, placed at `position`.
///
/// Texture coordinates follow the image convention (v grows downward, u
/// mirrored) so a sampled texture reads upright.
pub fn generate_quad(position: Vec3) -> GeometryResult<QuadMesh> {
    build_quad(
        [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ],
        [WHITE; 4],
        position,
    )
}

/// Pre-tessellation blade footprint at the origin. Corners are colored red,
/// green, blue and white so their order is visible when debugging.
pub fn generate_blade_shape() -> GeometryResult<QuadMesh> {
    build_quad(
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        [RED, GREEN, BLUE, WHITE],
        Vec3::ZERO,
    )
}
