//! Flat-shaded UV sphere
//!
//! Vertices are laid out on a stack/sector grid, then every face is emitted
//! with its own copies of the grid corners so each triangle can be shaded
//! with its own normal. Nothing is shared between cells and no smoothing
//! pass exists.

use std::f32::consts::PI;

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::constants::limits::MAX_VERTICES;
use crate::constants::sphere::{DEFAULT_RADIUS, DEFAULT_SECTOR_COUNT, DEFAULT_STACK_COUNT};
use crate::error::{invalid_argument, GeometryError, GeometryResult};
use crate::geometry::axis::{remap_buffer, remap_point, UpAxis};
use crate::geometry::normals::compute_face_normal;
use crate::renderer::GeometryBuffer;

/// Axis the grid pass puts the poles on
pub const NATIVE_UP_AXIS: UpAxis = UpAxis::Z;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParameters {
    pub radius: f32,
    pub sector_count: u32,
    pub stack_count: u32,
    pub up_axis: UpAxis,
}

impl Default for SphereParameters {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            sector_count: DEFAULT_SECTOR_COUNT,
            stack_count: DEFAULT_STACK_COUNT,
            up_axis: NATIVE_UP_AXIS,
        }
    }
}

impl SphereParameters {
    pub fn new(radius: f32, sector_count: u32, stack_count: u32, up_axis: UpAxis) -> Self {
        Self {
            radius,
            sector_count,
            stack_count,
            up_axis,
        }
    }

    /// Reject parameters that would divide by zero or overflow 16-bit indices
    pub fn validate(&self) -> GeometryResult<()> {
        if self.sector_count == 0 {
            return Err(invalid_argument("sector_count", "must be greater than zero"));
        }
        if self.stack_count == 0 {
            return Err(invalid_argument("stack_count", "must be greater than zero"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(invalid_argument(
                "radius",
                format!("must be a positive finite number, got {}", self.radius),
            ));
        }
        let vertex_count = self.expected_vertex_count();
        if vertex_count > MAX_VERTICES {
            return Err(GeometryError::IndexOverflow { vertex_count });
        }
        if self.sector_count < 3 || self.stack_count < 2 {
            log::warn!(
                "Sphere with {} sectors and {} stacks will be degenerate",
                self.sector_count,
                self.stack_count
            );
        }
        Ok(())
    }

    /// Top cap and bottom cap emit 3 vertices per sector, interior bands 4.
    ///
    /// Saturates at `usize::MAX` for counts no buffer could hold.
    pub fn expected_vertex_count(&self) -> usize {
        per_cell_layout(self.sector_count, self.stack_count, 3, 4)
    }

    pub fn expected_triangle_count(&self) -> usize {
        per_cell_layout(self.sector_count, self.stack_count, 1, 2)
    }

    /// Two segments per cell
    pub fn expected_line_index_count(&self) -> usize {
        (self.sector_count as usize)
            .saturating_mul(self.stack_count as usize)
            .saturating_mul(4)
    }
}

/// `per_cap` items for each cap cell plus `per_band` for each interior cell
fn per_cell_layout(sector_count: u32, stack_count: u32, per_cap: usize, per_band: usize) -> usize {
    let sectors = sector_count as usize;
    match stack_count as usize {
        0 => 0,
        1 => sectors.saturating_mul(per_cap),
        stacks => sectors
            .saturating_mul(2 * per_cap)
            .saturating_add(sectors.saturating_mul(per_band).saturating_mul(stacks - 2)),
    }
}

/// Output of one sphere generation
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub buffer: GeometryBuffer,
    /// One flat normal per triangle, in triangle order
    pub face_normals: Vec<Vec3>,
    pub params: SphereParameters,
}

#[derive(Debug, Clone, Copy)]
struct GridPoint {
    position: Vec3,
    tex_coord: Vec2,
}

pub struct SphereGenerator {
    params: SphereParameters,
    grid: Vec<GridPoint>,
}

impl SphereGenerator {
    /// Build a sphere. Either the whole mesh is returned or an error and
    /// nothing else.
    pub fn generate(params: SphereParameters) -> GeometryResult<SphereMesh> {
        params.validate()?;

        let generator = Self {
            grid: Self::build_grid(&params),
            params,
        };
        let mut mesh = generator.emit_faces()?;

        if params.up_axis != NATIVE_UP_AXIS {
            remap_buffer(&mut mesh.buffer, NATIVE_UP_AXIS, params.up_axis);
            for normal in &mut mesh.face_normals {
                *normal = remap_point(NATIVE_UP_AXIS, params.up_axis, *normal);
            }
        }

        mesh.buffer.set_all_colors(Vec4::ONE);

        log::debug!(
            "Generated sphere r={} sectors={} stacks={} up={}: {} vertices, {} triangles, {} lines",
            params.radius,
            params.sector_count,
            params.stack_count,
            params.up_axis,
            mesh.buffer.vertex_count(),
            mesh.buffer.triangle_count(),
            mesh.buffer.line_count()
        );

        Ok(mesh)
    }

    /// (stacks + 1) x (sectors + 1) points, north pole row first
    fn build_grid(params: &SphereParameters) -> Vec<GridPoint> {
        let sectors = params.sector_count;
        let stacks = params.stack_count;
        let sector_step = 2.0 * PI / sectors as f32;
        let stack_step = PI / stacks as f32;

        let mut grid = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
        for i in 0..=stacks {
            let stack_angle = PI / 2.0 - i as f32 * stack_step;
            let xy = params.radius * stack_angle.cos();
            let z = params.radius * stack_angle.sin();

            for j in 0..=sectors {
                let sector_angle = j as f32 * sector_step;
                grid.push(GridPoint {
                    position: Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z),
                    tex_coord: Vec2::new(j as f32 / sectors as f32, i as f32 / stacks as f32),
                });
            }
        }
        grid
    }

    fn grid_point(&self, stack: u32, sector: u32) -> GridPoint {
        self.grid[(stack * (self.params.sector_count + 1) + sector) as usize]
    }

    fn emit_faces(&self) -> GeometryResult<SphereMesh> {
        let params = self.params;
        let mut buffer = GeometryBuffer::with_capacity(
            params.expected_vertex_count(),
            params.expected_triangle_count() * 3,
            params.expected_line_index_count(),
        );
        let mut face_normals = Vec::with_capacity(params.expected_triangle_count());

        for i in 0..params.stack_count {
            for j in 0..params.sector_count {
                let v1 = self.grid_point(i, j);
                let v2 = self.grid_point(i + 1, j);
                let v3 = self.grid_point(i, j + 1);
                let v4 = self.grid_point(i + 1, j + 1);

                if i == 0 {
                    // the whole top row is the pole, one triangle per sector
                    let base = push_corners(&mut buffer, &[v1, v2, v4])?;
                    buffer.add_triangle(base, base + 1, base + 2)?;
                    face_normals.push(compute_face_normal(v1.position, v2.position, v4.position));
                    buffer.add_line(base, base + 1)?;
                    buffer.add_line(base + 1, base + 2)?;
                } else if i == params.stack_count - 1 {
                    let base = push_corners(&mut buffer, &[v1, v2, v3])?;
                    buffer.add_triangle(base, base + 1, base + 2)?;
                    face_normals.push(compute_face_normal(v1.position, v2.position, v3.position));
                    buffer.add_line(base, base + 1)?;
                    buffer.add_line(base, base + 2)?;
                } else {
                    let base = push_corners(&mut buffer, &[v1, v2, v3, v4])?;
                    buffer.add_triangle(base, base + 1, base + 2)?;
                    face_normals.push(compute_face_normal(v1.position, v2.position, v3.position));
                    buffer.add_triangle(base + 2, base + 1, base + 3)?;
                    face_normals.push(compute_face_normal(v3.position, v2.position, v4.position));
                    buffer.add_line(base, base + 1)?;
                    buffer.add_line(base, base + 2)?;
                }
            }
        }

        Ok(SphereMesh {
            buffer,
            face_normals,
            params,
        })
    }
}

/// Append fresh copies of `corners`, returning the index of the first.
fn push_corners(buffer: &mut GeometryBuffer, corners: &[GridPoint]) -> GeometryResult<u16> {
    let base = buffer.vertex_count() as u16;
    for corner in corners {
        buffer.add_vertex(corner.position, corner.tex_coord, Vec4::ONE)?;
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(sectors: u32, stacks: u32) -> SphereMesh {
        SphereGenerator::generate(SphereParameters::new(1.0, sectors, stacks, UpAxis::Z)).unwrap()
    }

    #[test]
    fn test_counts_follow_cap_and_band_layout() {
        for (sectors, stacks) in [(3, 2), (8, 4), (36, 18), (5, 3)] {
            let mesh = sphere(sectors, stacks);
            let c = sectors as usize;
            let s = stacks as usize;
            assert_eq!(mesh.buffer.vertex_count(), 3 * c + 3 * c + 4 * c * (s - 2));
            assert_eq!(mesh.buffer.triangle_count(), c + c + 2 * c * (s - 2));
            assert_eq!(mesh.face_normals.len(), mesh.buffer.triangle_count());
            assert_eq!(mesh.buffer.line_indices.len(), mesh.params.expected_line_index_count());
            assert!(mesh.buffer.validate().is_ok());
        }
    }

    #[test]
    fn test_top_cap_starts_at_north_pole() {
        let mesh = sphere(8, 4);
        let first = mesh.buffer.vertices[0];
        assert!((first.position() - Vec3::Z).length() < 1e-6);
        assert_eq!(first.tex_coord(), Vec2::ZERO);
    }

    #[test]
    fn test_all_positions_on_radius() {
        let mesh = SphereGenerator::generate(SphereParameters::new(2.5, 12, 6, UpAxis::Z)).unwrap();
        for vertex in &mesh.buffer.vertices {
            assert!((vertex.position().length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = sphere(16, 8);
        for (t, normal) in mesh.face_normals.iter().enumerate() {
            let i0 = mesh.buffer.indices[t * 3] as usize;
            let i1 = mesh.buffer.indices[t * 3 + 1] as usize;
            let i2 = mesh.buffer.indices[t * 3 + 2] as usize;
            let centroid = (mesh.buffer.vertices[i0].position()
                + mesh.buffer.vertices[i1].position()
                + mesh.buffer.vertices[i2].position())
                / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {} faces inward", t);
        }
    }

    #[test]
    fn test_zero_counts_are_rejected() {
        for (sectors, stacks) in [(0, 4), (4, 0), (0, 0)] {
            let err = SphereGenerator::generate(SphereParameters::new(1.0, sectors, stacks, UpAxis::Z))
                .unwrap_err();
            assert!(matches!(err, GeometryError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_bad_radius_is_rejected() {
        for radius in [0.0, -1.0, f32::NAN] {
            let err = SphereGenerator::generate(SphereParameters::new(radius, 8, 4, UpAxis::Z))
                .unwrap_err();
            assert!(matches!(err, GeometryError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_too_many_vertices_is_rejected_up_front() {
        let params = SphereParameters::new(1.0, 512, 512, UpAxis::Z);
        assert!(params.expected_vertex_count() > MAX_VERTICES);
        let err = SphereGenerator::generate(params).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOverflow { .. }));
    }

    #[test]
    fn test_huge_counts_report_overflow() {
        for (sectors, stacks) in [(u32::MAX, u32::MAX), (u32::MAX, 1), (1, u32::MAX), (u32::MAX, 3)] {
            let params = SphereParameters::new(1.0, sectors, stacks, UpAxis::Z);
            assert!(params.expected_vertex_count() > MAX_VERTICES);
            assert!(params.expected_line_index_count() > MAX_VERTICES);
            match params.validate() {
                Err(GeometryError::IndexOverflow { vertex_count }) => {
                    assert_eq!(vertex_count, params.expected_vertex_count());
                }
                other => panic!("expected IndexOverflow for {}x{}, got {:?}", sectors, stacks, other),
            }
        }
    }

    #[test]
    fn test_wireframe_segments_per_cell() {
        let (sectors, stacks) = (6u32, 4u32);
        let mesh = sphere(sectors, stacks);
        let lines = &mesh.buffer.line_indices;
        let z = |index: u16| mesh.buffer.vertices[index as usize].position().z;

        let mut base = 0u16;
        let mut cursor = 0usize;
        for stack in 0..stacks {
            for sector in 0..sectors {
                let (expected, corners) = if stack == 0 {
                    // meridian v1-v2, ring v2-v4
                    ([base, base + 1, base + 1, base + 2], 3)
                } else if stack == stacks - 1 {
                    // meridian v1-v2, ring v1-v3
                    ([base, base + 1, base, base + 2], 3)
                } else {
                    ([base, base + 1, base, base + 2], 4)
                };
                assert_eq!(
                    &lines[cursor..cursor + 4],
                    &expected,
                    "stack {} sector {}",
                    stack,
                    sector
                );

                // meridian segments change latitude, ring segments keep it
                assert!((z(expected[0]) - z(expected[1])).abs() > 1e-3);
                assert!((z(expected[2]) - z(expected[3])).abs() < 1e-6);

                base += corners;
                cursor += 4;
            }
        }
        assert_eq!(cursor, lines.len());
    }

    #[test]
    fn test_up_axis_moves_poles() {
        let mesh = SphereGenerator::generate(SphereParameters::new(1.0, 8, 4, UpAxis::Y)).unwrap();
        assert!((mesh.buffer.vertices[0].position() - Vec3::Y).length() < 1e-6);
        let mesh = SphereGenerator::generate(SphereParameters::new(1.0, 8, 4, UpAxis::X)).unwrap();
        assert!((mesh.buffer.vertices[0].position() - Vec3::X).length() < 1e-6);
    }
}
