use glam::{Vec2, Vec3, Vec4};

use crate::constants::limits::MAX_VERTICES;
use crate::error::{GeometryError, GeometryResult};
use crate::renderer::vertex::Vertex;

/// Append-only vertex/index storage filled by one generation pass.
///
/// Triangle indices are read in triples and line indices in pairs, both in
/// insertion order. Every stored index is `< vertices.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub line_indices: Vec<u16>,
}

impl GeometryBuffer {
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;

    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            line_indices: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, indices: usize, line_indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            line_indices: Vec::with_capacity(line_indices),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Vec3, tex_coord: Vec2, color: Vec4) -> GeometryResult<u16> {
        let index = self.vertices.len();
        if index >= MAX_VERTICES {
            return Err(GeometryError::IndexOverflow {
                vertex_count: index + 1,
            });
        }
        self.vertices.push(Vertex::new(position, tex_coord, color));
        Ok(index as u16)
    }

    /// Append one triangle. The order of the three indices is the winding.
    pub fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) -> GeometryResult<()> {
        for index in [i0, i1, i2] {
            self.check_index(index)?;
        }
        self.indices.extend_from_slice(&[i0, i1, i2]);
        Ok(())
    }

    /// Append a single wireframe index; consumers pair them up.
    pub fn add_line_index(&mut self, index: u16) -> GeometryResult<()> {
        self.check_index(index)?;
        self.line_indices.push(index);
        Ok(())
    }

    /// Append both ends of one wireframe segment
    pub fn add_line(&mut self, from: u16, to: u16) -> GeometryResult<()> {
        self.add_line_index(from)?;
        self.add_line_index(to)
    }

    fn check_index(&self, index: u16) -> GeometryResult<()> {
        if (index as usize) < self.vertices.len() {
            Ok(())
        } else {
            Err(GeometryError::IndexOutOfBounds {
                index,
                vertex_count: self.vertices.len(),
            })
        }
    }

    /// Re-check the index invariant over the whole buffer
    pub fn validate(&self) -> GeometryResult<()> {
        self.indices
            .iter()
            .chain(self.line_indices.iter())
            .try_for_each(|&index| self.check_index(index))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.line_indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.line_indices.clear();
    }

    /// Overwrite the color of every vertex
    pub fn set_all_colors(&mut self, color: Vec4) {
        let color = color.to_array();
        for vertex in &mut self.vertices {
            vertex.color = color;
        }
    }

    /// Apply `f` to every vertex position
    pub fn transform_positions(&mut self, mut f: impl FnMut(Vec3) -> Vec3) {
        for vertex in &mut self.vertices {
            vertex.position = f(vertex.position()).to_array();
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn line_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.line_indices)
    }
}
