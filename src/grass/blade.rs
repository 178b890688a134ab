use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::constants::grass::{
    GRASS_MAX_DIRECTION_DEGREES, GRASS_MAX_HEIGHT, GRASS_MAX_WIDTH, GRASS_MIN_HEIGHT,
    GRASS_MIN_WIDTH, GRASS_NO_ANGLE, GRASS_STIFFNESS,
};
use crate::constants::world::WORLD_UP;
use crate::error::{GeometryError, GeometryResult};
use crate::random::RandomSource;

/// Per-blade control points and shape, packed as four vec4s for the
/// tessellation stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BladeDescriptor {
    /// xyz: base control point, w: width
    pub p0_and_width: [f32; 4],
    /// xyz: mid control point, w: height
    pub p1_and_height: [f32; 4],
    /// xyz: tip control point, w: facing angle in degrees
    pub p2_and_direction: [f32; 4],
    /// xyz: local up, w: bend stiffness
    pub up_and_stiffness: [f32; 4],
}

fn pack(v: Vec3, w: f32) -> [f32; 4] {
    v.extend(w).to_array()
}

fn xyz(packed: &[f32; 4]) -> Vec3 {
    Vec4::from_array(*packed).truncate()
}

impl BladeDescriptor {
    pub fn p0(&self) -> Vec3 {
        xyz(&self.p0_and_width)
    }

    pub fn width(&self) -> f32 {
        self.p0_and_width[3]
    }

    pub fn p1(&self) -> Vec3 {
        xyz(&self.p1_and_height)
    }

    pub fn height(&self) -> f32 {
        self.p1_and_height[3]
    }

    pub fn p2(&self) -> Vec3 {
        xyz(&self.p2_and_direction)
    }

    pub fn direction(&self) -> f32 {
        self.p2_and_direction[3]
    }

    pub fn up(&self) -> Vec3 {
        xyz(&self.up_and_stiffness)
    }

    pub fn stiffness(&self) -> f32 {
        self.up_and_stiffness[3]
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4
    ];

    /// Per-instance layout, locations 3..=6 so it can sit next to `Vertex::desc()`
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BladeDescriptor>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Contiguous bytes for a per-instance storage or vertex buffer
pub fn blades_as_bytes(blades: &[BladeDescriptor]) -> &[u8] {
    bytemuck::cast_slice(blades)
}

/// Shape ranges for blade generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassParams {
    pub min_height: f32,
    pub max_height: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub stiffness: f32,
}

impl Default for GrassParams {
    fn default() -> Self {
        Self {
            min_height: GRASS_MIN_HEIGHT,
            max_height: GRASS_MAX_HEIGHT,
            min_width: GRASS_MIN_WIDTH,
            max_width: GRASS_MAX_WIDTH,
            stiffness: GRASS_STIFFNESS,
        }
    }
}

impl GrassParams {
    pub fn validate(&self) -> GeometryResult<()> {
        check_range("height", self.min_height, self.max_height)?;
        check_range("width", self.min_width, self.max_width)?;
        if !self.stiffness.is_finite() {
            return Err(GeometryError::InvalidConfig(format!(
                "grass stiffness must be finite, got {}",
                self.stiffness
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, min: f32, max: f32) -> GeometryResult<()> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 {
        return Err(GeometryError::InvalidConfig(format!(
            "grass {} range [{}, {}] must be positive and finite",
            name, min, max
        )));
    }
    if min > max {
        return Err(GeometryError::InvalidConfig(format!(
            "grass min {} {} exceeds max {}",
            name, min, max
        )));
    }
    Ok(())
}

/// Produces blade descriptors from a randomness source
pub struct BladeGenerator<R: RandomSource> {
    params: GrassParams,
    random: R,
}

impl<R: RandomSource> BladeGenerator<R> {
    pub fn new(params: GrassParams, random: R) -> GeometryResult<Self> {
        params.validate()?;
        Ok(Self { params, random })
    }

    /// Skips validation for batch callers that already checked `params`.
    pub(crate) fn from_validated(params: GrassParams, random: R) -> Self {
        Self { params, random }
    }

    pub fn params(&self) -> &GrassParams {
        &self.params
    }

    /// Fresh, unbent blade rooted at `origin`
    pub fn initialise(&mut self, origin: Vec3) -> BladeDescriptor {
        let height = self.draw_height();
        let width = self.draw_width();
        let p1 = origin + WORLD_UP * height;

        BladeDescriptor {
            p0_and_width: pack(origin, width),
            p1_and_height: pack(p1, height),
            p2_and_direction: pack(p1, GRASS_NO_ANGLE),
            up_and_stiffness: pack(WORLD_UP, self.params.stiffness),
        }
    }

    /// Re-draw height, width and facing in place. The base point never moves.
    pub fn update_packed_vec4s(&mut self, blade: &mut BladeDescriptor) {
        let p0 = blade.p0();
        let height = self.draw_height();
        let width = self.draw_width();
        let direction = self.random.uniform(0.0, GRASS_MAX_DIRECTION_DEGREES);
        let p1 = p0 + WORLD_UP * height;

        blade.p0_and_width = pack(p0, width);
        blade.p1_and_height = pack(p1, height);
        blade.p2_and_direction = pack(p1, direction);
        blade.up_and_stiffness = pack(WORLD_UP, self.params.stiffness);
    }

    fn draw_height(&mut self) -> f32 {
        self.random
            .uniform_inclusive(self.params.min_height, self.params.max_height)
    }

    fn draw_width(&mut self) -> f32 {
        self.random
            .uniform_inclusive(self.params.min_width, self.params.max_width)
    }
}
