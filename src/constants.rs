// Meadow Engine Constants - SINGLE SOURCE OF TRUTH
//
// Every numeric constant used by the generators lives here. Shaders that
// consume blade descriptors must agree with the values in `grass`.

/// World coordinate convention
pub mod world {
    use glam::Vec3;

    /// The world's vertical axis is +Z.
    pub const WORLD_UP: Vec3 = Vec3::Z;

    /// Opaque white, the default vertex color
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
}

/// Grass blade shape parameters (world units, degrees)
pub mod grass {
    pub const GRASS_MIN_HEIGHT: f32 = 1.3;
    pub const GRASS_MAX_HEIGHT: f32 = 2.5;
    pub const GRASS_MIN_WIDTH: f32 = 0.1;
    pub const GRASS_MAX_WIDTH: f32 = 0.14;

    /// Bend-stiffness coefficient written into every descriptor
    pub const GRASS_STIFFNESS: f32 = 1.0;

    /// Direction sentinel for a freshly initialised, unbent blade
    pub const GRASS_NO_ANGLE: f32 = -1.0;

    /// Facing angles are drawn from [0, GRASS_MAX_DIRECTION_DEGREES)
    pub const GRASS_MAX_DIRECTION_DEGREES: f32 = 360.0;

    /// Defaults for batch field generation
    pub const DEFAULT_BLADE_COUNT: u32 = 1 << 13;
    pub const DEFAULT_FIELD_EXTENT: f32 = 50.0;
    pub const DEFAULT_FIELD_SEED: u64 = 0x6d65_6164_6f77;
}

/// Sphere tessellation defaults
pub mod sphere {
    pub const DEFAULT_RADIUS: f32 = 1.0;
    pub const DEFAULT_SECTOR_COUNT: u32 = 36;
    pub const DEFAULT_STACK_COUNT: u32 = 18;

    /// Cross products shorter than this are treated as degenerate faces
    pub const FACE_NORMAL_EPSILON: f32 = 1e-6;
}

/// Buffer limits
pub mod limits {
    /// Indices are 16-bit, so a buffer addresses at most this many vertices.
    pub const MAX_VERTICES: usize = u16::MAX as usize + 1;
}
