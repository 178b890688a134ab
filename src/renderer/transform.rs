use glam::{Mat4, Quat, Vec3};

/// Placement for a generated buffer. The buffer itself is owned elsewhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl MeshTransform {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Unit scale at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
        }
    }

    /// Model matrix: scale, then translate
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}
