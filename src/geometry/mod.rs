//! Procedural mesh generation
//!
//! Sphere, quad and blade-footprint generators that fill `GeometryBuffer`s
//! for upload by the rendering backend. All of them are synchronous and
//! keep no state between calls.

pub mod axis;
pub mod normals;
pub mod quad;
pub mod sphere;

pub use axis::{axis_remap_matrix, remap_buffer, remap_point, UpAxis};
pub use normals::compute_face_normal;
pub use quad::{generate_blade_shape, generate_quad, QuadMesh};
pub use sphere::{SphereGenerator, SphereMesh, SphereParameters, NATIVE_UP_AXIS};
