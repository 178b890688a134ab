//! Procedural geometry for a real-time renderer.
//!
//! Generates flat-shaded UV spheres, screen quads, the grass blade footprint
//! and per-blade descriptors for GPU tessellation. Output is plain in-memory
//! buffers; uploading and drawing them is the rendering backend's job.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod grass;
pub mod random;
pub mod renderer;

pub use config::GeometryConfig;
pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    compute_face_normal, generate_blade_shape, generate_quad, QuadMesh, SphereGenerator,
    SphereMesh, SphereParameters, UpAxis,
};
pub use grass::{BladeDescriptor, BladeGenerator, GrassField, GrassFieldSettings, GrassParams};
pub use random::{RandomSource, SeededRandom, SharedRandom};
pub use renderer::{GeometryBuffer, MeshTransform, Vertex};
