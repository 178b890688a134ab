mod mesh;
mod transform;
mod vertex;

pub use mesh::GeometryBuffer;
pub use transform::MeshTransform;
pub use vertex::Vertex;
