pub mod blade;
pub mod field;

pub use blade::{blades_as_bytes, BladeDescriptor, BladeGenerator, GrassParams};
pub use field::{GrassField, GrassFieldSettings};
