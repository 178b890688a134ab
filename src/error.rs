//! Geometry subsystem error handling
//!
//! Every generator validates its parameters before touching a buffer, so an
//! error always means no geometry was produced.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    #[error("Mesh needs {vertex_count} vertices but 16-bit indices address at most 65536")]
    IndexOverflow { vertex_count: usize },

    #[error("Index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u16, vertex_count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Create an invalid argument error
pub fn invalid_argument(parameter: &str, reason: impl Into<String>) -> GeometryError {
    GeometryError::InvalidArgument {
        parameter: parameter.to_string(),
        reason: reason.into(),
    }
}

/// Helper trait for attaching context to foreign errors
pub trait GeometryErrorContext<T> {
    fn geometry_context(self, context: &str) -> GeometryResult<T>;
}

impl<T, E> GeometryErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn geometry_context(self, context: &str) -> GeometryResult<T> {
        self.map_err(|e| GeometryError::InvalidConfig(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = invalid_argument("sector_count", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'sector_count': must be greater than zero"
        );
    }

    #[test]
    fn test_context_wraps_display() {
        let result: Result<(), &str> = Err("boom");
        let err = result.geometry_context("loading grass").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidConfig(ref msg) if msg == "loading grass: boom"));
    }
}
