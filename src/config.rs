//! Generator configuration
//!
//! Every section and field is optional in the TOML file; anything missing
//! falls back to the values in `constants`.
//!
//! ```toml
//! [sphere]
//! radius = 2.0
//! sector_count = 24
//! stack_count = 12
//! up_axis = "y"
//!
//! [grass]
//! min_height = 1.0
//! max_height = 2.0
//!
//! [field]
//! blade_count = 4096
//! seed = 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryErrorContext, GeometryResult};
use crate::geometry::SphereParameters;
use crate::grass::{GrassFieldSettings, GrassParams};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub sphere: SphereParameters,
    pub grass: GrassParams,
    pub field: GrassFieldSettings,
}

impl GeometryConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> GeometryResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration file
    pub fn load(path: impl AsRef<Path>) -> GeometryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded geometry config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> GeometryResult<String> {
        toml::to_string_pretty(self).geometry_context("serializing geometry config")
    }

    pub fn validate(&self) -> GeometryResult<()> {
        self.sphere.validate()?;
        self.grass.validate()?;
        self.field.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::geometry::UpAxis;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = GeometryConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeometryConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = GeometryConfig::from_toml_str(
            r#"
            [sphere]
            sector_count = 24
            up_axis = "y"

            [field]
            seed = 7
            parallel = false
            "#,
        )
        .unwrap();
        assert_eq!(config.sphere.sector_count, 24);
        assert_eq!(config.sphere.up_axis, UpAxis::Y);
        assert_eq!(config.sphere.stack_count, SphereParameters::default().stack_count);
        assert_eq!(config.field.seed, 7);
        assert!(!config.field.parallel);
        assert_eq!(config.grass, GrassParams::default());
    }

    #[test]
    fn test_unknown_axis_is_a_parse_error() {
        let err = GeometryConfig::from_toml_str("[sphere]\nup_axis = \"w\"\n").unwrap_err();
        assert!(matches!(err, GeometryError::ConfigParse(_)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = GeometryConfig::from_toml_str("[grass]\nmin_width = 0.5\nmax_width = 0.2\n")
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_sectors_is_rejected() {
        let err = GeometryConfig::from_toml_str("[sphere]\nsector_count = 0\n").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument { .. }));
    }

    #[test]
    fn test_serialized_config_reloads() {
        let config = GeometryConfig::default();
        let raw = config.to_toml_string().unwrap();
        assert_eq!(GeometryConfig::from_toml_str(&raw).unwrap(), config);
    }
}
