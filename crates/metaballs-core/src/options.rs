//! Configuration options for metaball surfaces.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::GridSpec;
use crate::kernel::KernelKind;

/// Parameters for one metaball pipeline.
///
/// Missing fields fall back to [`Options::default`] when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Surface threshold; only meaningful inside the field's value range.
    pub isolevel: f32,

    /// Base source radius (expected > 0).
    pub radius: f32,

    /// Center of the sampling grid.
    pub origin: Vec3,

    /// Half-extent of the sampling grid along every axis.
    pub half_extent: f32,

    /// Samples per grid axis.
    pub resolution: u32,

    /// Whether sources follow their orbit paths over time.
    pub animate: bool,

    /// Falloff kernel used for every source.
    pub kernel: KernelKind,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            isolevel: 0.5,
            radius: 1.0,
            origin: Vec3::ZERO,
            half_extent: 5.0,
            resolution: 30,
            animate: false,
            kernel: KernelKind::GaussianShell,
        }
    }
}

impl Options {
    /// Builds the sampling grid described by these options.
    pub fn grid_spec(&self) -> Result<GridSpec> {
        GridSpec::new(self.origin, self.half_extent, self.resolution)
    }

    /// Checks that the grid parameters are usable.
    pub fn validate(&self) -> Result<()> {
        self.grid_spec().map(|_| ())
    }

    /// Parses and validates options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetaballError;

    #[test]
    fn test_defaults_are_valid() {
        let options = Options::default();
        assert!(options.validate().is_ok());
        let spec = options.grid_spec().unwrap();
        assert_eq!(spec.resolution(), 30);
        assert_eq!(spec.bound_min(), Vec3::splat(-5.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = Options::from_json_str(r#"{ "isolevel": 0.25, "kernel": "LinearShell" }"#)
            .unwrap();
        assert_eq!(options.isolevel, 0.25);
        assert_eq!(options.kernel, KernelKind::LinearShell);
        assert_eq!(options.resolution, 30);
        assert_eq!(options.radius, 1.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let options = Options {
            origin: Vec3::new(1.0, 2.0, 3.0),
            animate: true,
            ..Options::default()
        };
        let json = options.to_json().unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(matches!(
            Options::from_json_str(r#"{ "resolution": 1 }"#),
            Err(MetaballError::InvalidResolution(1))
        ));
        assert!(matches!(
            Options::from_json_str(r#"{ "half_extent": 0.0 }"#),
            Err(MetaballError::InvalidExtent(_))
        ));
        assert!(matches!(
            Options::from_json_str("{ not json"),
            Err(MetaballError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Options::load("/nonexistent/metaballs/options.json");
        assert!(matches!(result, Err(MetaballError::IoError(_))));
    }
}
