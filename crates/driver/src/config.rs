use std::path::Path;

use serde::{Deserialize, Serialize};
use tilefield_common::ConfigError;
use tilefield_input::InputConfig;
use tilefield_layout::{ColumnSpeed, ImageCatalog, LayoutConfig, SizingMode};

use crate::DriverError;

/// Number of placeholder images in the default catalog.
const DEFAULT_CATALOG_LEN: usize = 22;

/// Everything needed to build a [`crate::FrameDriver`] besides the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub input: InputConfig,
    pub layout: LayoutConfig,
    /// Image identifiers, cycled over the grid. Rejected at parse time if empty.
    pub catalog: ImageCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            layout: LayoutConfig::default(),
            catalog: ImageCatalog::placeholders("images", DEFAULT_CATALOG_LEN),
        }
    }
}

impl EngineConfig {
    /// Gallery preset: fixed 3x3 cells, at least ten rows, parallax columns,
    /// and a smoothed rendered offset.
    pub fn gallery() -> Self {
        Self {
            input: InputConfig {
                smoothing: Some(0.1),
                ..InputConfig::default()
            },
            layout: LayoutConfig {
                sizing: SizingMode::Fixed {
                    cell_width: 3.0,
                    cell_height: 3.0,
                    gap_x: 0.1,
                    gap_y: 0.1,
                },
                column_speed: ColumnSpeed::Alternating { even: 1.0, odd: 2.0 },
                min_rows: 10,
                ..LayoutConfig::default()
            },
            ..Self::default()
        }
    }

    /// Responsive preset: cells stretch to show four columns by three rows.
    pub fn responsive() -> Self {
        Self {
            layout: LayoutConfig {
                sizing: SizingMode::Responsive {
                    visible_cols: 4,
                    visible_rows: 3,
                    gap_x: 0.1,
                    gap_y: 0.1,
                },
                ..LayoutConfig::default()
            },
            ..Self::default()
        }
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "gallery" => Some(Self::gallery()),
            "responsive" => Some(Self::responsive()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.input.validate()?;
        self.layout.validate()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, DriverError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, DriverError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn presets_are_valid() {
        for name in ["default", "gallery", "responsive"] {
            let config = EngineConfig::preset(name).unwrap();
            assert!(config.validate().is_ok(), "{name} preset invalid");
        }
        assert!(EngineConfig::preset("nope").is_none());
    }

    #[test]
    fn yaml_round_trip_preserves_preset() {
        let config = EngineConfig::gallery();
        let yaml = config.to_yaml().unwrap();
        let back = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let yaml = r#"
input:
  sensitivity: 0.5
  smoothing: 0.1
layout:
  sizing:
    mode: responsive
    visible_cols: 4
    visible_rows: 3
    gap_x: 0.1
    gap_y: 0.1
  column_speed:
    kind: uniform
  min_rows: 6
catalog:
  - a.jpg
  - b.jpg
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.input.sensitivity, 0.5);
        assert_eq!(config.input.decay, 0.95);
        assert_eq!(config.input.smoothing, Some(0.1));
        assert_eq!(config.layout.column_speed, ColumnSpeed::Uniform);
        assert_eq!(config.layout.scroll_speed_scale, 1.0);
        assert_eq!(config.layout.min_rows, 6);
        assert_eq!(config.catalog.len(), 2);
    }

    #[test]
    fn empty_catalog_rejected_at_parse_time() {
        let err = EngineConfig::from_yaml_str("catalog: []\n").unwrap_err();
        assert!(matches!(err, DriverError::Yaml(_)));
        assert!(err.to_string().contains("image catalog is empty"));
    }

    #[test]
    fn invalid_layout_is_a_config_error() {
        let yaml = "layout:\n  scroll_speed_scale: -1.0\n";
        let err = EngineConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Config(ConfigError::InvalidParameter {
                name: "scroll_speed_scale",
                ..
            })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "layout:\n  min_cols: 9\n").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.layout.min_cols, 9);
        assert_eq!(config.catalog.len(), 22);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, DriverError::Io(_)));
    }
}
