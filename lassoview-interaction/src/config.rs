//! Lasso tool configuration.

use crate::overlay::OverlayStyle;
use lassoview_core::{Error, Result};
use lassoview_selection::SelectionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Everything tunable about the lasso tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Selection engine settings.
    pub selection: SelectionConfig,

    /// Pointer moves closer than this many pixels to the last point are dropped.
    pub min_point_spacing: f32,

    /// How long a resolved outline stays on screen.
    pub clear_delay_ms: u64,

    /// Maximum number of live debug markers.
    pub marker_capacity: usize,

    /// Place markers at selected objects and faces.
    pub debug_markers: bool,

    /// Outline colors and dash pattern.
    pub overlay: OverlayStyle,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            min_point_spacing: 3.0,
            clear_delay_ms: 1500,
            marker_capacity: 1000,
            debug_markers: false,
            overlay: OverlayStyle::default(),
        }
    }
}

impl ToolConfig {
    /// Parse and validate a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection.face_sample_cap == 0 {
            return Err(Error::Config("face_sample_cap must be at least 1".to_string()));
        }
        if self.marker_capacity == 0 {
            return Err(Error::Config("marker_capacity must be at least 1".to_string()));
        }
        if !(self.min_point_spacing >= 0.0 && self.min_point_spacing.is_finite()) {
            return Err(Error::Config(format!(
                "min_point_spacing must be a non-negative number, got {}",
                self.min_point_spacing
            )));
        }
        Ok(())
    }

    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "selection": { "face_sample_cap": 500 }, "debug_markers": true }"#;
        let config = ToolConfig::from_json_str(json).unwrap();
        assert_eq!(config.selection.face_sample_cap, 500);
        assert!(config.debug_markers);
        assert_eq!(config.marker_capacity, 1000);
        assert_eq!(config.clear_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ToolConfig::from_json_str(r#"{ "selection": { "face_sample_cap": 0 } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ToolConfig::from_json_str(r#"{ "marker_capacity": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ToolConfig::from_json_str(r#"{ "min_point_spacing": -1.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(ToolConfig::from_json_str("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(ToolConfig::load("/nonexistent/lassoview.json"), Err(Error::Io(_))));
    }
}
