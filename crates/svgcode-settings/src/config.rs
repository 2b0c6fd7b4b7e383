//! Converter settings
//!
//! Settings persist as JSON or TOML, chosen by file extension. Every
//! section and field has a default, so a settings file only needs the
//! values it changes.

use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory under the platform config directory
pub const APP_DIR: &str = "svgcode";

/// Default settings file name
pub const SETTINGS_FILE: &str = "config.toml";

/// Curve flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenSettings {
    /// Straight-line samples per curve
    pub segments: usize,
}

impl Default for FlattenSettings {
    fn default() -> Self {
        Self { segments: 10 }
    }
}

/// Handling of smooth curve shorthands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothCurves {
    /// Report and skip them
    #[default]
    Skip,
    /// Flatten them like explicit curves
    Flatten,
}

impl std::fmt::Display for SmoothCurves {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Flatten => write!(f, "flatten"),
        }
    }
}

impl std::str::FromStr for SmoothCurves {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "flatten" => Ok(Self::Flatten),
            _ => Err(SettingsError::invalid(
                "curves.smooth",
                format!("expected 'skip' or 'flatten', got '{}'", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub smooth: SmoothCurves,
}

/// Document cleanup passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    /// Run cleanup at all
    pub enabled: bool,
    /// Rewrite basic shapes as paths
    pub convert_shapes: bool,
    /// Remove stroke, fill and styling attributes
    pub strip_presentation: bool,
    /// Dissolve groups without a transform
    pub collapse_groups: bool,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            convert_shapes: true,
            strip_presentation: true,
            collapse_groups: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// End the program with a newline
    pub trailing_newline: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            trailing_newline: true,
        }
    }
}

/// Complete converter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub flatten: FlattenSettings,
    pub curves: CurveSettings,
    pub cleanup: CleanupSettings,
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.flatten.segments == 0 {
            return Err(SettingsError::invalid("flatten.segments", "must be > 0"));
        }
        Ok(())
    }

    /// Settings file in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".to_string())
        })?;
        Ok(dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Load the default settings file when it exists, else defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.flatten.segments, 10);
        assert_eq!(settings.curves.smooth, SmoothCurves::Skip);
        assert!(settings.cleanup.enabled);
        assert!(settings.cleanup.convert_shapes);
        assert!(settings.output.trailing_newline);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_segments_rejected() {
        let mut settings = Settings::default();
        settings.flatten.segments = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSetting { ref key, .. } if key == "flatten.segments"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("[curves]\nsmooth = \"flatten\"\n").unwrap();
        assert_eq!(settings.curves.smooth, SmoothCurves::Flatten);
        assert_eq!(settings.flatten.segments, 10);
        assert!(settings.cleanup.collapse_groups);
    }

    #[test]
    fn test_smooth_curves_from_str() {
        assert_eq!("Flatten".parse::<SmoothCurves>().unwrap(), SmoothCurves::Flatten);
        assert_eq!("skip".parse::<SmoothCurves>().unwrap(), SmoothCurves::Skip);
        assert!("arc".parse::<SmoothCurves>().is_err());
        assert_eq!(SmoothCurves::Flatten.to_string(), "flatten");
    }

    #[test]
    fn test_default_path_ends_with_app_file() {
        if let Ok(path) = Settings::default_path() {
            assert!(path.ends_with("svgcode/config.toml"));
        }
    }
}
