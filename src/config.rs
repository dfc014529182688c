use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::playback::SurfaceBounds;

/// Main configuration for the replayer demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bundled-asset resolution settings
    pub bundle: BundleConfig,

    /// Output surface settings
    pub surface: SurfaceConfig,

    /// Playback/engine settings
    pub playback: PlaybackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle: BundleConfig::default(),
            surface: SurfaceConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bundle.validate()?;
        self.surface.validate()?;
        self.playback.validate()?;
        Ok(())
    }
}

/// Bundled-asset resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Directory the bundled media lives in
    pub asset_dir: PathBuf,

    /// Asset name resolved when none is given on the command line
    pub default_name: String,

    /// Asset extension resolved when none is given on the command line
    pub default_ext: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            default_name: "puppy".to_string(),
            default_ext: "mp4".to_string(),
        }
    }
}

impl BundleConfig {
    fn validate(&self) -> Result<()> {
        if self.default_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "bundle.default_name".to_string(),
                value: self.default_name.clone(),
            }
            .into());
        }

        if self.default_ext.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "bundle.default_ext".to_string(),
                value: self.default_ext.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Output surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Display width in points
    pub width: f64,

    /// Display height in points
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl SurfaceConfig {
    /// Bounds value handed to the player layer
    pub fn bounds(&self) -> SurfaceBounds {
        SurfaceBounds::new(self.width, self.height)
    }

    fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "surface.bounds".to_string(),
                value: format!("{}x{}", self.width, self.height),
            }
            .into());
        }

        Ok(())
    }
}

/// Playback/engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay before the simulated engine reports readiness (milliseconds)
    pub ready_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { ready_delay_ms: 150 }
    }
}

impl PlaybackConfig {
    fn validate(&self) -> Result<()> {
        if self.ready_delay_ms > 60_000 {
            return Err(ConfigError::InvalidValue {
                key: "playback.ready_delay_ms".to_string(),
                value: self.ready_delay_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original = Config::default();
        original.save_to_file(&file_path).unwrap();
        let loaded = Config::from_file(&file_path).unwrap();

        assert_eq!(original.bundle.default_name, loaded.bundle.default_name);
        assert_eq!(original.surface.width, loaded.surface.width);
        assert_eq!(original.playback.ready_delay_ms, loaded.playback.ready_delay_ms);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/replayer.toml").unwrap_err();
        assert!(matches!(
            err,
            crate::error::PlayerError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_surface_bounds() {
        let mut config = Config::default();
        config.surface.width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_ready_delay() {
        let mut config = Config::default();
        config.playback.ready_delay_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_asset_name_rejected() {
        let mut config = Config::default();
        config.bundle.default_name = String::new();
        assert!(config.validate().is_err());
    }
}
