//! The bandwave configuration file.

use bandwave_analysis::AnalysisConfig;
use bandwave_render::{DisplayConfig, Rgb};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths::default_config_path;

/// Geometry and color of the LED matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Rows a full-scale bar extends either side of the middle row.
    pub bar_height: usize,
    /// Color of lit pixels, `[r, g, b]`.
    pub color: Rgb,
    /// Mirror bars around the middle row.
    pub mirror: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let display = DisplayConfig::default();
        Self {
            width: display.width,
            height: display.height,
            bar_height: display.bar_height,
            color: display.color,
            mirror: display.mirror,
        }
    }
}

impl DisplaySettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "matrix must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.bar_height > self.height / 2 {
            return Err(ConfigError::Invalid(format!(
                "bar_height {} does not fit a {}-row matrix (max {})",
                self.bar_height,
                self.height,
                self.height / 2
            )));
        }
        Ok(())
    }
}

/// Configuration file contents.
///
/// # TOML Format
///
/// ```toml
/// [analysis]
/// analysis_fps = 30
/// sample_rate = 44100
/// display_max = 15.0
/// presence_factor = 0.7
/// gain_curve = [1.0, 1.2]
/// window = "hann"
///
/// [display]
/// width = 64
/// height = 32
/// bar_height = 14
/// color = [255, 0, 0]
/// mirror = true
/// ```
///
/// Every key is optional; unknown keys are an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Band analysis parameters.
    pub analysis: AnalysisConfig,
    /// LED matrix settings.
    pub display: DisplaySettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load `path` if given; otherwise the user config file if it exists,
    /// else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_path();
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check both sections, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.display.validate()
    }

    /// The validated analysis parameters.
    pub fn analysis_config(&self) -> Result<AnalysisConfig, ConfigError> {
        self.analysis.validate()?;
        Ok(self.analysis)
    }

    /// Renderer settings; bars reach full scale at the analysis `display_max`.
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            width: self.display.width,
            height: self.display.height,
            bar_height: self.display.bar_height,
            color: self.display.color,
            display_max: self.analysis.display_max,
            mirror: self.display.mirror,
        }
    }
}
