//! Configuration file support for inkboard.
//!
//! Settings are read from `~/.config/inkboard/config.toml` (or any path a host
//! chooses) and cover the drawing surface defaults and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{ExportConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted pen widths, matching the toolbar slider.
pub const PEN_WIDTH_RANGE: (f64, f64) = (1.0, 20.0);
/// Accepted eraser widths.
pub const ERASER_WIDTH_RANGE: (f64, f64) = (1.0, 100.0);
/// Accepted history depths.
pub const UNDO_STEPS_RANGE: (usize, usize) = (1, 500);
/// Accepted buffer extents along either axis.
pub const EXTENT_RANGE: (u32, u32) = (1, 16384);

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [surface]
/// background_color = "#ffffff"
/// pen_color = "black"
/// pen_width = 2.0
/// eraser_width = 10.0
/// max_undo_steps = 20
///
/// [export]
/// format = "jpeg"
/// quality = 0.8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing surface defaults (colors, widths, history depth, extent)
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Export format preferences
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged. Unrecognized colors are replaced by the defaults (white
    /// background, black pen).
    pub fn validate_and_clamp(&mut self) {
        let surface = &mut self.surface;

        let (min, max) = PEN_WIDTH_RANGE;
        if !(min..=max).contains(&surface.pen_width) {
            warn!(
                "Invalid pen_width {:.1}, clamping to {:.1}-{:.1} range",
                surface.pen_width, min, max
            );
            surface.pen_width = if surface.pen_width.is_nan() {
                min
            } else {
                surface.pen_width.clamp(min, max)
            };
        }

        let (min, max) = ERASER_WIDTH_RANGE;
        if !(min..=max).contains(&surface.eraser_width) {
            warn!(
                "Invalid eraser_width {:.1}, clamping to {:.1}-{:.1} range",
                surface.eraser_width, min, max
            );
            surface.eraser_width = if surface.eraser_width.is_nan() {
                min
            } else {
                surface.eraser_width.clamp(min, max)
            };
        }

        let (min, max) = UNDO_STEPS_RANGE;
        if !(min..=max).contains(&surface.max_undo_steps) {
            warn!(
                "Invalid max_undo_steps {}, clamping to {}-{} range",
                surface.max_undo_steps, min, max
            );
            surface.max_undo_steps = surface.max_undo_steps.clamp(min, max);
        }

        let (min, max) = EXTENT_RANGE;
        for (name, value) in [("width", &mut surface.width), ("height", &mut surface.height)] {
            if !(min..=max).contains(&*value) {
                warn!("Invalid {} {}, clamping to {}-{} range", name, value, min, max);
                *value = (*value).clamp(min, max);
            }
        }

        if surface.background_color.resolve().is_none() {
            warn!(
                "Invalid background_color {:?}, falling back to white",
                surface.background_color
            );
            surface.background_color = ColorSpec::Rgb([255, 255, 255]);
        }
        if surface.pen_color.resolve().is_none() {
            warn!(
                "Invalid pen_color {:?}, falling back to black",
                surface.pen_color
            );
            surface.pen_color = ColorSpec::Rgb([0, 0, 0]);
        }

        if !(0.0..=1.0).contains(&self.export.quality) {
            warn!(
                "Invalid export quality {:.2}, clamping to 0.0-1.0 range",
                self.export.quality
            );
            self.export.quality = if self.export.quality.is_nan() {
                0.8
            } else {
                self.export.quality.clamp(0.0, 1.0)
            };
        }
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text).context("Failed to parse config")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML and writes it to `path`, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}
