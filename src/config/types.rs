//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::export::ExportFormat;
use crate::history::DEFAULT_MAX_UNDO_STEPS;
use serde::{Deserialize, Serialize};

/// Drawing surface settings.
///
/// Supplied at construction; every field is optional in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Color painted by `clear` and used behind exported images
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Pen stroke color
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,

    /// Pen stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_pen_width")]
    pub pen_width: f64,

    /// Eraser stroke width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Maximum number of history snapshots kept, including the current state
    /// (valid range: 1 - 500)
    #[serde(default = "default_max_undo_steps")]
    pub max_undo_steps: usize,

    /// Initial buffer width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Initial buffer height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            pen_color: default_pen_color(),
            pen_width: default_pen_width(),
            eraser_width: default_eraser_width(),
            max_undo_steps: default_max_undo_steps(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Export defaults used when the host does not pick a format itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (png, jpeg)
    #[serde(default = "default_export_format")]
    pub format: ExportFormat,

    /// Lossy encoder quality (valid range: 0.0 - 1.0); ignored for png
    #[serde(default = "default_export_quality")]
    pub quality: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
            quality: default_export_quality(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_pen_width() -> f64 {
    2.0
}

fn default_eraser_width() -> f64 {
    10.0
}

fn default_max_undo_steps() -> usize {
    DEFAULT_MAX_UNDO_STEPS
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Png
}

fn default_export_quality() -> f32 {
    0.8
}
