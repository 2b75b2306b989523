//! Raster primitives for the drawing surface.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`RasterBuffer`]: the owned pixel grid strokes are composited into
//! - [`Stroke`] / [`Point`]: the transient geometry of one pointer gesture
//! - [`DirtyTracker`]: damage rectangles for incremental repaint

pub mod color;
pub mod dirty;
pub mod raster;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use raster::{CompositeMode, RasterBuffer};
pub use stroke::{Point, Stroke};

pub use color::{BLACK, BLUE, GREEN, RED, TRANSPARENT, WHITE, YELLOW};
