//! Input handling: tool selection and the host event adapter.
//!
//! This module translates host mouse, touch and toolbar events into
//! [`DrawingSurface`](crate::DrawingSurface) operations, keeping the surface
//! itself free of any UI toolkit.

pub mod controller;
pub mod events;
pub mod tool;

// Re-export commonly used types at module level
pub use controller::SurfaceController;
pub use events::{MouseButton, PointerEvent, Touch, TouchEvent, ToolbarAction};
pub use tool::ToolMode;
