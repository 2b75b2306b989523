//! Host-neutral input event types.
//!
//! Hosts map their native mouse, touch and toolbar events to these values
//! before handing them to [`super::SurfaceController`]. Coordinates are
//! already surface-local.

use super::tool::ToolMode;
use crate::draw::Point;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary drawing button
    Left,
    /// Ignored by the drawing surface
    Right,
    /// Ignored by the drawing surface
    Middle,
}

/// A mouse-style pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: MouseButton, at: Point },
    Move { at: Point },
    Up { button: MouseButton },
    /// Pointer left the surface; ends any stroke like a release.
    Leave,
    /// Host cancelled the gesture (e.g. lost capture).
    Cancel,
}

/// One touch point as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub at: Point,
}

/// A touch event carrying the touches currently in contact, in host order.
///
/// Only the first touch drives drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start(Vec<Touch>),
    Move(Vec<Touch>),
    End,
}

/// Toolbar commands the surface understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    SelectTool(ToolMode),
    Undo,
    /// Clear after asking the controller's confirmation gate.
    Clear,
    SetPenWidth(f64),
}
