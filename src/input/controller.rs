//! Adapter from host events to drawing surface operations.

use super::events::{MouseButton, PointerEvent, ToolbarAction, TouchEvent};
use crate::draw::Point;
use crate::surface::{ConfirmClear, DrawingSurface};
use log::debug;

/// Drives a [`DrawingSurface`] from normalized host events.
///
/// Mouse and touch gestures map onto stroke begin/extend/end; toolbar
/// actions map onto tool, width, undo and clear. `clear` consults the
/// confirmation gate supplied at construction.
pub struct SurfaceController<C> {
    surface: DrawingSurface,
    confirm: C,
    /// Whether the host should repaint (drain damage from the surface)
    pub needs_redraw: bool,
}

impl<C: ConfirmClear> SurfaceController<C> {
    pub fn new(surface: DrawingSurface, confirm: C) -> Self {
        Self {
            surface,
            confirm,
            needs_redraw: true,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> DrawingSurface {
        self.surface
    }

    /// Returns and resets the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Dispatches a mouse-style pointer event.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { button, at } => self.on_mouse_press(button, at),
            PointerEvent::Move { at } => self.on_mouse_motion(at),
            PointerEvent::Up { button } => self.on_mouse_release(button),
            PointerEvent::Leave | PointerEvent::Cancel => self.finish_stroke(),
        }
    }

    /// Processes a mouse button press.
    ///
    /// Only the left button starts a stroke.
    pub fn on_mouse_press(&mut self, button: MouseButton, at: Point) {
        if button == MouseButton::Left && self.surface.begin_stroke(at) {
            self.needs_redraw = true;
        }
    }

    /// Processes pointer motion; draws only while a stroke is active.
    pub fn on_mouse_motion(&mut self, at: Point) {
        if self.surface.extend_stroke(at) {
            self.needs_redraw = true;
        }
    }

    /// Processes a mouse button release.
    pub fn on_mouse_release(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.finish_stroke();
        }
    }

    /// Processes a touch event. Only the first touch in contact draws.
    pub fn on_touch(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Start(touches) => {
                if let Some(first) = touches.first() {
                    self.on_mouse_press(MouseButton::Left, first.at);
                }
            }
            TouchEvent::Move(touches) => {
                if let Some(first) = touches.first() {
                    self.on_mouse_motion(first.at);
                }
            }
            TouchEvent::End => self.finish_stroke(),
        }
    }

    /// Applies a toolbar command.
    pub fn on_toolbar(&mut self, action: ToolbarAction) {
        debug!("Toolbar action: {:?}", action);
        match action {
            ToolbarAction::SelectTool(tool) => self.surface.set_tool(tool),
            ToolbarAction::SetPenWidth(width) => self.surface.set_pen_width(width),
            ToolbarAction::Undo => {
                if self.surface.undo() {
                    self.needs_redraw = true;
                }
            }
            ToolbarAction::Clear => {
                if self.surface.clear(&mut self.confirm) {
                    self.needs_redraw = true;
                }
            }
        }
    }

    fn finish_stroke(&mut self) {
        if self.surface.end_stroke() {
            self.needs_redraw = true;
        }
    }
}
