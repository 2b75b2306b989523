//! The drawing surface: raster buffer, tool state and bounded undo history.
//!
//! Every operation is total. Calls whose precondition does not hold (moving
//! without a stroke, starting a second stroke, undoing past the first
//! snapshot, non-finite coordinates) are ignored and report `false`, so
//! glitchy event ordering from a host never corrupts state. Extents and
//! history depth are clamped to the configured ranges.

use crate::config::{
    ERASER_WIDTH_RANGE, EXTENT_RANGE, ExportConfig, PEN_WIDTH_RANGE, SurfaceConfig,
    UNDO_STEPS_RANGE,
};
use crate::draw::{
    BLACK, Color, CompositeMode, DirtyTracker, Point, RasterBuffer, Stroke, WHITE,
};
use crate::export::{self, ExportEncoding, ExportError, ExportFormat, ExportedImage};
use crate::history::{HistoryStack, Snapshot};
use crate::input::ToolMode;
use crate::util::Rect;
use log::{debug, info};


/// Asks the user whether the surface may really be cleared.
///
/// Implemented for any `FnMut() -> bool`, so hosts can pass a closure that
/// opens their confirmation dialog.
pub trait ConfirmClear {
    fn confirm_clear(&mut self) -> bool;
}

impl<F> ConfirmClear for F
where
    F: FnMut() -> bool,
{
    fn confirm_clear(&mut self) -> bool {
        self()
    }
}

/// Stroke state machine.
#[derive(Debug)]
enum StrokeState {
    /// No pointer held down
    Idle,
    /// Pointer held down; settings are frozen for the whole stroke
    Drawing {
        stroke: Stroke,
        mode: CompositeMode,
        width: f64,
    },
}

/// A freehand drawing widget's model, free of any UI toolkit.
pub struct DrawingSurface {
    buffer: RasterBuffer,
    history: HistoryStack,
    state: StrokeState,
    tool: ToolMode,
    pen_color: Color,
    pen_width: f64,
    eraser_width: f64,
    background_color: Color,
    dirty: DirtyTracker,
}

impl DrawingSurface {
    /// Creates a transparent surface from configuration and records the blank
    /// state as the first history entry.
    pub fn new(config: &SurfaceConfig) -> Self {
        let (width, height) = clamp_extent(config.width, config.height);
        let (min_depth, max_depth) = UNDO_STEPS_RANGE;
        let mut surface = Self {
            buffer: RasterBuffer::new(width, height),
            history: HistoryStack::new(config.max_undo_steps.clamp(min_depth, max_depth)),
            state: StrokeState::Idle,
            tool: ToolMode::Pen,
            pen_color: config.pen_color.to_color_or(BLACK),
            pen_width: clamp_width(config.pen_width, PEN_WIDTH_RANGE),
            eraser_width: clamp_width(config.eraser_width, ERASER_WIDTH_RANGE),
            background_color: config.background_color.to_color_or(WHITE),
            dirty: DirtyTracker::new(),
        };
        surface.save_state();
        surface.dirty.mark_full();
        debug!(
            "Created {}x{} drawing surface (history depth {})",
            width,
            height,
            surface.history.capacity()
        );
        surface
    }

    /// Creates a surface of the given extent with default settings.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(&SurfaceConfig {
            width,
            height,
            ..SurfaceConfig::default()
        })
    }

    // ------------------------------------------------------------------
    // Strokes
    // ------------------------------------------------------------------

    /// Starts a stroke at `point` with the current tool's compositing mode and width.
    ///
    /// Ignored while a stroke is already active. Nothing is drawn until the
    /// first [`extend_stroke`](Self::extend_stroke).
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            debug!("Ignoring stroke start at non-finite point {:?}", point);
            return false;
        }
        if self.is_drawing() {
            debug!(
                "Ignoring stroke start at ({:.1}, {:.1}): stroke already active",
                point.x, point.y
            );
            return false;
        }

        let width = match self.tool {
            ToolMode::Pen => self.pen_width,
            ToolMode::Eraser => self.eraser_width,
        };
        let mode = self.tool.composite_mode(self.pen_color);
        self.state = StrokeState::Drawing {
            stroke: Stroke::starting_at(point),
            mode,
            width,
        };
        debug!(
            "Began {} stroke at ({:.1}, {:.1}), width {:.1}",
            self.tool.name(),
            point.x,
            point.y,
            width
        );
        true
    }

    /// Appends `point` and immediately composites the segment from the
    /// previous point. Ignored when no stroke is active or `point` is not finite.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            debug!("Ignoring non-finite stroke point {:?}", point);
            return false;
        }
        let StrokeState::Drawing {
            stroke,
            mode,
            width,
        } = &mut self.state
        else {
            return false;
        };

        let previous = stroke.last();
        stroke.push(point);

        if let Some(previous) = previous {
            let damage = self.buffer.composite_segment(previous, point, *width, *mode);
            self.dirty.mark_optional_rect(damage);
        }
        true
    }

    /// Finishes the active stroke and records a snapshot. Ignored when idle.
    pub fn end_stroke(&mut self) -> bool {
        let StrokeState::Drawing { stroke, .. } =
            std::mem::replace(&mut self.state, StrokeState::Idle)
        else {
            return false;
        };

        self.save_state();
        debug!(
            "Ended stroke with {} points; history depth {}",
            stroke.len(),
            self.history.len()
        );
        true
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Points of the stroke in progress, if any.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            StrokeState::Drawing { stroke, .. } => Some(stroke),
            StrokeState::Idle => None,
        }
    }

    // ------------------------------------------------------------------
    // Tool settings (take effect at the next stroke)
    // ------------------------------------------------------------------

    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.tool != tool {
            debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    /// Sets the pen width, clamped to 1.0..=20.0.
    pub fn set_pen_width(&mut self, width: f64) {
        self.pen_width = clamp_width(width, PEN_WIDTH_RANGE);
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    /// Sets the eraser width, clamped to 1.0..=100.0.
    pub fn set_eraser_width(&mut self, width: f64) {
        self.eraser_width = clamp_width(width, ERASER_WIDTH_RANGE);
    }

    pub fn eraser_width(&self) -> f64 {
        self.eraser_width
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Drops the current snapshot and restores the one beneath it.
    ///
    /// The first snapshot is never undone past. Restoration copies pixels at
    /// the origin clipped to the current extent; pixels outside an older,
    /// smaller snapshot are kept.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            debug!("Nothing to undo");
            return false;
        };
        let restored = previous.dimensions();
        self.buffer.copy_from(previous.image());
        self.dirty.mark_full();
        debug!(
            "Undo to {}x{} snapshot; history depth {}",
            restored.0,
            restored.1,
            self.history.len()
        );
        true
    }

    /// Fills the buffer with the background color after `confirm` agrees,
    /// and records a snapshot. Declining leaves everything unchanged.
    pub fn clear(&mut self, confirm: &mut impl ConfirmClear) -> bool {
        if !confirm.confirm_clear() {
            debug!("Clear declined");
            return false;
        }
        self.buffer.fill(self.background_color);
        self.save_state();
        self.dirty.mark_full();
        info!("Surface cleared");
        true
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn save_state(&mut self) {
        let evicted = self.history.push(Snapshot::capture(&self.buffer));
        if evicted > 0 {
            debug!("History full; evicted {} oldest snapshot(s)", evicted);
        }
    }

    // ------------------------------------------------------------------
    // Buffer
    // ------------------------------------------------------------------

    /// Reallocates the buffer at the new extent, keeping content at the origin.
    ///
    /// Content outside the new extent is discarded, newly exposed pixels are
    /// transparent, and no history entry is recorded. Each axis is clamped to
    /// 1..=16384.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = clamp_extent(width, height);
        if self.buffer.dimensions() == (width, height) {
            return;
        }
        debug!(
            "Resizing surface {:?} -> {}x{}",
            self.buffer.dimensions(),
            width,
            height
        );
        self.buffer = self.buffer.resized(width, height);
        self.dirty.mark_full();
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Drains the regions changed since the last call, for host repaint.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        let (width, height) = self.buffer.dimensions();
        self.dirty.take_regions(width, height)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Exports the buffer flattened over the background color.
    pub fn export_image(
        &self,
        format: ExportFormat,
        quality: f32,
        encoding: ExportEncoding,
    ) -> Result<ExportedImage, ExportError> {
        export::export_image(
            &self.buffer,
            self.background_color,
            format,
            quality,
            encoding,
        )
    }

    /// Exports with the format and quality from `config`.
    pub fn export_with(
        &self,
        config: &ExportConfig,
        encoding: ExportEncoding,
    ) -> Result<ExportedImage, ExportError> {
        self.export_image(config.format, config.quality, encoding)
    }

    /// Encoded bytes of the flattened buffer.
    pub fn to_blob(&self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
        export::encode_flattened(&self.buffer, self.background_color, format, quality)
    }

    /// `data:` URL of the flattened buffer.
    pub fn to_data_url(&self, format: ExportFormat, quality: f32) -> Result<String, ExportError> {
        let bytes = self.to_blob(format, quality)?;
        Ok(export::data_url(format, &bytes))
    }
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("dimensions", &self.buffer.dimensions())
            .field("tool", &self.tool)
            .field("drawing", &self.is_drawing())
            .field("history", &self.history.len())
            .finish()
    }
}

fn clamp_width(width: f64, (min, max): (f64, f64)) -> f64 {
    if width.is_nan() { min } else { width.clamp(min, max) }
}

fn clamp_extent(width: u32, height: u32) -> (u32, u32) {
    let (min, max) = EXTENT_RANGE;
    (width.clamp(min, max), height.clamp(min, max))
}
