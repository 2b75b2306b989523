//! Utility functions for color names and rectangle geometry.

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "white", "black", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

/// Resolves a color written either as a name or as CSS hex notation.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        Color::from_hex(spec)
    } else {
        name_to_color(spec)
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    ///
    /// Returns `None` when the extent is empty or does not fit in `i32`.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x.checked_sub(min_x)?;
        let height = max_y.checked_sub(min_y)?;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self
            .x
            .saturating_add(self.width)
            .max(other.x.saturating_add(other.width));
        let max_y = self
            .y
            .saturating_add(self.height)
            .max(other.y.saturating_add(other.height));
        Rect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x),
            height: max_y.saturating_sub(min_y),
        }
    }

    /// Clips the rectangle to `0..width` x `0..height`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the bounds.
    pub fn clamp_to_bounds(self, width: u32, height: u32) -> Option<Rect> {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = self.x.saturating_add(self.width).clamp(0, width);
        let max_y = self.y.saturating_add(self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns true when the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_hex_color_mappings() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert!(name_to_color("chartreuse").is_none());
        assert_eq!(parse_color("#000000").unwrap(), BLACK);
        assert_eq!(parse_color(" black ").unwrap(), BLACK);
        assert!(parse_color("#12").is_none());
    }

    #[test]
    fn clamp_to_bounds_clips_partially_outside_rect() {
        let rect = Rect::new(-5, 90, 20, 20).unwrap();
        assert_eq!(
            rect.clamp_to_bounds(100, 100),
            Some(Rect::new(0, 90, 15, 10).unwrap())
        );
    }

    #[test]
    fn clamp_to_bounds_drops_rect_outside() {
        let rect = Rect::new(200, 200, 10, 10).unwrap();
        assert!(rect.clamp_to_bounds(100, 100).is_none());
    }

    #[test]
    fn from_min_max_rejects_overflowing_extent() {
        assert_eq!(Rect::from_min_max(i32::MIN, 0, 10, 5), None);
        assert_eq!(Rect::from_min_max(-10, 0, i32::MAX, 5), None);
        assert_eq!(
            Rect::from_min_max(-10, 0, 10, 5),
            Rect::new(-10, 0, 20, 5)
        );
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(5, 20, 10, 5).unwrap();
        assert_eq!(a.union(b), Rect::new(0, 0, 15, 25).unwrap());
        assert!(a.union(b).contains(14, 24));
        assert!(!a.union(b).contains(15, 24));
    }
}
