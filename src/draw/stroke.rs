//! Stroke geometry: surface-local points and the in-progress point sequence.

use crate::util::Rect;

/// A surface-local position in pixels; fractional values address sub-pixel positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance between two points.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

/// Points collected while a pointer is held down, in draw order.
///
/// A stroke is transient: it lives from `begin_stroke` to `end_stroke` and is
/// discarded once its segments are in the raster buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Starts a stroke at `origin`.
    pub fn starting_at(origin: Point) -> Self {
        Self {
            points: vec![origin],
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the whole stroke padded for the given stroke width.
    pub fn bounding_box(&self, width: f64) -> Option<Rect> {
        bounding_box_for_points(&self.points, width)
    }
}

fn stroke_padding(width: f64) -> f64 {
    // Half the width plus one pixel of antialiased fringe.
    (width / 2.0).max(0.0) + 1.0
}

/// Integer rectangle covering every pixel a round-capped stroke through
/// `points` can touch.
pub(crate) fn bounding_box_for_points(points: &[Point], width: f64) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);

    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let padding = stroke_padding(width);
    Rect::from_min_max(
        to_pixel((min_x - padding).floor()),
        to_pixel((min_y - padding).floor()),
        to_pixel((max_x + padding).ceil()),
        to_pixel((max_y + padding).ceil()),
    )
}

/// Far-off coordinates are pinned so that any min/max pair still has an
/// extent representable in `i32`.
const PIXEL_LIMIT: f64 = (i32::MAX / 2) as f64;

fn to_pixel(value: f64) -> i32 {
    value.clamp(-PIXEL_LIMIT, PIXEL_LIMIT) as i32
}
