//! Owned RGBA pixel grid and the compositing rules strokes are drawn with.
//!
//! Pixels are stored straight (non-premultiplied) as 8-bit RGBA. A fully
//! transparent pixel is always stored as `[0, 0, 0, 0]`, so buffers that look
//! the same compare equal.

use super::color::Color;
use super::stroke::{Point, bounding_box_for_points};
use crate::util::Rect;
use image::{Rgba, RgbaImage, imageops};

/// How new stroke coverage is blended into existing pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositeMode {
    /// Paint `Color` over existing content (opaque replace for opaque colors).
    SourceOver(Color),
    /// Remove existing content in proportion to coverage (erase to transparent).
    DestinationOut,
}

/// A 2D grid of pixels exclusively owned by one drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Creates a buffer uniformly filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, normalize(color.to_rgba8())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Full-buffer damage rectangle, `None` for an empty buffer.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let pixel = normalize(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Composites one round-capped line segment of diameter `width`.
    ///
    /// Coverage is antialiased over one pixel at the edge. Returns the clipped
    /// rectangle that was touched, or `None` if the segment lies entirely
    /// outside the buffer or an endpoint is not finite.
    pub fn composite_segment(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        mode: CompositeMode,
    ) -> Option<Rect> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        let radius = width.max(0.0) / 2.0;
        let damage = bounding_box_for_points(&[from, to], width)?
            .clamp_to_bounds(self.width(), self.height())?;

        for py in damage.y..damage.y + damage.height {
            for px in damage.x..damage.x + damage.width {
                let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let coverage = (radius + 0.5 - distance_to_segment(center, from, to)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(px as u32, py as u32);
                *pixel = blend(*pixel, coverage, mode);
            }
        }

        Some(damage)
    }

    /// Copies `source` into this buffer at the origin, clipped to this buffer's extent.
    ///
    /// Pixels outside the source's extent are left untouched.
    pub fn copy_from(&mut self, source: &RgbaImage) {
        imageops::replace(&mut self.image, source, 0, 0);
    }

    /// Returns a buffer of the new extent holding this buffer's content at the
    /// same origin. Content outside the new extent is discarded and newly
    /// exposed pixels are transparent. No scaling is applied.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let mut next = Self::new(width, height);
        next.copy_from(&self.image);
        next
    }

    /// Composites the buffer over an opaque `background`, leaving no transparency.
    pub fn flatten_over(&self, background: Color) -> RgbaImage {
        let background = background.opaque().to_rgba8();
        let mut out = RgbaImage::from_pixel(self.width(), self.height(), background);
        for (dst, src) in out.pixels_mut().zip(self.image.pixels()) {
            let sa = src[3] as f64 / 255.0;
            for c in 0..3 {
                let v = src[c] as f64 * sa + dst[c] as f64 * (1.0 - sa);
                dst[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            dst[3] = 255;
        }
        out
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

fn blend(dst: Rgba<u8>, coverage: f64, mode: CompositeMode) -> Rgba<u8> {
    let da = dst[3] as f64 / 255.0;
    match mode {
        CompositeMode::SourceOver(color) => {
            let sa = color.a.clamp(0.0, 1.0) * coverage;
            let out_a = sa + da * (1.0 - sa);
            if out_a <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let src = color.to_rgba8();
            let mut out = [0u8; 4];
            for c in 0..3 {
                let v = (src[c] as f64 * sa + dst[c] as f64 * da * (1.0 - sa)) / out_a;
                out[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_a * 255.0).round() as u8;
            normalize(Rgba(out))
        }
        CompositeMode::DestinationOut => {
            let out_a = da * (1.0 - coverage);
            normalize(Rgba([dst[0], dst[1], dst[2], (out_a * 255.0).round() as u8]))
        }
    }
}

fn normalize(pixel: Rgba<u8>) -> Rgba<u8> {
    if pixel[3] == 0 { Rgba([0, 0, 0, 0]) } else { pixel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    #[test]
    fn pen_segment_paints_center_line_opaque() {
        let mut buffer = RasterBuffer::new(20, 20);
        let damage = buffer
            .composite_segment(
                Point::new(2.0, 10.5),
                Point::new(18.0, 10.5),
                2.0,
                CompositeMode::SourceOver(BLACK),
            )
            .unwrap();

        for x in 2..18 {
            assert_eq!(buffer.pixel(x, 10).unwrap().0, [0, 0, 0, 255]);
        }
        assert_eq!(buffer.pixel(10, 2).unwrap().0, [0, 0, 0, 0]);
        assert!(damage.contains(10, 10));
    }

    #[test]
    fn eraser_segment_clears_to_transparent() {
        let mut buffer = RasterBuffer::filled(30, 30, RED);
        buffer.composite_segment(
            Point::new(5.0, 15.0),
            Point::new(25.0, 15.0),
            10.0,
            CompositeMode::DestinationOut,
        );

        for y in 11..19 {
            assert_eq!(buffer.pixel(15, y).unwrap().0, [0, 0, 0, 0]);
        }
        assert_eq!(buffer.pixel(15, 2).unwrap(), RED.to_rgba8());
    }

    #[test]
    fn segment_outside_buffer_touches_nothing() {
        let mut buffer = RasterBuffer::filled(10, 10, WHITE);
        let before = buffer.clone();
        let damage = buffer.composite_segment(
            Point::new(100.0, 100.0),
            Point::new(120.0, 100.0),
            4.0,
            CompositeMode::SourceOver(BLACK),
        );
        assert!(damage.is_none());
        assert_eq!(buffer, before);
    }

    #[test]
    fn non_finite_endpoint_touches_nothing() {
        let mut buffer = RasterBuffer::filled(10, 10, BLACK);
        let before = buffer.clone();
        let damage = buffer.composite_segment(
            Point::new(5.0, 5.0),
            Point::new(f64::NAN, f64::NAN),
            4.0,
            CompositeMode::SourceOver(BLACK),
        );
        assert!(damage.is_none());
        assert_eq!(buffer, before);
    }

    #[test]
    fn segment_to_far_off_point_paints_visible_part() {
        let mut buffer = RasterBuffer::new(20, 20);
        let damage = buffer
            .composite_segment(
                Point::new(10.0, 10.0),
                Point::new(-3.0e9, 10.0),
                2.0,
                CompositeMode::SourceOver(BLACK),
            )
            .unwrap();
        assert_eq!(damage.x, 0);
        assert_eq!(buffer.pixel(0, 9).unwrap().0, [0, 0, 0, 255]);
        assert_eq!(buffer.pixel(5, 10).unwrap().0, [0, 0, 0, 255]);
        assert_eq!(buffer.pixel(15, 10).unwrap().0, [0, 0, 0, 0]);
    }

    #[test]
    fn resized_clips_and_keeps_origin() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.fill(RED);
        let smaller = buffer.resized(2, 3);
        assert_eq!(smaller.dimensions(), (2, 3));
        assert_eq!(smaller.pixel(1, 2).unwrap(), RED.to_rgba8());

        let larger = smaller.resized(5, 5);
        assert_eq!(larger.pixel(1, 1).unwrap(), RED.to_rgba8());
        assert_eq!(larger.pixel(4, 4).unwrap().0, [0, 0, 0, 0]);
        assert_eq!(larger.pixel(1, 3).unwrap().0, [0, 0, 0, 0]);
    }

    #[test]
    fn flatten_replaces_transparency_with_background() {
        let mut buffer = RasterBuffer::new(3, 1);
        buffer.composite_segment(
            Point::new(0.5, 0.5),
            Point::new(0.5, 0.5),
            1.0,
            CompositeMode::SourceOver(BLACK),
        );
        let flat = buffer.flatten_over(WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(flat.get_pixel(2, 0).0, [255, 255, 255, 255]);
    }
}
