use crate::core::color::Color;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::ScreenTriangle;
use crate::core::math::interpolation::{barycentric, is_inside_triangle};
use nalgebra::Point3;

/// Depth submitted for every wireframe pixel.
pub const LINE_DEPTH: f32 = 0.0;

#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum RenderMode {
    /// Solid triangles through the depth buffer.
    #[default]
    Fill,
    /// Edges only, drawn with Bresenham lines at [`LINE_DEPTH`].
    Wireframe,
}

/// Inclusive pixel range covered by a triangle, already clamped to the target.
/// Empty when `min_x > max_x` or `min_y > max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
pub struct Rasterizer {
    pub mode: RenderMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            mode: RenderMode::Fill,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Draws `triangle` in the current mode.
    pub fn draw(&self, framebuffer: &mut FrameBuffer, triangle: &ScreenTriangle) {
        let [v0, v1, v2] = &triangle.vertices;
        match self.mode {
            RenderMode::Fill => fill_triangle(framebuffer, v0, v1, v2, triangle.color),
            RenderMode::Wireframe => wireframe_triangle(framebuffer, v0, v1, v2, triangle.color),
        }
    }
}

/// Pixel range covering the three projected vertices, clamped to
/// `[0, width-1] x [0, height-1]`.
pub fn bounding_box(
    v0: &Point3<f32>,
    v1: &Point3<f32>,
    v2: &Point3<f32>,
    width: usize,
    height: usize,
) -> BoundingBox {
    let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

    BoundingBox {
        min_x: min_x.max(0),
        min_y: min_y.max(0),
        max_x: max_x.min(width as i32 - 1),
        max_y: max_y.min(height as i32 - 1),
    }
}

/// Fills a screen-space triangle with a flat color.
///
/// Every pixel center inside the triangle (edges included) gets a depth
/// interpolated from the vertex z values and is submitted to the depth test.
pub fn fill_triangle(
    framebuffer: &mut FrameBuffer,
    v0: &Point3<f32>,
    v1: &Point3<f32>,
    v2: &Point3<f32>,
    color: Color,
) {
    let bbox = bounding_box(v0, v1, v2, framebuffer.width, framebuffer.height);

    for y in bbox.min_y..=bbox.max_y {
        for x in bbox.min_x..=bbox.max_x {
            let pixel_center = Point3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let bary = barycentric(v0, v1, v2, &pixel_center);

            if !is_inside_triangle(&bary) {
                continue;
            }

            let depth = bary.x * v0.z + bary.y * v1.z + bary.z * v2.z;
            framebuffer.point(x, y, depth, color);
        }
    }
}

/// Draws the three edges of a triangle. Each edge is clipped to the
/// framebuffer rectangle, then its endpoints are truncated to whole pixels.
/// Edges lying fully on screen are drawn between the truncated vertices.
pub fn wireframe_triangle(
    framebuffer: &mut FrameBuffer,
    v0: &Point3<f32>,
    v1: &Point3<f32>,
    v2: &Point3<f32>,
    color: Color,
) {
    let (width, height) = (framebuffer.width as f64, framebuffer.height as f64);

    for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
        let a = (f64::from(a.x), f64::from(a.y));
        let b = (f64::from(b.x), f64::from(b.y));
        let Some((from, to)) = clip_segment(a, b, width, height) else {
            continue;
        };
        line(
            framebuffer,
            (from.0 as i32, from.1 as i32),
            (to.0 as i32, to.1 as i32),
            color,
        );
    }
}

/// Liang-Barsky clip of a segment against `[0, max_x] x [0, max_y]`.
///
/// Computed in f64: a vertex projected far off screen must still land on
/// the right pixel once clipped. Endpoints already inside are returned unchanged. `None` when
/// the segment misses the rectangle or has a non-finite coordinate.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    max_x: f64,
    max_y: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if ![a.0, a.1, b.0, b.1].iter().all(|c| c.is_finite()) {
        return None;
    }

    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, a.0), (dx, max_x - a.0), (-dy, a.1), (dy, max_y - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let from = if t0 > 0.0 { (a.0 + t0 * dx, a.1 + t0 * dy) } else { a };
    let to = if t1 < 1.0 { (a.0 + t1 * dx, a.1 + t1 * dy) } else { b };
    Some((from, to))
}

/// Bresenham line from `from` to `to`, both endpoints included.
///
/// Steps every pixel between the endpoints, on screen or not; callers with
/// unbounded coordinates clip first.
pub fn line(framebuffer: &mut FrameBuffer, from: (i32, i32), to: (i32, i32), color: Color) {
    let (mut x, mut y) = (i64::from(from.0), i64::from(from.1));
    let (x1, y1) = (i64::from(to.0), i64::from(to.1));

    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        // x and y stay between the i32 endpoints
        framebuffer.point(x as i32, y as i32, LINE_DEPTH, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
