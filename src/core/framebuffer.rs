use crate::core::color::Color;
use rayon::prelude::*;
use thiserror::Error;

/// Fallback resolution for `render.width` / `render.height` when the
/// configuration leaves them out. Framebuffers take their size from the
/// caller, so any other size works the same.
pub const SCREEN_WIDTH: usize = 800;
pub const SCREEN_HEIGHT: usize = 600;

/// Depth value of a cell nothing has been drawn to yet.
pub const DEPTH_CLEAR: f32 = f32::MAX;

/// Channel order of a packed 32-bit display pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// `0xRRGGBBAA`, red in the most significant byte.
    Rgba8888,
    /// `0x00RRGGBB`.
    Xrgb8888,
}

impl PixelFormat {
    #[inline]
    fn pack(self, color: Color) -> u32 {
        match self {
            PixelFormat::Rgba8888 => color.to_rgba8888(),
            PixelFormat::Xrgb8888 => color.to_xrgb8888(),
        }
    }
}

#[derive(Debug, Error)]
#[error("surface holds {actual} pixels, frame has {expected}")]
pub struct SurfaceSizeMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// A color buffer with a parallel depth buffer, both indexed by `y * width + x`.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![Color::default(); size],
            depth_buffer: vec![DEPTH_CLEAR; size],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets every color cell to `color` and every depth cell to [`DEPTH_CLEAR`].
    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    /// Depth-tested pixel write.
    ///
    /// Writes `color` and `depth` only when `(x, y)` is on screen and `depth` is
    /// strictly closer than what the cell already holds. Off-screen writes are
    /// dropped silently.
    #[inline]
    pub fn point(&mut self, x: i32, y: i32, depth: f32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = self.index(x as usize, y as usize);
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    pub fn colors(&self) -> &[Color] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Packs the color buffer row-major into `surface` using `format`.
    pub fn present(
        &self,
        format: PixelFormat,
        surface: &mut [u32],
    ) -> Result<(), SurfaceSizeMismatch> {
        if surface.len() != self.color_buffer.len() {
            return Err(SurfaceSizeMismatch {
                expected: self.color_buffer.len(),
                actual: surface.len(),
            });
        }
        if self.width == 0 {
            return Ok(());
        }

        surface
            .par_chunks_mut(self.width)
            .zip(self.color_buffer.par_chunks(self.width))
            .for_each(|(dst, src)| {
                for (pixel, color) in dst.iter_mut().zip(src) {
                    *pixel = format.pack(*color);
                }
            });
        Ok(())
    }
}
