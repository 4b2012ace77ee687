use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, ImageResult, Rgba};
use std::path::Path;

/// Copies the color buffer into an RGBA image.
pub fn framebuffer_to_image(fb: &FrameBuffer) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let color = fb.get_pixel(x as usize, y as usize).unwrap_or_default();
        Rgba([color.r, color.g, color.b, color.a])
    })
}

/// Saves the framebuffer; the format follows the file extension.
pub fn save_framebuffer<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> ImageResult<()> {
    framebuffer_to_image(fb).save(path)
}
