//! CPU-side render targets: the color framebuffer and its depth companion.

use std::path::Path;

use crate::color::ColorF;
use crate::error::Result;

/// Row-major color target, origin at the top-left pixel. Allocation fills
/// it with the opaque background so a freshly created GPU texture has
/// defined contents before the first rasterized frame lands.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<ColorF>,
}

impl FrameBuffer {
    /// Fill used on (re)allocation, distinct from the per-frame clear.
    pub const BACKGROUND: ColorF = ColorF::WHITE;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Self::BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn fill(&mut self, color: ColorF) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<ColorF> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[ColorF] {
        &self.pixels
    }

    /// Mutable pixel storage; the rasterizer partitions this into
    /// whole-row chunks so parallel workers never alias.
    pub fn pixels_mut(&mut self) -> &mut [ColorF] {
        &mut self.pixels
    }

    /// Borrowed byte view of the raw RGBA float pixels, for uploading to a
    /// GPU texture of matching format. Safely typed, no pointer casts.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixels quantized to 8-bit RGBA, for snapshot encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_rgba8());
        }
        bytes
    }

    /// Writes the current contents as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Depth companion to [`FrameBuffer`]: one camera-space w per pixel, same
/// dimensions, reallocated together. Filled with the camera's far clip at
/// the start of every rasterize call so any in-range fragment beats it.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fill(&mut self, depth: f32) {
        self.values.fill(depth);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_fills_background() {
        let frame = FrameBuffer::new(8, 4);
        assert_eq!(frame.len(), 32);
        assert!(frame.pixels().iter().all(|&p| p == FrameBuffer::BACKGROUND));
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.fill(ColorF::TRANSPARENT);
        assert!(frame.pixels().iter().all(|&p| p == ColorF::TRANSPARENT));
    }

    #[test]
    fn pixel_lookup_checks_bounds() {
        let frame = FrameBuffer::new(4, 2);
        assert!(frame.pixel(3, 1).is_some());
        assert!(frame.pixel(4, 0).is_none());
        assert!(frame.pixel(0, 2).is_none());
    }

    #[test]
    fn byte_view_is_four_floats_per_pixel() {
        let frame = FrameBuffer::new(3, 2);
        assert_eq!(frame.as_bytes().len(), 3 * 2 * 16);
    }

    #[test]
    fn rgba8_conversion_matches_pixel_count() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.fill(ColorF::BLACK);
        let bytes = frame.to_rgba8();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn depth_fill_and_lookup() {
        let mut depth = DepthBuffer::new(4, 4);
        assert_eq!(depth.get(0, 0), Some(f32::INFINITY));
        depth.fill(10.0);
        assert_eq!(depth.get(3, 3), Some(10.0));
        assert!(depth.get(4, 0).is_none());
    }
}
