use crate::foundation::core::{Affine, Argb, Point, Rect, Vec2};
use crate::foundation::error::BlurResult;
use crate::raster::blend::over;
use crate::raster::buffer::PixelBuffer;

#[derive(Clone, Copy, Debug)]
struct CanvasState {
    transform: Affine,
    // Device space.
    clip: Rect,
}

/// 2D drawing context bound to an owned [`PixelBuffer`].
///
/// Geometry is transformed by the current matrix and clipped to the current device clip, both
/// of which are saved and restored as a stack. Coverage is decided by pixel centers; there is no
/// anti-aliasing.
pub struct Canvas {
    pixels: PixelBuffer,
    state: CanvasState,
    stack: Vec<CanvasState>,
}

impl Canvas {
    pub fn new(pixels: PixelBuffer) -> Self {
        let clip = Rect::new(0.0, 0.0, f64::from(pixels.width()), f64::from(pixels.height()));
        Self {
            pixels,
            state: CanvasState {
                transform: Affine::IDENTITY,
                clip,
            },
            stack: Vec::new(),
        }
    }

    /// Allocate the backing buffer and wrap it.
    pub fn try_new(width: u32, height: u32) -> BlurResult<Self> {
        Ok(Self::new(PixelBuffer::try_new(width, height)?))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Push the current state; returns the depth to hand to [`Canvas::restore_to_count`].
    pub fn save(&mut self) -> usize {
        let count = self.stack.len();
        self.stack.push(self.state);
        count
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    /// Pop saved states until only `count` remain.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.stack.len() > count {
            self.restore();
        }
    }

    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform * Affine::translate(Vec2::new(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform * Affine::scale_non_uniform(sx, sy);
    }

    /// Intersect the clip with `rect` (local coordinates).
    pub fn clip_rect(&mut self, rect: Rect) {
        let device = self.state.transform.transform_rect_bbox(rect);
        self.state.clip = self.state.clip.intersect(device);
    }

    /// Overwrite every pixel, ignoring transform and clip.
    pub fn erase(&mut self, color: Argb) {
        self.pixels.erase(color);
    }

    /// Source-over fill of `rect` (local coordinates).
    pub fn fill_rect(&mut self, rect: Rect, color: Argb) {
        if color.alpha() == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.device_span(rect) else {
            return;
        };
        let src = color.to_rgba8();
        let width = self.pixels.width() as usize;
        let data = self.pixels.as_bytes_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y as usize) * width + (x as usize)) * 4;
                let out = over([data[i], data[i + 1], data[i + 2], data[i + 3]], src);
                data[i..i + 4].copy_from_slice(&out);
            }
        }
    }

    /// Scale-blit `src_rect` of `src` onto `dst_rect` (local coordinates), nearest sampling.
    pub fn draw_buffer(&mut self, src: &PixelBuffer, src_rect: Rect, dst_rect: Rect) {
        if src_rect.width() <= 0.0
            || src_rect.height() <= 0.0
            || dst_rect.width() <= 0.0
            || dst_rect.height() <= 0.0
        {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.device_span(dst_rect) else {
            return;
        };
        let inverse = self.state.transform.inverse();
        let sx = src_rect.width() / dst_rect.width();
        let sy = src_rect.height() / dst_rect.height();
        let max_x = src_rect.x1.min(f64::from(src.width())) - 1.0;
        let max_y = src_rect.y1.min(f64::from(src.height())) - 1.0;
        let min_x = src_rect.x0.max(0.0);
        let min_y = src_rect.y0.max(0.0);
        if max_x < min_x || max_y < min_y {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let local = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let u = (src_rect.x0 + (local.x - dst_rect.x0) * sx)
                    .floor()
                    .clamp(min_x, max_x);
                let v = (src_rect.y0 + (local.y - dst_rect.y0) * sy)
                    .floor()
                    .clamp(min_y, max_y);
                let Some(px) = src.pixel(u as u32, v as u32) else {
                    continue;
                };
                if let Some(dst) = self.pixels.pixel(x, y) {
                    self.pixels.put_pixel(x, y, over(dst, px));
                }
            }
        }
    }

    /// Device pixels whose centers fall inside the transformed, clipped `rect`.
    fn device_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let device = self
            .state
            .transform
            .transform_rect_bbox(rect)
            .intersect(self.state.clip);
        let w = f64::from(self.pixels.width());
        let h = f64::from(self.pixels.height());
        let x0 = (device.x0 - 0.5).ceil().clamp(0.0, w);
        let y0 = (device.y0 - 0.5).ceil().clamp(0.0, h);
        let x1 = (device.x1 - 0.5).ceil().clamp(0.0, w);
        let y1 = (device.y1 - 0.5).ceil().clamp(0.0, h);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/canvas.rs"]
mod tests;
