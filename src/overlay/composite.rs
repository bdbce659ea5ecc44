use crate::foundation::core::{Argb, Rect};
use crate::raster::buffer::PixelBuffer;
use crate::raster::canvas::Canvas;

/// Draws an overlay's visible pixels from its latest blurred buffer and tint.
///
/// An overlay owns exactly one compositor, chosen when it is built. Implement this to give the
/// overlay a custom shape (inset, clipped, partially tinted); [`BitmapThenTint`] is the default.
pub trait OverlayCompositor {
    /// Draw at local `(0, 0)` over a `width x height` extent. `blurred` is `None` when blurring was
    /// unavailable this frame.
    fn composite(
        &self,
        canvas: &mut Canvas,
        blurred: Option<&PixelBuffer>,
        overlay_color: Argb,
        width: f64,
        height: f64,
    );
}

/// Stretch the blurred buffer over the full extent, then blend the tint on top.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapThenTint;

impl OverlayCompositor for BitmapThenTint {
    fn composite(
        &self,
        canvas: &mut Canvas,
        blurred: Option<&PixelBuffer>,
        overlay_color: Argb,
        width: f64,
        height: f64,
    ) {
        composite(canvas, blurred, overlay_color, width, height);
    }
}

/// Draw the overlay's visible pixels into `canvas` at local `(0, 0)`.
///
/// The blurred buffer (if any) is stretched over the whole `width x height` extent first, then the
/// tint is blended on top. Without a blurred buffer only the tint is drawn.
pub fn composite(
    canvas: &mut Canvas,
    blurred: Option<&PixelBuffer>,
    overlay_color: Argb,
    width: f64,
    height: f64,
) {
    let dst = Rect::new(0.0, 0.0, width, height);
    if let Some(b) = blurred {
        let src = Rect::new(0.0, 0.0, f64::from(b.width()), f64::from(b.height()));
        canvas.draw_buffer(b, src, dst);
    }
    canvas.fill_rect(dst, overlay_color);
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
