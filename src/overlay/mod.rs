//! The blur overlay: parameters, capture-buffer preparation and the draw entry point.

use crate::blur::{BlurAlgorithm, MAX_BLUR_RADIUS, create_blur_algorithm};
use crate::config::{OverlayConfig, validate_downsample_factor};
use crate::foundation::core::{Argb, DisplayMetrics};
use crate::foundation::error::BlurResult;
use crate::host::surface::SurfaceId;
use crate::overlay::capture::{RenderDepth, StopDraw};
use crate::overlay::composite::{BitmapThenTint, OverlayCompositor};
use crate::overlay::frame_buffers::{Ensured, FrameBufferOpts, FrameBufferStats, FrameBuffers};
use crate::raster::buffer::PixelBuffer;
use crate::raster::canvas::Canvas;
use std::cell::Cell;
use std::fmt;

pub(crate) mod capture;
pub(crate) mod composite;
pub(crate) mod frame_buffers;
pub(crate) mod set;

/// Owner-chain hops searched for a root container when an overlay is attached.
pub const ROOT_SEARCH_HOPS: usize = 4;

/// Geometry and radius for one capture pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapturePlan {
    /// Radius handed to [`BlurAlgorithm::prepare`], at most [`MAX_BLUR_RADIUS`].
    pub radius: i32,
    /// Effective downsample factor, raised above the configured one when the radius was capped.
    pub downsample_factor: f32,
    /// Capture buffer width, at least 1.
    pub width: u32,
    /// Capture buffer height, at least 1.
    pub height: u32,
}

impl CapturePlan {
    /// Plan a capture of a `width x height` overlay. `None` when `blur_radius` is 0.
    ///
    /// A radius that exceeds [`MAX_BLUR_RADIUS`] after downsampling is capped, and the factor is
    /// raised by the same ratio so the blur keeps its apparent strength on screen.
    pub fn compute(
        blur_radius: u32,
        downsample_factor: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        if blur_radius == 0 {
            return None;
        }
        let max = MAX_BLUR_RADIUS as f32;
        let mut factor = downsample_factor;
        let mut radius = blur_radius as f32 / factor;
        if radius > max {
            factor = factor * radius / max;
            radius = max;
        }
        Some(Self {
            radius: radius as i32,
            downsample_factor: factor,
            width: ((width as f32 / factor) as u32).max(1),
            height: ((height as f32 / factor) as u32).max(1),
        })
    }
}

/// Where an attached overlay captures from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootBinding {
    /// Root container whose content is captured and which carries the pre-paint hook.
    pub root: SurfaceId,
    /// The overlay lives under a different top-level surface than `root` (popup, dialog).
    pub different_root: bool,
}

/// A surface that shows a blurred, tinted copy of whatever lies beneath it.
pub struct BlurOverlay {
    blur_radius: u32,
    downsample_factor: f32,
    overlay_color: Argb,
    metrics: DisplayMetrics,
    algorithm: Box<dyn BlurAlgorithm>,
    compositor: Box<dyn OverlayCompositor>,
    buffers: FrameBuffers,
    dirty: bool,
    rendering: Cell<bool>,
    surface: Option<SurfaceId>,
    binding: Option<RootBinding>,
    repaint_requests: u64,
}

impl fmt::Debug for BlurOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlurOverlay")
            .field("blur_radius", &self.blur_radius)
            .field("downsample_factor", &self.downsample_factor)
            .field("overlay_color", &self.overlay_color)
            .field("algorithm", &self.algorithm.name())
            .field("dirty", &self.dirty)
            .field("surface", &self.surface)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl BlurOverlay {
    /// Build an overlay with the backend named in `config`.
    pub fn new(config: &OverlayConfig, metrics: DisplayMetrics) -> BlurResult<Self> {
        Self::with_algorithm(config, metrics, create_blur_algorithm(config.backend))
    }

    /// Build an overlay around a caller-supplied backend; `config.backend` is ignored.
    pub fn with_algorithm(
        config: &OverlayConfig,
        metrics: DisplayMetrics,
        algorithm: Box<dyn BlurAlgorithm>,
    ) -> BlurResult<Self> {
        config.validate()?;
        Ok(Self {
            blur_radius: metrics.dp_to_px(config.blur_radius),
            downsample_factor: config.downsample_factor,
            overlay_color: config.overlay_color,
            metrics,
            algorithm,
            compositor: Box::new(BitmapThenTint),
            buffers: FrameBuffers::new(FrameBufferOpts::default()),
            dirty: true,
            rendering: Cell::new(false),
            surface: None,
            binding: None,
            repaint_requests: 0,
        })
    }

    /// Replace how the blurred buffer and tint are drawn (default: [`BitmapThenTint`]).
    pub fn with_compositor(mut self, compositor: Box<dyn OverlayCompositor>) -> Self {
        self.compositor = compositor;
        self
    }

    /// Replace the buffer limits. Existing buffers are released.
    pub fn with_buffer_opts(mut self, opts: FrameBufferOpts) -> Self {
        self.buffers.release();
        self.buffers = FrameBuffers::new(opts);
        self
    }

    /// Blur radius in device pixels.
    pub fn blur_radius(&self) -> u32 {
        self.blur_radius
    }

    /// Configured capture resolution divisor, before any radius cap adjustment.
    pub fn downsample_factor(&self) -> f32 {
        self.downsample_factor
    }

    /// Tint drawn over the blurred image.
    pub fn overlay_color(&self) -> Argb {
        self.overlay_color
    }

    /// Parameters changed since the backend was last prepared successfully.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// `true` only while this overlay's own capture pass runs.
    pub fn is_rendering(&self) -> bool {
        self.rendering.get()
    }

    /// Surface node drawing this overlay, while attached.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Root container this overlay captures from; `None` when detached or no root was found.
    pub fn binding(&self) -> Option<RootBinding> {
        self.binding
    }

    /// Number of repaints this overlay has asked its host for.
    pub fn repaint_requests(&self) -> u64 {
        self.repaint_requests
    }

    /// Downsampled capture of the content beneath the overlay, if allocated.
    pub fn capture_buffer(&self) -> Option<&PixelBuffer> {
        self.buffers.capture()
    }

    /// Latest blur output, drawn by [`BlurOverlay::draw`].
    pub fn blurred_buffer(&self) -> Option<&PixelBuffer> {
        self.buffers.blurred()
    }

    /// Active buffer limits.
    pub fn buffer_opts(&self) -> FrameBufferOpts {
        self.buffers.opts()
    }

    /// Allocation and release counters for this overlay's buffers.
    pub fn buffer_stats(&self) -> FrameBufferStats {
        self.buffers.stats()
    }

    /// Set the blur radius in device pixels; 0 disables blurring.
    pub fn set_blur_radius(&mut self, radius: u32) {
        if self.blur_radius != radius {
            self.blur_radius = radius;
            self.dirty = true;
            self.request_repaint();
        }
    }

    /// Set the downsample factor. Values `<= 0` (or non-finite) are rejected without any change.
    pub fn set_downsample_factor(&mut self, factor: f32) -> BlurResult<()> {
        validate_downsample_factor(factor)?;
        if self.downsample_factor != factor {
            self.downsample_factor = factor;
            // The effective radius depends on the factor as well.
            self.dirty = true;
            self.buffers.release();
            self.request_repaint();
        }
        Ok(())
    }

    /// Set the tint. Repaints only when the color actually changes.
    pub fn set_overlay_color(&mut self, color: Argb) {
        if self.overlay_color != color {
            self.overlay_color = color;
            self.request_repaint();
        }
    }

    /// Free buffers and backend resources. Idempotent.
    pub fn release(&mut self) {
        self.buffers.release();
        self.algorithm.release();
    }

    /// Draw entry point, called by the host's tree traversal.
    ///
    /// While this overlay's own capture pass is running it refuses to draw and returns
    /// [`StopDraw`], which unwinds the traversal back to that capture pass.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        width: f64,
        height: f64,
        depth: &RenderDepth,
    ) -> Result<(), StopDraw> {
        if self.rendering.get() {
            return Err(StopDraw);
        }
        if depth.get() > 0 {
            // Blur overlays stacked over each other are not supported: the one being captured
            // sees this overlay's previous frame.
            tracing::trace!("overlay drawn inside another overlay's capture");
        }
        self.compositor.composite(
            canvas,
            self.buffers.blurred(),
            self.overlay_color,
            width,
            height,
        );
        Ok(())
    }

    /// Ready buffers and backend for a `width x height` capture.
    ///
    /// `None` means no blur this frame: radius 0 (all buffers released), buffer allocation failed
    /// (all buffers released), or the backend refused the configuration (dirty stays set).
    pub(crate) fn prepare(&mut self, width: u32, height: u32) -> Option<CapturePlan> {
        let Some(plan) = CapturePlan::compute(
            self.blur_radius,
            self.downsample_factor,
            width,
            height,
        ) else {
            self.release();
            return None;
        };

        match self.buffers.ensure(plan.width, plan.height) {
            Ok(Ensured::Reused) => {}
            Ok(Ensured::Allocated) => self.dirty = true,
            Err(err) => {
                tracing::warn!(%err, "capture buffer unavailable; drawing tint only");
                self.release();
                return None;
            }
        }

        if self.dirty {
            if !self.algorithm.prepare(&self.metrics, plan.radius) {
                tracing::trace!(
                    backend = self.algorithm.name(),
                    radius = plan.radius,
                    "blur backend not prepared"
                );
                return None;
            }
            self.dirty = false;
        }
        Some(plan)
    }

    pub(crate) fn rendering_flag(&self) -> &Cell<bool> {
        &self.rendering
    }

    pub(crate) fn take_capture(&mut self) -> Option<Canvas> {
        self.buffers.take_capture()
    }

    /// Blur the finished capture, store the result and ask for a repaint.
    pub(crate) fn finish_capture(&mut self, canvas: Canvas) {
        let blurred = self.algorithm.blur(canvas.pixels());
        self.buffers.restore_capture(canvas);
        self.buffers.set_blurred(blurred);
        self.request_repaint();
    }

    pub(crate) fn on_attached(&mut self, surface: SurfaceId, binding: Option<RootBinding>) {
        self.surface = Some(surface);
        self.binding = binding;
    }

    pub(crate) fn on_detached(&mut self) {
        self.surface = None;
        self.binding = None;
        self.release();
    }

    fn request_repaint(&mut self) {
        self.repaint_requests = self.repaint_requests.saturating_add(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mod.rs"]
mod tests;
