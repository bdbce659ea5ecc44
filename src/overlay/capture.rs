use crate::host::render::{OverlayPainter, TreeRenderer};
use crate::host::surface::SurfaceTree;
use crate::overlay::BlurOverlay;
use crate::overlay::set::{OverlayId, OverlaySet};
use crate::raster::canvas::Canvas;
use std::cell::Cell;

/// Signal returned by an overlay's draw entry point when it is reached during its own capture.
///
/// It only travels through the tree traversal and is consumed by [`capture_overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopDraw;

/// Count of capture passes in flight, shared by every overlay of one host.
#[derive(Debug, Default)]
pub struct RenderDepth {
    count: Cell<u32>,
}

impl RenderDepth {
    /// Counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture passes currently running.
    pub fn get(&self) -> u32 {
        self.count.get()
    }

    fn enter(&self) {
        self.count.set(self.count.get().saturating_add(1));
    }

    fn leave(&self) {
        let n = self.count.get();
        debug_assert!(n > 0, "render depth underflow");
        self.count.set(n.saturating_sub(1));
    }
}

/// Marks one overlay as rendering and bumps the shared depth until dropped.
pub(crate) struct RenderingScope<'a> {
    rendering: &'a Cell<bool>,
    depth: &'a RenderDepth,
}

impl<'a> RenderingScope<'a> {
    pub(crate) fn enter(overlay: &'a BlurOverlay, depth: &'a RenderDepth) -> Self {
        let rendering = overlay.rendering_flag();
        rendering.set(true);
        depth.enter();
        Self { rendering, depth }
    }
}

impl Drop for RenderingScope<'_> {
    fn drop(&mut self) {
        self.rendering.set(false);
        self.depth.leave();
    }
}

/// Routes overlay nodes met during a traversal to [`BlurOverlay::draw`].
pub(crate) struct OverlayDraw<'a> {
    pub(crate) overlays: &'a OverlaySet,
    pub(crate) depth: &'a RenderDepth,
}

impl OverlayPainter for OverlayDraw<'_> {
    fn paint_overlay(
        &self,
        id: OverlayId,
        canvas: &mut Canvas,
        width: f64,
        height: f64,
    ) -> Result<(), StopDraw> {
        match self.overlays.get(id) {
            Some(overlay) => overlay.draw(canvas, width, height, self.depth),
            None => Ok(()),
        }
    }
}

/// What a pre-paint hook did for one overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No capture this frame (detached, unbound, hidden, blur disabled or unavailable).
    Skipped,
    /// Content beneath the overlay was captured and handed to the backend.
    Captured {
        /// The traversal reached the overlay itself and stopped there.
        stopped_at_overlay: bool,
    },
}

/// Capture what lies beneath overlay `id` into its buffer, then blur it.
///
/// The root's background and content tree are rendered, scaled down to the capture buffer and
/// offset so the buffer covers exactly the overlay's screen rectangle. The traversal stops as soon
/// as it reaches the overlay; content stacked above it is never captured.
#[tracing::instrument(level = "trace", skip(tree, overlays, depth))]
pub(crate) fn capture_overlay(
    id: OverlayId,
    tree: &SurfaceTree,
    overlays: &mut OverlaySet,
    depth: &RenderDepth,
) -> CaptureOutcome {
    let Some(overlay) = overlays.get_mut(id) else {
        return CaptureOutcome::Skipped;
    };
    let (Some(surface), Some(binding)) = (overlay.surface(), overlay.binding()) else {
        return CaptureOutcome::Skipped;
    };
    if !tree.is_shown(surface) {
        tracing::trace!("overlay hidden; skipping capture");
        return CaptureOutcome::Skipped;
    }
    let (width, height) = tree.size_px(surface);
    let Some(plan) = overlay.prepare(width, height) else {
        return CaptureOutcome::Skipped;
    };
    let (Some(root_origin), Some(overlay_origin)) = (
        tree.location_on_screen(binding.root),
        tree.location_on_screen(surface),
    ) else {
        return CaptureOutcome::Skipped;
    };
    let offset = overlay_origin - root_origin;
    let erase_color = overlay.overlay_color().without_alpha();
    let Some(mut canvas) = overlay.take_capture() else {
        return CaptureOutcome::Skipped;
    };

    canvas.erase(erase_color);
    let rc = canvas.save();
    let shared: &OverlaySet = &*overlays;
    let traversal = match shared.get(id) {
        Some(overlay) => {
            let _scope = RenderingScope::enter(overlay, depth);
            canvas.scale(
                f64::from(plan.width) / f64::from(width.max(1)),
                f64::from(plan.height) / f64::from(height.max(1)),
            );
            canvas.translate(-offset.x, -offset.y);

            let painter = OverlayDraw {
                overlays: shared,
                depth,
            };
            let renderer = TreeRenderer::new(tree, &painter);
            renderer
                .draw_background(binding.root, &mut canvas)
                .and_then(|()| renderer.draw_contents(binding.root, &mut canvas))
        }
        None => Ok(()),
    };
    canvas.restore_to_count(rc);

    let Some(overlay) = overlays.get_mut(id) else {
        return CaptureOutcome::Skipped;
    };
    overlay.finish_capture(canvas);
    CaptureOutcome::Captured {
        stopped_at_overlay: traversal.is_err(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/capture.rs"]
mod tests;
