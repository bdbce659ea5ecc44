//! Headless host: a surface tree, the overlays living in it, and a frame driver.
//!
//! A frame runs every registered pre-paint hook (each overlay captures and blurs what lies
//! beneath it), then paints each top-level surface into its own buffer.

use crate::foundation::core::{Argb, Rect};
use crate::foundation::error::{BlurError, BlurResult};
use crate::host::render::TreeRenderer;
use crate::host::surface::{Content, SurfaceId, SurfaceTree};
use crate::overlay::capture::{CaptureOutcome, OverlayDraw, RenderDepth, capture_overlay};
use crate::overlay::set::{OverlayId, OverlaySet};
use crate::overlay::{BlurOverlay, ROOT_SEARCH_HOPS, RootBinding};
use crate::raster::buffer::PixelBuffer;
use crate::raster::canvas::Canvas;
use std::collections::HashMap;

pub(crate) mod render;
pub(crate) mod surface;

/// Summary of one [`Host::run_frame`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Pre-paint hooks fired.
    pub hooks: usize,
    /// Overlays that captured and blurred this frame.
    pub captures: usize,
    /// Captures whose traversal stopped at the capturing overlay.
    pub stopped_at_overlay: usize,
    /// Top-level surfaces painted.
    pub painted: usize,
}

/// Headless frame driver: owns the surface tree, the overlays and one canvas per top-level surface.
#[derive(Default)]
pub struct Host {
    tree: SurfaceTree,
    overlays: OverlaySet,
    depth: RenderDepth,
    surfaces: HashMap<SurfaceId, Canvas>,
    frames: u64,
}

impl Host {
    /// Host with an empty surface tree and no overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface tree being painted.
    pub fn tree(&self) -> &SurfaceTree {
        &self.tree
    }

    /// Mutable tree access for building and scrolling content. Attach overlays through
    /// [`Host::attach_overlay`] so their hooks get registered.
    pub fn tree_mut(&mut self) -> &mut SurfaceTree {
        &mut self.tree
    }

    /// An attached overlay.
    pub fn overlay(&self, id: OverlayId) -> Option<&BlurOverlay> {
        self.overlays.get(id)
    }

    /// An attached overlay, for the setters.
    pub fn overlay_mut(&mut self, id: OverlayId) -> Option<&mut BlurOverlay> {
        self.overlays.get_mut(id)
    }

    /// Capture passes currently in flight; 0 between frames.
    pub fn render_depth(&self) -> u32 {
        self.depth.get()
    }

    /// Frames completed by [`Host::run_frame`].
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Insert `overlay` as the topmost child of `parent` and bind it to its root container.
    ///
    /// When no root container is reachable the overlay stays unbound and never blurs. When the
    /// root lives under another top-level surface it is invalidated, since nothing else would tell
    /// it that an overlay now depends on its content.
    pub fn attach_overlay(
        &mut self,
        parent: SurfaceId,
        frame: Rect,
        overlay: BlurOverlay,
    ) -> BlurResult<(SurfaceId, OverlayId)> {
        let id = self.overlays.insert(overlay);
        let surface = match self.tree.add_child(parent, frame, Content::Overlay(id)) {
            Ok(s) => s,
            Err(err) => {
                self.overlays.remove(id);
                return Err(err);
            }
        };

        let binding = self
            .tree
            .find_root_container(surface, ROOT_SEARCH_HOPS)
            .map(|root| {
                let different_root = self.tree.top_level(root) != self.tree.top_level(surface);
                RootBinding {
                    root,
                    different_root,
                }
            });
        match binding {
            Some(b) => {
                self.tree.add_pre_paint_hook(b.root, id);
                if b.different_root {
                    self.tree.invalidate(b.root);
                }
                tracing::debug!(?surface, root = ?b.root, different_root = b.different_root, "overlay attached");
            }
            None => tracing::debug!(?surface, "overlay attached without a root container"),
        }

        if let Some(o) = self.overlays.get_mut(id) {
            o.on_attached(surface, binding);
        }
        Ok((surface, id))
    }

    /// Unhook and release `id`, remove its surface, and hand the overlay back.
    pub fn detach_overlay(&mut self, id: OverlayId) -> Option<BlurOverlay> {
        let mut overlay = self.overlays.remove(id)?;
        if let Some(b) = overlay.binding() {
            self.tree.remove_pre_paint_hook(b.root, id);
        }
        if let Some(surface) = overlay.surface() {
            self.tree.remove(surface);
            self.surfaces.remove(&surface);
        }
        overlay.on_detached();
        tracing::debug!(?id, "overlay detached");
        Some(overlay)
    }

    /// Remove a surface subtree, detaching any overlays inside it first.
    pub fn remove_surface(&mut self, id: SurfaceId) {
        let mut overlays = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.tree.node(cur) else {
                continue;
            };
            if let Content::Overlay(o) = node.content {
                overlays.push(o);
            }
            stack.extend_from_slice(node.children());
        }
        for o in overlays {
            self.detach_overlay(o);
        }
        self.tree.remove(id);
        self.surfaces.remove(&id);
    }

    /// Run pre-paint hooks, then paint every visible top-level surface.
    pub fn run_frame(&mut self) -> FrameStats {
        let mut stats = FrameStats::default();

        for (_, overlay) in self.tree.pre_paint_hooks() {
            stats.hooks += 1;
            match capture_overlay(overlay, &self.tree, &mut self.overlays, &self.depth) {
                CaptureOutcome::Skipped => {}
                CaptureOutcome::Captured { stopped_at_overlay } => {
                    stats.captures += 1;
                    if stopped_at_overlay {
                        stats.stopped_at_overlay += 1;
                    }
                }
            }
        }

        for top in self.tree.top_levels().to_vec() {
            match self.paint_surface(top) {
                Ok(true) => stats.painted += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(%err, ?top, "surface not painted"),
            }
        }

        self.frames = self.frames.saturating_add(1);
        stats
    }

    /// Pixels of a painted top-level surface.
    pub fn surface_pixels(&self, id: SurfaceId) -> Option<&PixelBuffer> {
        self.surfaces.get(&id).map(Canvas::pixels)
    }

    /// Stack every visible top-level surface, bottom first, into one `width x height` screen.
    pub fn compose_screen(&self, width: u32, height: u32) -> BlurResult<PixelBuffer> {
        let mut screen = Canvas::try_new(width, height)?;
        screen.erase(Argb::BLACK);
        for &top in self.tree.top_levels() {
            let (Some(node), Some(pixels)) = (self.tree.node(top), self.surface_pixels(top)) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let src = Rect::new(
                0.0,
                0.0,
                f64::from(pixels.width()),
                f64::from(pixels.height()),
            );
            screen.draw_buffer(pixels, src, node.frame);
        }
        Ok(screen.into_pixels())
    }

    fn paint_surface(&mut self, id: SurfaceId) -> BlurResult<bool> {
        let Some(node) = self.tree.node(id) else {
            return Ok(false);
        };
        if !node.visible {
            return Ok(false);
        }
        let (width, height) = self.tree.size_px(id);
        if width == 0 || height == 0 {
            return Ok(false);
        }

        let reuse = self
            .surfaces
            .get(&id)
            .is_some_and(|c| c.width() == width && c.height() == height);
        if !reuse {
            self.surfaces.remove(&id);
            self.surfaces.insert(id, Canvas::try_new(width, height)?);
        }
        let canvas = self
            .surfaces
            .get_mut(&id)
            .ok_or_else(|| BlurError::allocation(width, height))?;
        canvas.erase(Argb::TRANSPARENT);

        let painter = OverlayDraw {
            overlays: &self.overlays,
            depth: &self.depth,
        };
        if TreeRenderer::new(&self.tree, &painter)
            .draw(id, canvas)
            .is_err()
        {
            // Only an overlay in the middle of its own capture refuses to draw, and none is.
            tracing::warn!(?id, "paint pass stopped early");
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/mod.rs"]
mod tests;
