use crate::foundation::core::{Argb, Rect};
use crate::host::surface::{Content, SurfaceId, SurfaceTree};
use crate::overlay::capture::StopDraw;
use crate::overlay::set::OverlayId;
use crate::raster::canvas::Canvas;

/// Paints overlay nodes met during a traversal.
pub trait OverlayPainter {
    /// Draw overlay `id` at local `(0, 0)` with the given size.
    fn paint_overlay(
        &self,
        id: OverlayId,
        canvas: &mut Canvas,
        width: f64,
        height: f64,
    ) -> Result<(), StopDraw>;
}

/// Depth-first painter for a [`SurfaceTree`].
///
/// Each node draws its background, its content, then its children in order, so later siblings
/// end up on top. A [`StopDraw`] from an overlay ends the whole traversal; the canvas save stack is
/// still balanced for every node that was entered.
pub struct TreeRenderer<'a, P: OverlayPainter + ?Sized> {
    tree: &'a SurfaceTree,
    painter: &'a P,
}

impl<'a, P: OverlayPainter + ?Sized> TreeRenderer<'a, P> {
    pub fn new(tree: &'a SurfaceTree, painter: &'a P) -> Self {
        Self { tree, painter }
    }

    /// Paint `id` and its subtree at local `(0, 0)`.
    pub fn draw(&self, id: SurfaceId, canvas: &mut Canvas) -> Result<(), StopDraw> {
        self.draw_background(id, canvas)?;
        self.draw_contents(id, canvas)
    }

    pub fn draw_background(&self, id: SurfaceId, canvas: &mut Canvas) -> Result<(), StopDraw> {
        let Some(node) = self.tree.node(id) else {
            return Ok(());
        };
        if let Some(bg) = node.background
            && node.visible
        {
            canvas.fill_rect(local_bounds(node.frame), bg);
        }
        Ok(())
    }

    /// Paint the node's content and children, without its background.
    pub fn draw_contents(&self, id: SurfaceId, canvas: &mut Canvas) -> Result<(), StopDraw> {
        let Some(node) = self.tree.node(id) else {
            return Ok(());
        };
        if !node.visible {
            return Ok(());
        }
        let bounds = local_bounds(node.frame);

        match &node.content {
            Content::Empty => {}
            Content::Solid(color) => canvas.fill_rect(bounds, *color),
            Content::Checker { cell, a, b } => draw_checker(canvas, bounds, *cell, *a, *b),
            Content::Overlay(overlay) => {
                self.painter
                    .paint_overlay(*overlay, canvas, bounds.width(), bounds.height())?;
            }
        }

        if node.children().is_empty() {
            return Ok(());
        }
        let rc = canvas.save();
        if node.clip_children {
            canvas.clip_rect(bounds);
        }
        canvas.translate(-node.scroll.x, -node.scroll.y);
        let result = self.draw_children(node.children(), canvas);
        canvas.restore_to_count(rc);
        result
    }

    fn draw_children(&self, children: &[SurfaceId], canvas: &mut Canvas) -> Result<(), StopDraw> {
        for &child in children {
            let Some(node) = self.tree.node(child) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let rc = canvas.save();
            canvas.translate(node.frame.x0, node.frame.y0);
            let result = self.draw(child, canvas);
            canvas.restore_to_count(rc);
            result?;
        }
        Ok(())
    }
}

fn local_bounds(frame: Rect) -> Rect {
    Rect::new(0.0, 0.0, frame.width(), frame.height())
}

fn draw_checker(canvas: &mut Canvas, bounds: Rect, cell: f64, a: Argb, b: Argb) {
    if cell <= 0.0 {
        canvas.fill_rect(bounds, a);
        return;
    }
    let cols = (bounds.width() / cell).ceil() as u32;
    let rows = (bounds.height() / cell).ceil() as u32;
    for row in 0..rows {
        for col in 0..cols {
            let color = if (row + col) % 2 == 0 { a } else { b };
            let x0 = f64::from(col) * cell;
            let y0 = f64::from(row) * cell;
            let r = Rect::new(x0, y0, (x0 + cell).min(bounds.x1), (y0 + cell).min(bounds.y1));
            canvas.fill_rect(r, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/render.rs"]
mod tests;
