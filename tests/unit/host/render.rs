use super::*;
use crate::foundation::core::Vec2;
use std::cell::RefCell;

/// Fills overlays with a flat color and records the call order.
struct Recorder {
    calls: RefCell<Vec<OverlayId>>,
    stop_at: Option<OverlayId>,
}

impl Recorder {
    fn new(stop_at: Option<OverlayId>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            stop_at,
        }
    }
}

impl OverlayPainter for Recorder {
    fn paint_overlay(
        &self,
        id: OverlayId,
        canvas: &mut Canvas,
        width: f64,
        height: f64,
    ) -> Result<(), StopDraw> {
        self.calls.borrow_mut().push(id);
        if self.stop_at == Some(id) {
            return Err(StopDraw);
        }
        canvas.fill_rect(Rect::new(0.0, 0.0, width, height), Argb(0xFFFF_FF00));
        Ok(())
    }
}

const RED: Argb = Argb(0xFFFF_0000);
const GREEN: Argb = Argb(0xFF00_FF00);

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

#[test]
fn later_siblings_paint_on_top() {
    let mut t = SurfaceTree::new();
    let win = t.add_top_level(rect(0.0, 0.0, 4.0, 4.0), None, true);
    t.node_mut(win).unwrap().background = Some(Argb::BLACK);
    t.add_child(win, rect(0.0, 0.0, 4.0, 4.0), Content::Solid(RED)).unwrap();
    t.add_child(win, rect(2.0, 0.0, 2.0, 4.0), Content::Solid(GREEN)).unwrap();

    let mut c = Canvas::try_new(4, 4).unwrap();
    let p = Recorder::new(None);
    TreeRenderer::new(&t, &p).draw(win, &mut c).unwrap();
    assert_eq!(c.pixels().pixel(0, 0), Some(RED.to_rgba8()));
    assert_eq!(c.pixels().pixel(3, 0), Some(GREEN.to_rgba8()));
}

#[test]
fn stop_ends_traversal_and_balances_save_stack() {
    let mut t = SurfaceTree::new();
    let win = t.add_top_level(rect(0.0, 0.0, 4.0, 4.0), None, true);
    let group = t.add_child(win, rect(0.0, 0.0, 4.0, 4.0), Content::Empty).unwrap();
    t.add_child(group, rect(0.0, 0.0, 4.0, 4.0), Content::Overlay(OverlayId(0)))
        .unwrap();
    t.add_child(group, rect(0.0, 0.0, 4.0, 4.0), Content::Overlay(OverlayId(1)))
        .unwrap();
    t.add_child(win, rect(0.0, 0.0, 4.0, 4.0), Content::Solid(RED)).unwrap();

    let mut c = Canvas::try_new(4, 4).unwrap();
    let before = c.save_count();
    let p = Recorder::new(Some(OverlayId(0)));
    let result = TreeRenderer::new(&t, &p).draw(win, &mut c);

    assert_eq!(result, Err(StopDraw));
    assert_eq!(*p.calls.borrow(), vec![OverlayId(0)]);
    assert_eq!(c.save_count(), before);
    assert_eq!(c.transform(), crate::foundation::core::Affine::IDENTITY);
    // Nothing after the stop was painted.
    assert_eq!(c.pixels().pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn hidden_nodes_and_their_children_are_skipped() {
    let mut t = SurfaceTree::new();
    let win = t.add_top_level(rect(0.0, 0.0, 4.0, 4.0), None, true);
    let group = t.add_child(win, rect(0.0, 0.0, 4.0, 4.0), Content::Solid(RED)).unwrap();
    t.add_child(group, rect(0.0, 0.0, 4.0, 4.0), Content::Overlay(OverlayId(3)))
        .unwrap();
    t.set_visible(group, false);

    let mut c = Canvas::try_new(4, 4).unwrap();
    let p = Recorder::new(None);
    TreeRenderer::new(&t, &p).draw(win, &mut c).unwrap();
    assert!(p.calls.borrow().is_empty());
    assert_eq!(c.pixels().pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn children_are_clipped_and_scrolled() {
    let mut t = SurfaceTree::new();
    let win = t.add_top_level(rect(0.0, 0.0, 8.0, 8.0), None, true);
    let list = t.add_child(win, rect(0.0, 2.0, 8.0, 4.0), Content::Empty).unwrap();
    t.node_mut(list).unwrap().clip_children = true;
    t.add_child(list, rect(0.0, 0.0, 8.0, 2.0), Content::Solid(RED)).unwrap();
    t.add_child(list, rect(0.0, 2.0, 8.0, 8.0), Content::Solid(GREEN)).unwrap();
    t.set_scroll(list, Vec2::new(0.0, 1.0));

    let mut c = Canvas::try_new(8, 8).unwrap();
    let p = Recorder::new(None);
    TreeRenderer::new(&t, &p).draw(win, &mut c).unwrap();

    assert_eq!(c.pixels().pixel(0, 1), Some([0, 0, 0, 0]));
    assert_eq!(c.pixels().pixel(0, 2), Some(RED.to_rgba8()));
    assert_eq!(c.pixels().pixel(0, 3), Some(GREEN.to_rgba8()));
    assert_eq!(c.pixels().pixel(0, 5), Some(GREEN.to_rgba8()));
    // Clipped to the list's bounds.
    assert_eq!(c.pixels().pixel(0, 6), Some([0, 0, 0, 0]));
}

#[test]
fn checker_alternates_cells() {
    let mut t = SurfaceTree::new();
    let win = t.add_top_level(rect(0.0, 0.0, 4.0, 4.0), None, true);
    t.add_child(
        win,
        rect(0.0, 0.0, 4.0, 4.0),
        Content::Checker {
            cell: 2.0,
            a: RED,
            b: GREEN,
        },
    )
    .unwrap();

    let mut c = Canvas::try_new(4, 4).unwrap();
    let p = Recorder::new(None);
    TreeRenderer::new(&t, &p).draw(win, &mut c).unwrap();
    assert_eq!(c.pixels().pixel(0, 0), Some(RED.to_rgba8()));
    assert_eq!(c.pixels().pixel(2, 0), Some(GREEN.to_rgba8()));
    assert_eq!(c.pixels().pixel(2, 2), Some(RED.to_rgba8()));
}
