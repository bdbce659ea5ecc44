use super::*;
use crate::config::OverlayConfig;
use crate::foundation::core::DisplayMetrics;

fn overlay() -> BlurOverlay {
    BlurOverlay::new(&OverlayConfig::default(), DisplayMetrics::default()).unwrap()
}

#[test]
fn attach_binds_to_window_and_registers_hook() {
    let mut host = Host::new();
    let win = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, 40.0, 40.0), None, true);
    let (surface, id) = host
        .attach_overlay(win, Rect::new(0.0, 0.0, 40.0, 10.0), overlay())
        .unwrap();

    let o = host.overlay(id).unwrap();
    assert_eq!(o.surface(), Some(surface));
    assert_eq!(
        o.binding(),
        Some(RootBinding {
            root: win,
            different_root: false
        })
    );
    assert_eq!(host.tree().node(win).unwrap().pre_paint_hooks(), &[id]);
    assert_eq!(host.tree().node(win).unwrap().invalidations(), 0);
}

#[test]
fn attach_to_unknown_parent_fails_cleanly() {
    let mut host = Host::new();
    let err = host
        .attach_overlay(SurfaceId(9), Rect::new(0.0, 0.0, 1.0, 1.0), overlay())
        .unwrap_err();
    assert!(matches!(err, BlurError::Validation(_)));
}

#[test]
fn unbound_overlay_has_no_hook() {
    let mut host = Host::new();
    let win = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, 40.0, 40.0), None, false);
    let (_, id) = host
        .attach_overlay(win, Rect::new(0.0, 0.0, 40.0, 10.0), overlay())
        .unwrap();
    assert_eq!(host.overlay(id).unwrap().binding(), None);
    assert!(host.tree().pre_paint_hooks().is_empty());

    let stats = host.run_frame();
    assert_eq!(stats.hooks, 0);
    assert_eq!(stats.painted, 1);
}

#[test]
fn detach_unhooks_and_releases() {
    let mut host = Host::new();
    let win = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, 40.0, 40.0), None, true);
    let (surface, id) = host
        .attach_overlay(win, Rect::new(0.0, 0.0, 40.0, 40.0), overlay())
        .unwrap();
    host.run_frame();
    assert!(host.overlay(id).unwrap().capture_buffer().is_some());

    let detached = host.detach_overlay(id).unwrap();
    assert!(detached.capture_buffer().is_none());
    assert!(detached.blurred_buffer().is_none());
    assert_eq!(detached.surface(), None);
    assert!(host.tree().node(surface).is_none());
    assert!(host.tree().pre_paint_hooks().is_empty());
    assert!(host.detach_overlay(id).is_none());
}

#[test]
fn removing_a_subtree_detaches_its_overlays() {
    let mut host = Host::new();
    let win = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, 40.0, 40.0), None, true);
    let group = host
        .tree_mut()
        .add_child(win, Rect::new(0.0, 0.0, 40.0, 40.0), Content::Empty)
        .unwrap();
    let (_, id) = host
        .attach_overlay(group, Rect::new(0.0, 0.0, 40.0, 40.0), overlay())
        .unwrap();

    host.remove_surface(group);
    assert!(host.overlay(id).is_none());
    assert!(host.tree().pre_paint_hooks().is_empty());
}

#[test]
fn frame_paints_every_visible_window() {
    let mut host = Host::new();
    let a = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, 4.0, 4.0), None, true);
    let b = host
        .tree_mut()
        .add_top_level(Rect::new(4.0, 0.0, 8.0, 4.0), None, false);
    host.tree_mut().node_mut(a).unwrap().background = Some(Argb(0xFFFF_0000));
    host.tree_mut().node_mut(b).unwrap().background = Some(Argb(0xFF00_FF00));

    let stats = host.run_frame();
    assert_eq!(stats.painted, 2);
    assert_eq!(host.frames(), 1);

    let screen = host.compose_screen(8, 4).unwrap();
    assert_eq!(screen.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(screen.pixel(6, 1), Some([0, 255, 0, 255]));

    host.tree_mut().set_visible(b, false);
    assert_eq!(host.run_frame().painted, 1);
    let screen = host.compose_screen(8, 4).unwrap();
    assert_eq!(screen.pixel(6, 1), Some([0, 0, 0, 255]));
}
