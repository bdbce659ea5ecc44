use super::*;
use crate::config::OverlayConfig;
use crate::foundation::core::DisplayMetrics;

fn overlay() -> BlurOverlay {
    BlurOverlay::new(&OverlayConfig::default(), DisplayMetrics::default()).unwrap()
}

#[test]
fn removed_ids_stay_retired() {
    let mut set = OverlaySet::new();
    let a = set.insert(overlay());
    assert!(set.remove(a).is_some());
    let b = set.insert(overlay());
    assert_ne!(a, b);
    assert!(set.get(a).is_none());
    assert!(set.get(b).is_some());
}

#[test]
fn len_tracks_inserts_and_removals() {
    let mut set = OverlaySet::new();
    assert!(set.is_empty());
    let a = set.insert(overlay());
    let b = set.insert(overlay());
    assert_eq!(set.len(), 2);

    assert!(set.remove(a).is_some());
    assert!(set.remove(a).is_none());
    assert_eq!(set.len(), 1);

    assert!(set.remove(b).is_some());
    assert!(set.is_empty());
}
