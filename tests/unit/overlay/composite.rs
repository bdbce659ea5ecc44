use super::*;
use crate::raster::blend::over;

const TINT: Argb = Argb(0x8000_00FF);

#[test]
fn tint_only_without_blurred_buffer() {
    let mut c = Canvas::try_new(4, 4).unwrap();
    c.erase(Argb(0xFF00_FF00));
    composite(&mut c, None, TINT, 4.0, 4.0);
    let expected = over([0, 255, 0, 255], TINT.to_rgba8());
    assert_eq!(c.pixels().pixel(2, 2), Some(expected));
}

#[test]
fn blurred_buffer_is_stretched_then_tinted() {
    let mut blurred = PixelBuffer::try_new(2, 2).unwrap();
    blurred.erase(Argb(0xFFFF_0000));
    blurred.put_pixel(1, 1, [255, 255, 0, 255]);

    let mut c = Canvas::try_new(8, 8).unwrap();
    composite(&mut c, Some(&blurred), TINT, 8.0, 8.0);

    let red_tinted = over([255, 0, 0, 255], TINT.to_rgba8());
    let yellow_tinted = over([255, 255, 0, 255], TINT.to_rgba8());
    assert_eq!(c.pixels().pixel(0, 0), Some(red_tinted));
    assert_eq!(c.pixels().pixel(3, 3), Some(red_tinted));
    assert_eq!(c.pixels().pixel(4, 4), Some(yellow_tinted));
    assert_eq!(c.pixels().pixel(7, 7), Some(yellow_tinted));
    // Never the reverse order.
    assert_ne!(
        c.pixels().pixel(0, 0),
        Some(over(TINT.to_rgba8(), [255, 0, 0, 255]))
    );
}

#[test]
fn composite_respects_canvas_transform() {
    let mut c = Canvas::try_new(4, 4).unwrap();
    c.translate(2.0, 2.0);
    composite(&mut c, None, Argb(0xFFFF_FFFF), 2.0, 2.0);
    assert_eq!(c.pixels().pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(c.pixels().pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(c.pixels().pixel(3, 3), Some([255, 255, 255, 255]));
}
