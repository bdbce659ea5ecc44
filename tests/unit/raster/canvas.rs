use super::*;

const RED: Argb = Argb(0xFFFF_0000);
const BLUE: Argb = Argb(0xFF00_00FF);

#[test]
fn fill_rect_covers_pixel_centers_only() {
    let mut c = Canvas::try_new(4, 4).unwrap();
    c.fill_rect(Rect::new(1.0, 1.0, 3.0, 3.0), RED);
    assert_eq!(c.pixels().pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(c.pixels().pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(c.pixels().pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(c.pixels().pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn scale_then_translate_maps_local_space() {
    let mut c = Canvas::try_new(4, 4).unwrap();
    c.scale(0.5, 0.5);
    c.translate(-4.0, 0.0);
    // Local x in [4, 8) lands on device x in [0, 2).
    c.fill_rect(Rect::new(4.0, 0.0, 8.0, 2.0), RED);
    assert_eq!(c.pixels().pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(c.pixels().pixel(1, 0), Some([255, 0, 0, 255]));
    assert_eq!(c.pixels().pixel(2, 0), Some([0, 0, 0, 0]));
    assert_eq!(c.pixels().pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn restore_to_count_unwinds_nested_saves() {
    let mut c = Canvas::try_new(2, 2).unwrap();
    let rc = c.save();
    c.translate(5.0, 5.0);
    c.save();
    c.scale(2.0, 2.0);
    assert_eq!(c.save_count(), 2);

    c.restore_to_count(rc);
    assert_eq!(c.save_count(), 0);
    assert_eq!(c.transform(), Affine::IDENTITY);
}

#[test]
fn restore_on_empty_stack_is_a_no_op() {
    let mut c = Canvas::try_new(1, 1).unwrap();
    c.translate(1.0, 0.0);
    c.restore();
    assert_eq!(c.transform(), Affine::translate((1.0, 0.0)));
}

#[test]
fn clip_limits_fills_until_restored() {
    let mut c = Canvas::try_new(4, 1).unwrap();
    let rc = c.save();
    c.clip_rect(Rect::new(0.0, 0.0, 2.0, 1.0));
    c.fill_rect(Rect::new(0.0, 0.0, 4.0, 1.0), RED);
    c.restore_to_count(rc);
    c.fill_rect(Rect::new(3.0, 0.0, 4.0, 1.0), BLUE);

    assert_eq!(c.pixels().pixel(1, 0), Some([255, 0, 0, 255]));
    assert_eq!(c.pixels().pixel(2, 0), Some([0, 0, 0, 0]));
    assert_eq!(c.pixels().pixel(3, 0), Some([0, 0, 255, 255]));
}

#[test]
fn draw_buffer_upscales_with_nearest_sampling() {
    let mut src = PixelBuffer::try_new(2, 1).unwrap();
    src.put_pixel(0, 0, [255, 0, 0, 255]);
    src.put_pixel(1, 0, [0, 0, 255, 255]);

    let mut c = Canvas::try_new(4, 2).unwrap();
    c.draw_buffer(
        &src,
        Rect::new(0.0, 0.0, 2.0, 1.0),
        Rect::new(0.0, 0.0, 4.0, 2.0),
    );
    for y in 0..2 {
        assert_eq!(c.pixels().pixel(0, y), Some([255, 0, 0, 255]));
        assert_eq!(c.pixels().pixel(1, y), Some([255, 0, 0, 255]));
        assert_eq!(c.pixels().pixel(2, y), Some([0, 0, 255, 255]));
        assert_eq!(c.pixels().pixel(3, y), Some([0, 0, 255, 255]));
    }
}

#[test]
fn transparent_fill_is_skipped() {
    let mut c = Canvas::try_new(1, 1).unwrap();
    c.erase(RED);
    c.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), RED.without_alpha());
    assert_eq!(c.pixels().pixel(0, 0), Some([255, 0, 0, 255]));
}
