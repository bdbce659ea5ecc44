use super::*;

#[test]
fn new_buffer_is_transparent() {
    let b = PixelBuffer::try_new(3, 2).unwrap();
    assert_eq!(b.as_bytes().len(), 3 * 2 * 4);
    assert!(b.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn empty_dimensions_are_allocation_failures() {
    assert!(PixelBuffer::try_new(0, 4).unwrap_err().is_allocation());
    assert!(PixelBuffer::try_new(4, 0).unwrap_err().is_allocation());
}

#[test]
fn erase_keeps_rgb_even_with_zero_alpha() {
    let mut b = PixelBuffer::try_new(2, 2).unwrap();
    b.erase(Argb(0xAA33_6699).without_alpha());
    assert_eq!(b.pixel(1, 1), Some([0x33, 0x66, 0x99, 0]));
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut b = PixelBuffer::try_new(2, 1).unwrap();
    b.put_pixel(1, 0, [1, 2, 3, 4]);
    b.put_pixel(5, 5, [9, 9, 9, 9]);
    assert_eq!(b.pixel(1, 0), Some([1, 2, 3, 4]));
    assert_eq!(b.pixel(2, 0), None);
}

#[test]
fn from_rgba8_checks_length() {
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0; 15]).is_err());
    let b = PixelBuffer::from_rgba8(1, 1, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(b.pixel(0, 0), Some([1, 2, 3, 4]));
}
