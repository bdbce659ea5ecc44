use super::*;

#[test]
fn mul_div255_rounds_and_saturates_at_identity() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn unpremul_inverts_premul_for_opaque_and_handles_zero_alpha() {
    assert_eq!(unpremul_u8(200, 255), 200);
    assert_eq!(unpremul_u8(64, 128), 128);
    assert_eq!(unpremul_u8(10, 0), 0);
}
