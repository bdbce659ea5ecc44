use crate::foundation::math::{mul_div255_u16, mul_div255_u8, unpremul_u8};

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over in straight alpha.
///
/// Channels are blended in premultiplied space and converted back, so a fully transparent
/// destination yields the source unchanged and an opaque source replaces the destination.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    let da = u16::from(mul_div255_u8(u16::from(dst[3]), 255 - sa));
    let out_a = sa + da;

    let mut out = [0u8; 4];
    out[3] = out_a.min(255) as u8;
    for i in 0..3 {
        let sc = mul_div255_u16(u16::from(src[i]), sa);
        let dc = mul_div255_u16(u16::from(dst[i]), da);
        out[i] = unpremul_u8(sc + dc, out_a);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
