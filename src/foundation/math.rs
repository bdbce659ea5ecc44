pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Undo premultiplication of one channel, rounding to nearest.
pub(crate) fn unpremul_u8(premul: u16, alpha: u16) -> u8 {
    if alpha == 0 {
        return 0;
    }
    let v = (u32::from(premul) * 255 + u32::from(alpha) / 2) / u32::from(alpha);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
