use crate::foundation::error::{BlurError, BlurResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// 32-bit color packed as `0xAARRGGBB` (straight alpha).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Pack channels into a color.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same RGB with alpha forced to zero (`color & 0x00FFFFFF`).
    pub const fn without_alpha(self) -> Self {
        Self(self.0 & 0x00FF_FFFF)
    }

    /// Byte order used by [`crate::PixelBuffer`].
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Inverse of [`Argb::to_rgba8`].
    pub const fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(px[3], px[0], px[1], px[2])
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> BlurResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || {
            BlurError::validation(format!(
                "invalid color \"{s}\": expected #RRGGBB or #AARRGGBB"
            ))
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let v = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | v)),
            8 => Ok(Self(v)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Argb {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Argb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Packed(u32),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Packed(v) => Ok(Self(v)),
        }
    }
}

/// Host display scale, used to turn density-independent units into device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent unit.
    pub density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    /// Create metrics, rejecting non-positive or non-finite densities.
    pub fn new(density: f32) -> BlurResult<Self> {
        if !density.is_finite() || density <= 0.0 {
            return Err(BlurError::validation("display density must be > 0"));
        }
        Ok(Self { density })
    }

    /// Convert a density-independent length to whole device pixels.
    pub fn dp_to_px(self, dp: u32) -> u32 {
        (dp as f32 * self.density).round().max(0.0) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
