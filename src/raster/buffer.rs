use crate::foundation::core::Argb;
use crate::foundation::error::{BlurError, BlurResult};
use anyhow::Context as _;
use std::path::Path;

/// Owned RGBA8 raster, straight alpha, tightly packed, row-major.
///
/// Straight alpha matters for capture buffers: erasing to a color with zero alpha keeps its RGB,
/// which a blur then bleeds into partially covered edge pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Allocate a transparent buffer, reporting failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> BlurResult<Self> {
        let len = byte_len(width, height).ok_or_else(|| BlurError::allocation(width, height))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BlurError::allocation(width, height))?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BlurResult<Self> {
        let expected = byte_len(width, height).ok_or_else(|| BlurError::allocation(width, height))?;
        if data.len() != expected {
            return Err(BlurError::validation(format!(
                "pixel data length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Overwrite every pixel with `color`, alpha included.
    pub fn erase(&mut self, color: Argb) {
        let px = color.to_rgba8();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&px);
        }
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: &Path) -> BlurResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

/// Bytes needed for a `width x height` RGBA8 buffer; `None` for empty or overflowing sizes.
pub(crate) fn byte_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
