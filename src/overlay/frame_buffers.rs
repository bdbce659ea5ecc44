use crate::foundation::error::{BlurError, BlurResult};
use crate::raster::buffer::{PixelBuffer, byte_len};
use crate::raster::canvas::Canvas;

/// Limits for one overlay's capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferOpts {
    /// Largest capture buffer, in bytes, before allocation is treated as failed.
    pub max_bytes: usize,
}

impl Default for FrameBufferOpts {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Outcome of [`FrameBuffers::ensure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The existing buffer already had the requested size.
    Reused,
    /// A new buffer was created; anything prepared for the old one is stale.
    Allocated,
}

/// Lifetime counters of one overlay's buffers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferStats {
    /// Capture buffers allocated, including reallocations after a size change.
    pub allocations: u64,
    /// Times held buffers were freed, including before a reallocation.
    pub releases: u64,
}

/// Capture buffer (with its drawing context) and the latest blurred output.
///
/// The capture canvas is lent out for the duration of a capture pass with
/// [`FrameBuffers::take_capture`] and handed back with [`FrameBuffers::restore_capture`].
#[derive(Default)]
pub(crate) struct FrameBuffers {
    opts: FrameBufferOpts,
    capture: Option<Canvas>,
    blurred: Option<PixelBuffer>,
    stats: FrameBufferStats,
}

impl FrameBuffers {
    pub(crate) fn new(opts: FrameBufferOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    pub(crate) fn opts(&self) -> FrameBufferOpts {
        self.opts
    }

    pub(crate) fn stats(&self) -> FrameBufferStats {
        self.stats
    }

    /// Make sure a `width x height` capture buffer exists.
    ///
    /// On failure every buffer is released and the error is returned for the caller to log; it
    /// means "no blur this frame", never anything worse.
    pub(crate) fn ensure(&mut self, width: u32, height: u32) -> BlurResult<Ensured> {
        if let Some(c) = &self.capture
            && c.width() == width
            && c.height() == height
        {
            return Ok(Ensured::Reused);
        }

        self.release();

        let fits = byte_len(width, height).is_some_and(|bytes| bytes <= self.opts.max_bytes);
        if !fits {
            return Err(BlurError::allocation(width, height));
        }
        let canvas = Canvas::try_new(width, height)?;
        self.capture = Some(canvas);
        self.stats.allocations = self.stats.allocations.saturating_add(1);
        tracing::debug!(width, height, "allocated capture buffer");
        Ok(Ensured::Allocated)
    }

    /// Drop both buffers. Safe to call in any state.
    pub(crate) fn release(&mut self) {
        let had_capture = self.capture.take().is_some();
        let had_blurred = self.blurred.take().is_some();
        if had_capture || had_blurred {
            self.stats.releases = self.stats.releases.saturating_add(1);
            tracing::debug!("released overlay buffers");
        }
    }

    pub(crate) fn take_capture(&mut self) -> Option<Canvas> {
        self.capture.take()
    }

    pub(crate) fn restore_capture(&mut self, canvas: Canvas) {
        self.capture = Some(canvas);
    }

    /// Replace the blurred output, dropping the previous one first.
    pub(crate) fn set_blurred(&mut self, blurred: Option<PixelBuffer>) {
        self.blurred = None;
        self.blurred = blurred;
    }

    pub(crate) fn capture(&self) -> Option<&PixelBuffer> {
        self.capture.as_ref().map(Canvas::pixels)
    }

    pub(crate) fn blurred(&self) -> Option<&PixelBuffer> {
        self.blurred.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/frame_buffers.rs"]
mod tests;
