use crate::blur::BlurAlgorithm;
use crate::foundation::core::DisplayMetrics;
use crate::raster::buffer::PixelBuffer;

/// Fallback backend for hosts without a usable blur implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledBlur;

impl BlurAlgorithm for DisabledBlur {
    fn prepare(&mut self, _metrics: &DisplayMetrics, _radius: i32) -> bool {
        false
    }

    fn blur(&mut self, _input: &PixelBuffer) -> Option<PixelBuffer> {
        None
    }

    fn release(&mut self) {}

    fn name(&self) -> &'static str {
        "disabled"
    }
}
