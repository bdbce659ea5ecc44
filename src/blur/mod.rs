//! Pluggable blur backends.
//!
//! An overlay owns exactly one [`BlurAlgorithm`], chosen when the overlay is built. The overlay
//! calls [`BlurAlgorithm::prepare`] whenever its parameters change and [`BlurAlgorithm::blur`]
//! once per captured frame.

use crate::foundation::core::DisplayMetrics;
use crate::foundation::error::BlurError;
use crate::raster::buffer::PixelBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) mod disabled;
pub(crate) mod gaussian;

/// Largest radius (in capture-buffer pixels) any backend accepts.
pub const MAX_BLUR_RADIUS: i32 = 25;

/// Contract between an overlay and its blur backend.
pub trait BlurAlgorithm {
    /// Configure for `radius`, clamped into `[0, MAX_BLUR_RADIUS]`.
    ///
    /// Returns whether blurring is active for this configuration; a radius of zero or a missing
    /// backend reports `false`.
    fn prepare(&mut self, metrics: &DisplayMetrics, radius: i32) -> bool;

    /// Blur `input` into a new buffer of the same dimensions.
    ///
    /// Returns `None` when not prepared, when the prepared radius is outside `(0, MAX_BLUR_RADIUS]`,
    /// or when the output could not be allocated.
    fn blur(&mut self, input: &PixelBuffer) -> Option<PixelBuffer>;

    /// Free backend-held resources. Safe to call repeatedly, including before any `prepare`.
    fn release(&mut self);

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Backends selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurBackendKind {
    /// CPU separable Gaussian blur.
    #[default]
    Gaussian,
    /// No-op backend: prepare fails and the overlay shows its tint only.
    Disabled,
}

impl fmt::Display for BlurBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gaussian => "gaussian",
            Self::Disabled => "disabled",
        })
    }
}

impl FromStr for BlurBackendKind {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian),
            "disabled" | "none" => Ok(Self::Disabled),
            other => Err(BlurError::validation(format!(
                "unknown blur backend \"{other}\" (expected gaussian or disabled)"
            ))),
        }
    }
}

/// Build a fresh backend instance.
pub fn create_blur_algorithm(kind: BlurBackendKind) -> Box<dyn BlurAlgorithm> {
    match kind {
        BlurBackendKind::Gaussian => Box::new(gaussian::GaussianBlur::new()),
        BlurBackendKind::Disabled => Box::new(disabled::DisabledBlur),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blur/mod.rs"]
mod tests;
