use crate::blur::BlurBackendKind;
use crate::foundation::core::Argb;
use crate::foundation::error::{BlurError, BlurResult};
use serde::{Deserialize, Serialize};

/// Default tint: white at ~67% opacity.
pub const DEFAULT_OVERLAY_COLOR: Argb = Argb(0xAAFF_FFFF);

/// Overlay parameters as supplied by the host (layout attributes, JSON, CLI flags).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Blur radius in density-independent units; 0 disables blurring.
    pub blur_radius: u32,
    /// Capture resolution divisor; must be > 0.
    pub downsample_factor: f32,
    /// Tint drawn over the blurred image.
    pub overlay_color: Argb,
    /// Blur implementation.
    pub backend: BlurBackendKind,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            blur_radius: 10,
            downsample_factor: 4.0,
            overlay_color: DEFAULT_OVERLAY_COLOR,
            backend: BlurBackendKind::Gaussian,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> BlurResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| BlurError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BlurResult<()> {
        validate_downsample_factor(self.downsample_factor)
    }
}

pub(crate) fn validate_downsample_factor(factor: f32) -> BlurResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(BlurError::validation(
            "downsample factor must be greater than 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
