#![forbid(unsafe_code)]
//! Realtime blur overlay: a surface that shows a blurred, tinted copy of the content beneath it.
//!
//! Each frame, before the root container paints, every attached [`BlurOverlay`] renders the
//! root's content into a downsampled capture buffer (stopping as soon as the traversal reaches the
//! overlay itself), hands it to its [`BlurAlgorithm`], and later draws the result stretched to its
//! own bounds with its tint on top. [`Host`] drives this over a headless [`SurfaceTree`].

mod blur;
mod config;
mod foundation;
mod host;
mod overlay;
mod raster;

pub use blur::disabled::DisabledBlur;
pub use blur::gaussian::GaussianBlur;
pub use blur::{BlurAlgorithm, BlurBackendKind, MAX_BLUR_RADIUS, create_blur_algorithm};
pub use config::{DEFAULT_OVERLAY_COLOR, OverlayConfig};
pub use foundation::core::{Affine, Argb, DisplayMetrics, Point, Rect, Size, Vec2};
pub use foundation::error::{BlurError, BlurResult};
pub use host::render::{OverlayPainter, TreeRenderer};
pub use host::surface::{Content, SurfaceId, SurfaceNode, SurfaceTree};
pub use host::{FrameStats, Host};
pub use overlay::capture::{CaptureOutcome, RenderDepth, StopDraw};
pub use overlay::composite::{BitmapThenTint, OverlayCompositor, composite};
pub use overlay::frame_buffers::{FrameBufferOpts, FrameBufferStats};
pub use overlay::set::{OverlayId, OverlaySet};
pub use overlay::{BlurOverlay, CapturePlan, ROOT_SEARCH_HOPS, RootBinding};
pub use raster::blend::{Rgba8, over};
pub use raster::buffer::PixelBuffer;
pub use raster::canvas::Canvas;
