//! Software raster primitives shared by capture, blur and compositing.

pub mod blend;
pub(crate) mod buffer;
pub(crate) mod canvas;
