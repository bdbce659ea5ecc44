/// Crate-wide result alias.
pub type BlurResult<T> = Result<T, BlurError>;

/// Errors surfaced by overlay configuration and buffer management.
///
/// Allocation failures are normally absorbed by the frame pipeline (the overlay simply shows its
/// tint for that frame); they only reach callers through the lower-level buffer APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlurError {
    /// A parameter was outside its accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel buffer could not be created.
    #[error("allocation error: cannot allocate {width}x{height} pixel buffer")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Configuration input could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else (I/O, image encoding).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlurError {
    /// Build a [`BlurError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlurError::Allocation`].
    pub fn allocation(width: u32, height: u32) -> Self {
        Self::Allocation { width, height }
    }

    /// Build a [`BlurError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for failures the frame pipeline degrades around instead of reporting.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
