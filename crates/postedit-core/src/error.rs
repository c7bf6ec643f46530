//! Error types for the editor engine.
//!
//! The geometry functions themselves are infallible. Errors only surface at
//! the edges: building a session from measured dimensions, parsing aspect
//! labels, validating configuration, and producing the final crop on save.

use thiserror::Error;

/// Error types for editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The source image has a zero width or height.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    /// The on-screen container has a zero width or height.
    #[error("Invalid frame bounds: {width}x{height}")]
    InvalidFrameBounds { width: u32, height: u32 },

    /// An aspect ratio label or custom ratio could not be used.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(String),

    /// Editor configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The solver produced a crop with no area.
    #[error("Degenerate crop rectangle: {width}x{height}")]
    DegenerateCrop { width: u32, height: u32 },

    /// A crop rectangle does not fit inside the image it is applied to.
    #[error("Crop rectangle {x},{y} {width}x{height} exceeds image {image_width}x{image_height}")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Descriptor encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
