//! Crop geometry: base-fit scale, crop rectangle solving, pan bounds and rotation.
//!
//! # Transform Order
//!
//! When a saved edit is applied to the source asset:
//! 1. Rotation (right-angle steps, clockwise)
//! 2. Crop (rectangle in rotated-image pixels)
//!
//! # Coordinate System
//!
//! - Screen space is the on-screen frame, origin top-left, in display points
//! - Image space is source pixels of the (rotated) image, origin top-left
//! - Translation is the user pan in screen space, relative to the centered image

mod base_scale;
mod crop;
mod pan;
mod rotation;

pub use base_scale::derive_base_scale;
pub use crop::{compute_crop_rect, CropParams};
pub use pan::{clamp_translation, max_translation, ZoomPhase};
pub use rotation::Rotation;

use serde::{Deserialize, Serialize};

/// Natural pixel size of a source asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides are non-zero.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Dimensions after applying a right-angle rotation.
    #[inline]
    pub fn rotated(self, rotation: Rotation) -> Self {
        if rotation.swaps_dimensions() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }

    /// Width over height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Size of the on-screen viewport the user edits within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// User pan offset in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub const ZERO: Translation = Translation { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl std::ops::Add for Translation {
    type Output = Translation;

    fn add(self, rhs: Translation) -> Translation {
        Translation::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Pixel region of the source image to extract.
///
/// Produced by [`compute_crop_rect`], which guarantees
/// `x + width <= image.width` and `y + height <= image.height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full(image: ImageDimensions) -> Self {
        Self::new(0, 0, image.width, image.height)
    }

    /// A rectangle with no area cannot be handed to image processing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies entirely inside `image`.
    pub fn fits_within(&self, image: ImageDimensions) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(image.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(image.height)
    }
}
