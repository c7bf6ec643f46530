//! Applying a saved edit to decoded pixels.
//!
//! Rotation is applied first (clockwise quarter turns), then the crop
//! rectangle is cut from the rotated image. Encoding is left to the host.

use image::imageops;
use image::RgbImage;

use crate::descriptor::TransformDescriptor;
use crate::error::{EditorError, Result};
use crate::geometry::{CropRect, ImageDimensions, Rotation};

/// Rotate `image` and extract `crop` from the result.
///
/// # Errors
///
/// - [`EditorError::DegenerateCrop`] if the rectangle has no area
/// - [`EditorError::CropOutOfBounds`] if it does not fit the rotated image
pub fn apply_transform(image: &RgbImage, rotation: Rotation, crop: CropRect) -> Result<RgbImage> {
    match rotation {
        Rotation::Deg0 => crop_region(image, crop),
        Rotation::Deg90 => crop_region(&imageops::rotate90(image), crop),
        Rotation::Deg180 => crop_region(&imageops::rotate180(image), crop),
        Rotation::Deg270 => crop_region(&imageops::rotate270(image), crop),
    }
}

/// Apply the rotation and crop recorded in a descriptor.
pub fn apply_descriptor(image: &RgbImage, descriptor: &TransformDescriptor) -> Result<RgbImage> {
    apply_transform(image, descriptor.rotation, descriptor.crop_rect)
}

fn crop_region(image: &RgbImage, crop: CropRect) -> Result<RgbImage> {
    if crop.is_empty() {
        return Err(EditorError::DegenerateCrop {
            width: crop.width,
            height: crop.height,
        });
    }

    let dims = ImageDimensions::new(image.width(), image.height());
    if !crop.fits_within(dims) {
        return Err(EditorError::CropOutOfBounds {
            x: crop.x,
            y: crop.y,
            width: crop.width,
            height: crop.height,
            image_width: dims.width,
            image_height: dims.height,
        });
    }

    // Fast path: full crop returns a clone
    if crop == CropRect::full(dims) {
        return Ok(image.clone());
    }

    Ok(imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height).to_image())
}
