//! Base-fit ("contain") scale.

use super::{FrameDimensions, ImageDimensions};

/// Compute the largest scale at which the whole image fits inside the frame.
///
/// This is "contain" semantics: one side of the scaled image matches the
/// frame exactly and the other is at most the frame's size. The result is not
/// rounded.
///
/// Both dimensions must be non-zero. The session validates measured sizes
/// before they reach this function.
///
/// # Example
///
/// ```ignore
/// let scale = derive_base_scale(
///     ImageDimensions::new(1200, 800),
///     FrameDimensions::new(600, 600),
/// );
/// assert_eq!(scale, 0.5);
/// ```
#[inline]
pub fn derive_base_scale(image: ImageDimensions, frame: FrameDimensions) -> f64 {
    let sx = frame.width as f64 / image.width as f64;
    let sy = frame.height as f64 / image.height as f64;
    sx.min(sy)
}
