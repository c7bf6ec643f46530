//! Crop rectangle solving.
//!
//! Inverts the on-screen transform (center, scale, pan) back into source
//! pixel space to find which part of the image is visible in the frame.
//!
//! # Algorithm
//!
//! With `s = base_scale * user_scale`, the image's top-left corner sits at
//! ```text
//! offset = (frame - image * s) / 2 + translation
//! ```
//! in screen space. The frame's top-left corner maps back to image space as
//! `max(0, -offset) / s`, and the frame covers `frame / s` image pixels.
//! Rounding to whole pixels happens once, at the very end.

use super::{CropRect, FrameDimensions, ImageDimensions, Translation};

/// Inputs to [`compute_crop_rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropParams {
    /// Source image size (already rotated, if a rotation applies).
    pub image: ImageDimensions,
    /// On-screen frame size.
    pub frame: FrameDimensions,
    /// Base-fit scale from [`super::derive_base_scale`].
    pub base_scale: f64,
    /// User zoom on top of the base scale.
    pub user_scale: f64,
    /// User pan in screen space.
    pub translation: Translation,
}

/// Compute the source-image rectangle visible in the frame.
///
/// # Behavior
///
/// - The result always lies inside the image, however far the translation
///   overshoots its pan bounds
/// - If the image edge sits inside the frame, the origin on that axis is 0
/// - Width and height may be 0 for pathological input (e.g. a scale so large
///   the frame covers less than half a pixel);
///   callers treat that as a failed crop
///
/// # Example
///
/// ```ignore
/// let rect = compute_crop_rect(&CropParams {
///     image: ImageDimensions::new(1200, 800),
///     frame: FrameDimensions::new(600, 600),
///     base_scale: 0.5,
///     user_scale: 2.0,
///     translation: Translation::ZERO,
/// });
/// assert_eq!(rect, CropRect::new(300, 100, 600, 600));
/// ```
pub fn compute_crop_rect(params: &CropParams) -> CropRect {
    let img_w = params.image.width as f64;
    let img_h = params.image.height as f64;
    let frame_w = params.frame.width as f64;
    let frame_h = params.frame.height as f64;

    let effective_scale = params.base_scale * params.user_scale;
    let displayed_w = img_w * effective_scale;
    let displayed_h = img_h * effective_scale;

    // Image top-left corner in screen space
    let offset_left = (frame_w - displayed_w) / 2.0 + params.translation.x;
    let offset_top = (frame_h - displayed_h) / 2.0 + params.translation.y;

    // Frame top-left corner in image space
    let origin_x = (-offset_left).max(0.0) / effective_scale;
    let origin_y = (-offset_top).max(0.0) / effective_scale;

    let crop_w = frame_w / effective_scale;
    let crop_h = frame_h / effective_scale;

    let x = clamp_origin(origin_x, params.image.width);
    let y = clamp_origin(origin_y, params.image.height);

    let width = clamp_extent(crop_w, params.image.width - x);
    let height = clamp_extent(crop_h, params.image.height - y);

    CropRect {
        x,
        y,
        width,
        height,
    }
}

/// Round an origin and clamp it to `[0, size - 1]`.
///
/// NaN collapses to 0.
#[inline]
fn clamp_origin(origin: f64, size: u32) -> u32 {
    let max = size.saturating_sub(1);
    let rounded = origin.round();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= max as f64 {
        max
    } else {
        rounded as u32
    }
}

/// Round an extent after limiting it to the pixels remaining past the origin.
#[inline]
fn clamp_extent(extent: f64, remaining: u32) -> u32 {
    let limited = extent.min(remaining as f64).round();
    if limited.is_nan() || limited <= 0.0 {
        0
    } else {
        // `limited` is at most `remaining`, so the cast cannot overflow
        limited as u32
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::derive_base_scale;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions.
    fn image_strategy() -> impl Strategy<Value = ImageDimensions> {
        (1u32..=6000, 1u32..=6000).prop_map(|(w, h)| ImageDimensions::new(w, h))
    }

    /// Strategy for generating frame dimensions.
    fn frame_strategy() -> impl Strategy<Value = FrameDimensions> {
        (1u32..=1500, 1u32..=1500).prop_map(|(w, h)| FrameDimensions::new(w, h))
    }

    fn solve(
        image: ImageDimensions,
        frame: FrameDimensions,
        user_scale: f64,
        translation: Translation,
    ) -> CropRect {
        compute_crop_rect(&CropParams {
            image,
            frame,
            base_scale: derive_base_scale(image, frame),
            user_scale,
            translation,
        })
    }

    proptest! {
        /// Property: the rectangle always lies inside the image.
        #[test]
        fn prop_containment(
            image in image_strategy(),
            frame in frame_strategy(),
            user_scale in 1.0f64..=4.0,
            tx in -2000.0f64..=2000.0,
            ty in -2000.0f64..=2000.0,
        ) {
            let rect = solve(image, frame, user_scale, Translation::new(tx, ty));
            prop_assert!(rect.x + rect.width <= image.width, "{:?} in {:?}", rect, image);
            prop_assert!(rect.y + rect.height <= image.height, "{:?} in {:?}", rect, image);
        }

        /// Property: pans of ten times the frame size still stay in bounds.
        #[test]
        fn prop_overshoot_robustness(
            image in image_strategy(),
            frame in frame_strategy(),
            user_scale in 1.0f64..=4.0,
            fx in -10.0f64..=10.0,
            fy in -10.0f64..=10.0,
        ) {
            let translation = Translation::new(fx * frame.width as f64, fy * frame.height as f64);
            let rect = solve(image, frame, user_scale, translation);
            prop_assert!(rect.fits_within(image), "{:?} in {:?}", rect, image);
        }

        /// Property: with no zoom and no pan the whole image is visible.
        #[test]
        fn prop_no_zoom_identity(
            image in image_strategy(),
            frame in frame_strategy(),
        ) {
            let rect = solve(image, frame, 1.0, Translation::ZERO);
            prop_assert_eq!(rect, CropRect::full(image));
        }

        /// Property: when image and frame share a ratio the crop matches the frame ratio.
        #[test]
        fn prop_shared_ratio_matches_frame(
            (rw, rh) in (1u32..=16, 1u32..=16),
            image_mul in 1u32..=300,
            frame_mul in 1u32..=90,
        ) {
            let image = ImageDimensions::new(rw * image_mul, rh * image_mul);
            let frame = FrameDimensions::new(rw * frame_mul, rh * frame_mul);
            let rect = solve(image, frame, 1.0, Translation::ZERO);

            let rect_ratio = rect.width as f64 / rect.height as f64;
            prop_assert!((rect_ratio - frame.aspect_ratio()).abs() < 1e-9);
            prop_assert_eq!(rect.width as u64 * rect.height as u64, image.width as u64 * image.height as u64);
        }

        /// Property: zooming in never widens the visible source region.
        ///
        /// Only holds for pans within half a frame. Pan bounds grow with the
        /// frame, not the displayed image, so a pan at the limit can push the
        /// image edge into view and zooming further then widens the crop
        /// (see `test_zoom_can_widen_crop_at_pan_limit`).
        #[test]
        fn prop_zoom_monotonic(
            image in image_strategy(),
            frame in frame_strategy(),
            s1 in 1.0f64..=4.0,
            ds in 0.0f64..=3.0,
            fx in -0.5f64..=0.5,
            fy in -0.5f64..=0.5,
        ) {
            let translation = Translation::new(fx * frame.width as f64, fy * frame.height as f64);
            let s2 = s1 + ds;
            let a = solve(image, frame, s1, translation);
            let b = solve(image, frame, s2, translation);

            prop_assert!(b.width <= a.width, "width grew: {} -> {}", a.width, b.width);
            prop_assert!(b.height <= a.height, "height grew: {} -> {}", a.height, b.height);
        }

        /// Property: solving is deterministic.
        #[test]
        fn prop_deterministic(
            image in image_strategy(),
            frame in frame_strategy(),
            user_scale in 1.0f64..=4.0,
            tx in -500.0f64..=500.0,
        ) {
            let t = Translation::new(tx, -tx);
            prop_assert_eq!(solve(image, frame, user_scale, t), solve(image, frame, user_scale, t));
        }
    }
}
