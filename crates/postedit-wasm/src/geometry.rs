//! WASM bindings for the pure geometry functions.
//!
//! Stateless entry points for hosts that keep gesture state themselves and
//! only need the math.

use crate::types::{JsCropRect, JsTranslation};
use postedit_core::geometry::{
    clamp_translation as core_clamp, compute_crop_rect as core_crop,
    derive_base_scale as core_base_scale, max_translation as core_max, CropParams,
};
use postedit_core::{FrameDimensions, ImageDimensions, Translation};
use wasm_bindgen::prelude::*;

/// Largest scale at which the whole image fits inside the frame.
///
/// All dimensions must be positive.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const base = derive_base_scale(1200, 800, 600, 600); // 0.5
/// ```
#[wasm_bindgen]
pub fn derive_base_scale(
    image_width: u32,
    image_height: u32,
    frame_width: u32,
    frame_height: u32,
) -> f64 {
    core_base_scale(
        ImageDimensions::new(image_width, image_height),
        FrameDimensions::new(frame_width, frame_height),
    )
}

/// Source-image rectangle visible in the frame.
///
/// Always inside the image, even when the translation overshoots its pan
/// bounds. Check `is_empty` before handing the result to image processing.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const base = derive_base_scale(w, h, frameW, frameH);
/// const rect = compute_crop_rect(w, h, frameW, frameH, base, scale, tx, ty);
/// if (!rect.is_empty) {
///   await manipulate(uri, { originX: rect.x, originY: rect.y, width: rect.width, height: rect.height });
/// }
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_crop_rect(
    image_width: u32,
    image_height: u32,
    frame_width: u32,
    frame_height: u32,
    base_scale: f64,
    user_scale: f64,
    translate_x: f64,
    translate_y: f64,
) -> JsCropRect {
    core_crop(&CropParams {
        image: ImageDimensions::new(image_width, image_height),
        frame: FrameDimensions::new(frame_width, frame_height),
        base_scale,
        user_scale,
        translation: Translation::new(translate_x, translate_y),
    })
    .into()
}

/// Pan limit on each axis at the given scale.
#[wasm_bindgen]
pub fn max_translation(scale: f64, frame_width: u32, frame_height: u32) -> JsTranslation {
    core_max(scale, FrameDimensions::new(frame_width, frame_height)).into()
}

/// Clamp a proposed pan into the bounds for `scale`.
#[wasm_bindgen]
pub fn clamp_translation(
    x: f64,
    y: f64,
    scale: f64,
    frame_width: u32,
    frame_height: u32,
) -> JsTranslation {
    core_clamp(
        Translation::new(x, y),
        scale,
        FrameDimensions::new(frame_width, frame_height),
    )
    .into()
}
