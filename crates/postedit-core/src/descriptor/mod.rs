//! Versioned transform descriptors.
//!
//! A descriptor is the persisted snapshot of one saved edit. It is written
//! once per save, stored verbatim by the host, and read back only to resume
//! editing the same asset.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "version": 1,
//!   "aspectRatio": {"label": "4:5", "value": 0.8},
//!   "base": {"width": 1200, "height": 800},
//!   "cropRect": {"x": 0, "y": 0, "width": 1200, "height": 800},
//!   "scale": 1.0,
//!   "baseScale": 0.5,
//!   "translation": {"x": 0.0, "y": 0.0},
//!   "rotation": 0,
//!   "filters": {}
//! }
//! ```
//!
//! Reading is forward compatible: unknown keys are ignored, and missing or
//! malformed keys fall back to defaults (see [`hydrate`]).

mod batch;
mod hydrate;

pub use batch::parse_transform_states;
pub use hydrate::{hydrate, hydrate_json, hydrate_with, HydratedState};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::aspect::AspectRatio;
use crate::config::DESCRIPTOR_VERSION;
use crate::error::Result;
use crate::geometry::{CropRect, ImageDimensions, Rotation, Translation};

/// Aspect ratio as persisted: the selection label plus its resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectRatioRecord {
    #[serde(rename = "label")]
    pub selection: AspectRatio,
    pub value: f64,
}

impl Default for AspectRatioRecord {
    fn default() -> Self {
        Self {
            selection: AspectRatio::default(),
            value: 1.0,
        }
    }
}

/// Snapshot of a saved edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDescriptor {
    /// Schema version the descriptor was written with.
    pub version: u32,
    pub aspect_ratio: AspectRatioRecord,
    /// Natural size of the source asset, before rotation. `0x0` when unknown.
    pub base: ImageDimensions,
    /// Crop in rotated-image pixels.
    pub crop_rect: CropRect,
    pub scale: f64,
    /// Cached base-fit scale of the frame the edit was made in.
    pub base_scale: f64,
    pub translation: Translation,
    pub rotation: Rotation,
    /// Reserved for filter settings; carried through untouched.
    pub filters: Map<String, Value>,
}

impl Default for TransformDescriptor {
    fn default() -> Self {
        Self {
            version: DESCRIPTOR_VERSION,
            aspect_ratio: AspectRatioRecord::default(),
            base: ImageDimensions::new(0, 0),
            crop_rect: CropRect::default(),
            scale: 1.0,
            base_scale: 1.0,
            translation: Translation::ZERO,
            rotation: Rotation::Deg0,
            filters: Map::new(),
        }
    }
}

/// Capture a new descriptor for a completed edit.
///
/// `image` is the natural (unrotated) size; the aspect ratio value is
/// resolved against the rotated image.
pub fn serialize(
    selection: AspectRatio,
    image: ImageDimensions,
    crop_rect: CropRect,
    scale: f64,
    base_scale: f64,
    translation: Translation,
    rotation: Rotation,
) -> TransformDescriptor {
    TransformDescriptor {
        version: DESCRIPTOR_VERSION,
        aspect_ratio: AspectRatioRecord {
            selection,
            value: selection.ratio(image.rotated(rotation)),
        },
        base: image,
        crop_rect,
        scale,
        base_scale,
        translation,
        rotation,
        filters: Map::new(),
    }
}

impl TransformDescriptor {
    /// Encode as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encode as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text. Never fails; unreadable text yields defaults.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => Self::from_raw(&raw),
            Err(e) => {
                log::warn!("Transform descriptor is not valid JSON, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
