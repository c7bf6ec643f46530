//! Total decoding of persisted descriptors.
//!
//! Every field is read independently and falls back to its default when
//! missing or malformed, so a damaged record degrades to a plain 1:1 edit
//! instead of failing the session.

use serde_json::{Map, Value};

use super::{AspectRatioRecord, TransformDescriptor};
use crate::aspect::AspectRatio;
use crate::config::{EditorConfig, DESCRIPTOR_VERSION};
use crate::geometry::{CropRect, ImageDimensions, Rotation, Translation};

/// Editor state recovered from a descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydratedState {
    pub aspect_ratio: AspectRatio,
    pub rotation: Rotation,
    pub scale: f64,
    pub translation: Translation,
}

impl Default for HydratedState {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            rotation: Rotation::Deg0,
            scale: 1.0,
            translation: Translation::ZERO,
        }
    }
}

/// Recover editor state using the default scale limits.
pub fn hydrate(descriptor: &TransformDescriptor) -> HydratedState {
    hydrate_with(descriptor, &EditorConfig::default())
}

/// Recover editor state, clamping the scale to `config`'s limits.
///
/// Translation is returned as stored; the session clamps it against the
/// frame once the frame is known.
pub fn hydrate_with(descriptor: &TransformDescriptor, config: &EditorConfig) -> HydratedState {
    HydratedState {
        aspect_ratio: descriptor.aspect_ratio.selection,
        rotation: descriptor.rotation,
        scale: config.clamp_scale(descriptor.scale),
        translation: descriptor.translation,
    }
}

/// Recover editor state straight from JSON text. Never fails.
pub fn hydrate_json(text: &str) -> HydratedState {
    hydrate(&TransformDescriptor::from_json(text))
}

impl TransformDescriptor {
    /// Decode a raw JSON record. Never fails.
    ///
    /// Records from a newer schema version are read field by field like any
    /// other; keys this version does not know are ignored.
    pub fn from_raw(raw: &Value) -> Self {
        let defaults = TransformDescriptor::default();
        let Some(obj) = raw.as_object() else {
            if !raw.is_null() {
                log::warn!("Transform descriptor is not an object, using defaults");
            }
            return defaults;
        };

        let version = read_version(obj);
        if version > DESCRIPTOR_VERSION {
            log::debug!(
                "Transform descriptor version {} is newer than {}, reading known fields only",
                version,
                DESCRIPTOR_VERSION
            );
        }

        let rotation = read_rotation(obj);
        let base = read_base(obj);

        TransformDescriptor {
            version,
            aspect_ratio: read_aspect_ratio(obj, base.rotated(rotation)),
            base,
            crop_rect: read_crop_rect(obj),
            scale: read_positive(obj, "scale").unwrap_or(defaults.scale),
            base_scale: read_positive(obj, "baseScale").unwrap_or(defaults.base_scale),
            translation: read_translation(obj),
            rotation,
            filters: read_filters(obj),
        }
    }
}

fn read_version(obj: &Map<String, Value>) -> u32 {
    match obj.get("version") {
        None => DESCRIPTOR_VERSION,
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => {
                log::warn!("Ignoring malformed descriptor version: {}", v);
                DESCRIPTOR_VERSION
            }
        },
    }
}

/// Accepts `{"label": .., "value": ..}`, a bare label string, or
/// `{"custom": {"ratioWidth": .., "ratioHeight": ..}}`.
fn read_aspect_ratio(obj: &Map<String, Value>, image: ImageDimensions) -> AspectRatioRecord {
    let Some(raw) = obj.get("aspectRatio") else {
        return AspectRatioRecord::default();
    };

    let selection = match raw {
        Value::String(label) => parse_label(label),
        Value::Object(inner) => match (inner.get("label"), inner.get("custom")) {
            (Some(Value::String(label)), _) => parse_label(label),
            (_, Some(Value::Object(custom))) => parse_custom(custom),
            _ => None,
        },
        _ => None,
    };

    let Some(selection) = selection else {
        log::warn!("Ignoring malformed descriptor aspect ratio: {}", raw);
        return AspectRatioRecord::default();
    };

    let stored = raw
        .get("value")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0);
    // "original" cannot be resolved without a known base size
    let value = stored.unwrap_or_else(|| {
        let resolved = selection.ratio(image);
        if resolved.is_finite() && resolved > 0.0 {
            resolved
        } else {
            1.0
        }
    });

    AspectRatioRecord { selection, value }
}

fn parse_label(label: &str) -> Option<AspectRatio> {
    label.parse().ok()
}

fn parse_custom(custom: &Map<String, Value>) -> Option<AspectRatio> {
    let width = read_u32(custom.get("ratioWidth")?)?;
    let height = read_u32(custom.get("ratioHeight")?)?;
    AspectRatio::custom(width, height).ok()
}

fn read_base(obj: &Map<String, Value>) -> ImageDimensions {
    let Some(raw) = obj.get("base") else {
        return ImageDimensions::new(0, 0);
    };
    let width = raw.get("width").and_then(read_u32).filter(|w| *w > 0);
    let height = raw.get("height").and_then(read_u32).filter(|h| *h > 0);
    match (width, height) {
        (Some(w), Some(h)) => ImageDimensions::new(w, h),
        _ => {
            log::warn!("Ignoring malformed descriptor base size: {}", raw);
            ImageDimensions::new(0, 0)
        }
    }
}

fn read_crop_rect(obj: &Map<String, Value>) -> CropRect {
    let Some(raw) = obj.get("cropRect") else {
        return CropRect::default();
    };
    let field = |name: &str| raw.get(name).and_then(read_u32);
    match (field("x"), field("y"), field("width"), field("height")) {
        (Some(x), Some(y), Some(width), Some(height)) => CropRect::new(x, y, width, height),
        _ => {
            log::warn!("Ignoring malformed descriptor crop rectangle: {}", raw);
            CropRect::default()
        }
    }
}

fn read_translation(obj: &Map<String, Value>) -> Translation {
    let Some(raw) = obj.get("translation") else {
        return Translation::ZERO;
    };
    let axis = |name: &str| {
        raw.get(name)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    };
    match (axis("x"), axis("y")) {
        (Some(x), Some(y)) => Translation::new(x, y),
        _ => {
            log::warn!("Ignoring malformed descriptor translation: {}", raw);
            Translation::ZERO
        }
    }
}

fn read_rotation(obj: &Map<String, Value>) -> Rotation {
    let Some(raw) = obj.get("rotation") else {
        return Rotation::Deg0;
    };
    let degrees = raw.as_i64().or_else(|| {
        raw.as_f64()
            .filter(|d| d.is_finite() && d.fract() == 0.0)
            .map(|d| d as i64)
    });
    match degrees.and_then(Rotation::from_degrees) {
        Some(rotation) => rotation,
        None => {
            log::warn!("Ignoring unsupported descriptor rotation: {}", raw);
            Rotation::Deg0
        }
    }
}

fn read_positive(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let raw = obj.get(key)?;
    let value = raw.as_f64().filter(|v| v.is_finite() && *v > 0.0);
    if value.is_none() {
        log::warn!("Ignoring malformed descriptor {}: {}", key, raw);
    }
    value
}

fn read_filters(obj: &Map<String, Value>) -> Map<String, Value> {
    match obj.get("filters") {
        Some(Value::Object(filters)) => filters.clone(),
        _ => Map::new(),
    }
}

/// Non-negative integer from an integer or float value; floats are rounded.
fn read_u32(raw: &Value) -> Option<u32> {
    if let Some(n) = raw.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = raw.as_f64().filter(|f| f.is_finite() && *f >= 0.0)?;
    let rounded = f.round();
    if rounded > u32::MAX as f64 {
        None
    } else {
        Some(rounded as u32)
    }
}
