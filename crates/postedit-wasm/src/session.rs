//! Editor session WASM bindings.
//!
//! Wraps the core `EditorSession` so the mobile host can forward gesture
//! callbacks and control presses, then ask for the crop and descriptor on
//! save.

use crate::types::{to_js_error, JsCropRect};
use postedit_core::{
    AspectRatio, EditorConfig, EditorSession, FrameBounds, GestureEvent, ImageDimensions,
    SavedEdit, TransformDescriptor,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Shape returned to JavaScript from a save.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveOutput<'a> {
    descriptor: &'a TransformDescriptor,
    crop_rect: postedit_core::CropRect,
}

impl<'a> From<&'a SavedEdit> for SaveOutput<'a> {
    fn from(saved: &'a SavedEdit) -> Self {
        Self {
            descriptor: &saved.descriptor,
            crop_rect: saved.crop_rect,
        }
    }
}

/// JavaScript-accessible editing session for one image.
///
/// # Example (TypeScript)
/// ```typescript
/// const session = new JsEditorSession(asset.width, asset.height, screenWidth, maxFrameHeight);
///
/// // Pinch callbacks
/// session.pinch_start();
/// session.pinch_move(event.scale);
/// session.pinch_end();
///
/// // On save
/// const { descriptor, cropRect } = session.save();
/// session.free();
/// ```
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Start a fresh edit with default settings.
    ///
    /// # Errors
    /// Returns error if any dimension is zero
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
    ) -> Result<JsEditorSession, JsValue> {
        let inner = EditorSession::new(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            EditorConfig::default(),
        )
        .map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Start a fresh edit with a configuration object, e.g. `{ maxScale: 6 }`.
    pub fn with_config(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
        config: JsValue,
    ) -> Result<JsEditorSession, JsValue> {
        let inner = EditorSession::new(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            parse_config(config)?,
        )
        .map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Reopen a previous edit from descriptor JSON.
    ///
    /// Malformed JSON or fields fall back to defaults rather than failing.
    pub fn resume(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
        descriptor_json: &str,
    ) -> Result<JsEditorSession, JsValue> {
        Self::resume_json(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            EditorConfig::default(),
            descriptor_json,
        )
    }

    /// Reopen a previous edit from descriptor JSON with the configuration the
    /// edit was made under, so scales above the default limit survive.
    pub fn resume_with_config(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
        descriptor_json: &str,
        config: JsValue,
    ) -> Result<JsEditorSession, JsValue> {
        Self::resume_json(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            parse_config(config)?,
            descriptor_json,
        )
    }

    /// Reopen a previous edit from a descriptor object as stored by the API.
    pub fn resume_from_object(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
        descriptor: JsValue,
    ) -> Result<JsEditorSession, JsValue> {
        Self::resume_object(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            EditorConfig::default(),
            descriptor,
        )
    }

    /// Object counterpart of `resume_with_config`.
    pub fn resume_from_object_with_config(
        image_width: u32,
        image_height: u32,
        max_frame_width: u32,
        max_frame_height: u32,
        descriptor: JsValue,
        config: JsValue,
    ) -> Result<JsEditorSession, JsValue> {
        Self::resume_object(
            ImageDimensions::new(image_width, image_height),
            FrameBounds::new(max_frame_width, max_frame_height),
            parse_config(config)?,
            descriptor,
        )
    }

    pub fn pan_start(&mut self) {
        self.inner.apply(GestureEvent::PanStart);
    }

    /// `dx`/`dy` are the total movement since `pan_start`.
    pub fn pan_move(&mut self, dx: f64, dy: f64) {
        self.inner.apply(GestureEvent::PanMove { dx, dy });
    }

    pub fn pan_end(&mut self) {
        self.inner.apply(GestureEvent::PanEnd);
    }

    pub fn pinch_start(&mut self) {
        self.inner.apply(GestureEvent::PinchStart);
    }

    /// `factor` is the pinch scale relative to `pinch_start`.
    pub fn pinch_move(&mut self, factor: f64) {
        self.inner.apply(GestureEvent::PinchMove { factor });
    }

    pub fn pinch_end(&mut self) {
        self.inner.apply(GestureEvent::PinchEnd);
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Rotate 90° clockwise; returns the new angle in degrees.
    pub fn rotate(&mut self) -> u16 {
        self.inner.rotate().degrees()
    }

    /// Select an aspect ratio by label: `"1:1"`, `"4:5"`, `"9:16"`, `"original"` or `"W:H"`.
    pub fn set_aspect_ratio(&mut self, label: &str) -> Result<(), JsValue> {
        let ratio: AspectRatio = label.parse().map_err(to_js_error)?;
        self.inner.set_aspect_ratio(ratio).map_err(to_js_error)
    }

    pub fn set_custom_aspect_ratio(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let ratio = AspectRatio::custom(width, height).map_err(to_js_error)?;
        self.inner.set_aspect_ratio(ratio).map_err(to_js_error)
    }

    pub fn set_frame_bounds(&mut self, max_width: u32, max_height: u32) -> Result<(), JsValue> {
        self.inner
            .set_frame_bounds(FrameBounds::new(max_width, max_height))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.gesture().scale
    }

    #[wasm_bindgen(getter)]
    pub fn translate_x(&self) -> f64 {
        self.inner.gesture().translation.x
    }

    #[wasm_bindgen(getter)]
    pub fn translate_y(&self) -> f64 {
        self.inner.gesture().translation.y
    }

    #[wasm_bindgen(getter)]
    pub fn is_zoomed(&self) -> bool {
        self.inner.phase().is_zoomed()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.rotation().degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> String {
        self.inner.aspect_ratio().label()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_width(&self) -> u32 {
        self.inner.frame().width
    }

    #[wasm_bindgen(getter)]
    pub fn frame_height(&self) -> u32 {
        self.inner.frame().height
    }

    #[wasm_bindgen(getter)]
    pub fn base_scale(&self) -> f64 {
        self.inner.base_scale()
    }

    /// Crop for the current state.
    pub fn crop_rect(&self) -> JsCropRect {
        self.inner.crop_rect().into()
    }

    /// Finish the edit, returning `{ descriptor, cropRect }` as JSON text.
    ///
    /// # Errors
    /// Returns error if the crop has no area
    pub fn save_json(&self) -> Result<String, JsValue> {
        let saved = self.inner.save().map_err(to_js_error)?;
        serde_json::to_string(&SaveOutput::from(&saved))
            .map_err(|e| JsValue::from_str(&format!("Failed to encode descriptor: {}", e)))
    }

    /// Finish the edit, returning `{ descriptor, cropRect }` as a plain object.
    pub fn save(&self) -> Result<JsValue, JsValue> {
        let saved = self.inner.save().map_err(to_js_error)?;
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        SaveOutput::from(&saved)
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&format!("Failed to encode descriptor: {}", e)))
    }
}

impl JsEditorSession {
    fn resume_json(
        image: ImageDimensions,
        bounds: FrameBounds,
        config: EditorConfig,
        descriptor_json: &str,
    ) -> Result<JsEditorSession, JsValue> {
        let inner = EditorSession::resume_from_json(image, bounds, config, descriptor_json)
            .map_err(to_js_error)?;
        Ok(Self { inner })
    }

    fn resume_object(
        image: ImageDimensions,
        bounds: FrameBounds,
        config: EditorConfig,
        descriptor: JsValue,
    ) -> Result<JsEditorSession, JsValue> {
        let raw: serde_json::Value =
            serde_wasm_bindgen::from_value(descriptor).unwrap_or_else(|e| {
                log::warn!("Transform descriptor could not be read, using defaults: {}", e);
                serde_json::Value::Null
            });
        let descriptor = TransformDescriptor::from_raw(&raw);
        let inner =
            EditorSession::resume(image, bounds, config, &descriptor).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

fn parse_config(config: JsValue) -> Result<EditorConfig, JsValue> {
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))
}
