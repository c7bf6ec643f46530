//! WASM-compatible wrapper types for geometry results.
//!
//! These mirror the core value types with JavaScript getters, so the host can
//! read results without going through serde.

use postedit_core::{CropRect, EditorError, Translation};
use wasm_bindgen::prelude::*;

/// A crop rectangle in source-image pixels, origin top-left.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the rectangle has no area and must not be used for cropping.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<CropRect> for JsCropRect {
    fn from(rect: CropRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// A pan offset in screen points.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsTranslation {
    x: f64,
    y: f64,
}

#[wasm_bindgen]
impl JsTranslation {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<Translation> for JsTranslation {
    fn from(t: Translation) -> Self {
        Self { x: t.x, y: t.y }
    }
}

/// Convert a core error into a JavaScript exception value.
pub(crate) fn to_js_error(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
