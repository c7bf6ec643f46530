//! Postedit WASM - WebAssembly bindings for the post media editor
//!
//! This crate exposes the postedit-core crop engine to the mobile and web
//! hosts.
//!
//! # Module Structure
//!
//! - `geometry` - Stateless base-scale, crop and pan-bound functions
//! - `session` - Stateful editor session driven by gesture callbacks
//! - `types` - WASM-compatible wrapper types for results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@postedit/wasm';
//!
//! await init();
//!
//! const session = JsEditorSession.resume(width, height, screenWidth, maxHeight, savedJson);
//! session.zoom_in();
//! const { descriptor, cropRect } = session.save();
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod session;
mod types;

// Re-export public types
pub use geometry::{clamp_translation, compute_crop_rect, derive_base_scale, max_translation};
pub use session::JsEditorSession;
pub use types::{JsCropRect, JsTranslation};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is loaded twice
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Version number written into new transform descriptors.
#[wasm_bindgen]
pub fn descriptor_version() -> u32 {
    postedit_core::config::DESCRIPTOR_VERSION
}
