//! Editor configuration.
//!
//! Holds the zoom limits and step sizes the session works with. The defaults
//! match the mobile editor: scale is bounded to `[1, 4]` and the "+"/"−"
//! controls move the scale by half a step.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::error::{EditorError, Result};

/// Lowest user scale (fully zoomed out, base-fit).
pub const MIN_SCALE: f64 = 1.0;

/// Highest user scale.
pub const MAX_SCALE: f64 = 4.0;

/// Scale change applied by a single zoom-in / zoom-out control press.
pub const DEFAULT_ZOOM_STEP: f64 = 0.5;

/// Schema version written into every new transform descriptor.
pub const DESCRIPTOR_VERSION: u32 = 1;

/// Tunable editor settings.
///
/// Every key is optional when deserializing; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Lowest allowed user scale.
    pub min_scale: f64,
    /// Highest allowed user scale.
    pub max_scale: f64,
    /// Scale increment for the zoom controls.
    pub zoom_step: f64,
    /// Aspect ratio selected when a session starts without a prior edit.
    pub default_aspect_ratio: AspectRatio,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            default_aspect_ratio: AspectRatio::default(),
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the limits are usable.
    ///
    /// The minimum must be the base-fit scale of 1: zoom phase and pan bounds
    /// treat 1 as the idle scale, so any other floor would leave reset zoomed.
    pub fn validate(&self) -> Result<()> {
        let all_finite = [self.min_scale, self.max_scale, self.zoom_step]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(EditorError::InvalidConfig(
                "scale limits must be finite".to_string(),
            ));
        }
        if self.min_scale != MIN_SCALE {
            return Err(EditorError::InvalidConfig(format!(
                "min_scale {} must be {}",
                self.min_scale, MIN_SCALE
            )));
        }
        if self.max_scale <= self.min_scale {
            return Err(EditorError::InvalidConfig(format!(
                "max_scale {} must exceed min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "zoom_step {} must be positive",
                self.zoom_step
            )));
        }
        self.default_aspect_ratio.validate()
    }

    /// Clamp a scale into the configured range.
    ///
    /// Non-finite input falls back to the minimum.
    #[inline]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_finite() {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            self.min_scale
        }
    }
}
