//! Pan bounds for interactive editing.
//!
//! Panning is bounded by the crop frame: at scale `s` the translation may
//! move up to `(s - 1) * frame / 2` in either direction. At or below the
//! base-fit scale there is nothing to reveal and the translation is pinned
//! to the origin.

use super::{FrameDimensions, Translation};

/// Zoom state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    /// Base-fit scale, no pan.
    Idle,
    /// Zoomed in past base-fit, panning allowed.
    Zoomed,
}

impl ZoomPhase {
    /// Phase for a given user scale.
    #[inline]
    pub fn of(scale: f64) -> Self {
        if scale > 1.0 {
            ZoomPhase::Zoomed
        } else {
            ZoomPhase::Idle
        }
    }

    #[inline]
    pub fn is_zoomed(self) -> bool {
        self == ZoomPhase::Zoomed
    }
}

/// Largest allowed translation magnitude on each axis.
///
/// Zero on both axes when `scale <= 1`; otherwise grows linearly with
/// `scale - 1`.
#[inline]
pub fn max_translation(scale: f64, frame: FrameDimensions) -> Translation {
    if !scale.is_finite() || scale <= 1.0 {
        return Translation::ZERO;
    }
    let excess = scale - 1.0;
    Translation {
        x: excess * frame.width as f64 / 2.0,
        y: excess * frame.height as f64 / 2.0,
    }
}

/// Clamp a proposed translation into the pan bounds for `scale`.
///
/// Returns `(0, 0)` when the scale is at or below base-fit. Non-finite
/// components collapse to 0.
pub fn clamp_translation(proposed: Translation, scale: f64, frame: FrameDimensions) -> Translation {
    let max = max_translation(scale, frame);
    if max.is_zero() {
        return Translation::ZERO;
    }
    Translation {
        x: clamp_axis(proposed.x, max.x),
        y: clamp_axis(proposed.y, max.y),
    }
}

#[inline]
fn clamp_axis(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-max, max)
    }
}
