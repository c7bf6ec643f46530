//! Gesture reducer.
//!
//! Live pan/pinch handling is a pure function `(tracker, event) -> tracker`.
//! The tracker keeps the value committed when the current gesture began;
//! each move event is applied as a delta (or factor) against that baseline,
//! so intermediate events never accumulate error.

use crate::config::EditorConfig;
use crate::geometry::{clamp_translation, FrameDimensions, Translation, ZoomPhase};

/// Scale and pan of the image inside the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub scale: f64,
    pub translation: Translation,
}

impl GestureState {
    /// Base-fit, centered.
    pub const IDLE: GestureState = GestureState {
        scale: 1.0,
        translation: Translation::ZERO,
    };

    #[inline]
    pub fn phase(&self) -> ZoomPhase {
        ZoomPhase::of(self.scale)
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Current gesture value plus the baseline the active gesture started from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureTracker {
    pub current: GestureState,
    pub start: GestureState,
}

impl GestureTracker {
    /// Tracker at rest on `state`.
    pub fn settled(state: GestureState) -> Self {
        Self {
            current: state,
            start: state,
        }
    }
}

/// Input to [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PanStart,
    /// Total finger movement since `PanStart`, in screen points.
    PanMove { dx: f64, dy: f64 },
    PanEnd,
    PinchStart,
    /// Ratio of current to initial finger distance since `PinchStart`.
    PinchMove { factor: f64 },
    PinchEnd,
    ZoomIn,
    ZoomOut,
    Reset,
}

/// Limits the reducer clamps against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub frame: FrameDimensions,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
}

impl GestureContext {
    pub fn new(frame: FrameDimensions, config: &EditorConfig) -> Self {
        Self {
            frame,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
        }
    }

    #[inline]
    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_finite() {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            self.min_scale
        }
    }

    /// Clamp translation to the pan bounds at `state.scale`.
    ///
    /// At or below base-fit the translation is pinned to the origin.
    #[inline]
    pub fn settle(&self, state: GestureState) -> GestureState {
        GestureState {
            scale: state.scale,
            translation: clamp_translation(state.translation, state.scale, self.frame),
        }
    }
}

/// Apply one gesture event.
pub fn reduce(tracker: GestureTracker, event: GestureEvent, ctx: &GestureContext) -> GestureTracker {
    let GestureTracker { current, start } = tracker;

    match event {
        GestureEvent::PanStart | GestureEvent::PinchStart => GestureTracker::settled(current),

        GestureEvent::PanMove { dx, dy } => {
            if !dx.is_finite() || !dy.is_finite() {
                return tracker;
            }
            let proposed = GestureState {
                scale: current.scale,
                translation: start.translation + Translation::new(dx, dy),
            };
            GestureTracker {
                current: ctx.settle(proposed),
                start,
            }
        }

        GestureEvent::PinchMove { factor } => {
            if !factor.is_finite() || factor <= 0.0 {
                return tracker;
            }
            let proposed = GestureState {
                scale: ctx.clamp_scale(start.scale * factor),
                translation: current.translation,
            };
            GestureTracker {
                current: ctx.settle(proposed),
                start,
            }
        }

        // Releasing commits the clamped value as the next baseline
        GestureEvent::PanEnd | GestureEvent::PinchEnd => GestureTracker::settled(ctx.settle(current)),

        GestureEvent::ZoomIn => {
            let zoomed = GestureState {
                scale: ctx.clamp_scale(current.scale + ctx.zoom_step),
                translation: current.translation,
            };
            GestureTracker::settled(ctx.settle(zoomed))
        }

        GestureEvent::ZoomOut => {
            let zoomed = GestureState {
                scale: ctx.clamp_scale(current.scale - ctx.zoom_step),
                translation: current.translation,
            };
            GestureTracker::settled(ctx.settle(zoomed))
        }

        GestureEvent::Reset => GestureTracker::settled(GestureState {
            scale: ctx.min_scale,
            translation: Translation::ZERO,
        }),
    }
}
