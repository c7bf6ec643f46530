//! Editor session.
//!
//! Owns the live editing state for one image: aspect ratio, rotation, and
//! the gesture tracker. Gesture events go through the pure reducer in
//! [`gesture`]; saving runs the crop solver and captures a new descriptor.

mod gesture;

pub use gesture::{reduce, GestureContext, GestureEvent, GestureState, GestureTracker};

use crate::aspect::{frame_for_ratio, AspectRatio, FrameBounds};
use crate::config::EditorConfig;
use crate::descriptor::{self, hydrate_with, TransformDescriptor};
use crate::error::{EditorError, Result};
use crate::geometry::{
    compute_crop_rect, derive_base_scale, CropParams, CropRect, FrameDimensions, ImageDimensions,
    Rotation, ZoomPhase,
};

/// Output of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedEdit {
    pub descriptor: TransformDescriptor,
    pub crop_rect: CropRect,
}

/// Live editing state for a single image.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    image: ImageDimensions,
    bounds: FrameBounds,
    aspect_ratio: AspectRatio,
    rotation: Rotation,
    frame: FrameDimensions,
    tracker: GestureTracker,
}

impl EditorSession {
    /// Start a fresh edit.
    ///
    /// # Errors
    ///
    /// Fails when the image or container has a zero side, or the
    /// configuration is inconsistent.
    pub fn new(image: ImageDimensions, bounds: FrameBounds, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        if !image.is_valid() {
            return Err(EditorError::InvalidImageDimensions {
                width: image.width,
                height: image.height,
            });
        }
        bounds.validate()?;

        let aspect_ratio = config.default_aspect_ratio;
        let mut session = Self {
            config,
            image,
            bounds,
            aspect_ratio,
            rotation: Rotation::Deg0,
            frame: FrameDimensions::new(1, 1),
            tracker: GestureTracker::default(),
        };
        session.refresh_frame();
        Ok(session)
    }

    /// Reopen a previous edit from its descriptor.
    ///
    /// Hydration itself never fails; only the dimension and configuration
    /// checks of [`EditorSession::new`] can.
    pub fn resume(
        image: ImageDimensions,
        bounds: FrameBounds,
        config: EditorConfig,
        descriptor: &TransformDescriptor,
    ) -> Result<Self> {
        let mut session = Self::new(image, bounds, config)?;
        let state = hydrate_with(descriptor, &session.config);

        if descriptor.base.is_valid() && descriptor.base != image {
            log::warn!(
                "Resuming edit made on {}x{} for a {}x{} image",
                descriptor.base.width,
                descriptor.base.height,
                image.width,
                image.height
            );
        }

        session.aspect_ratio = state.aspect_ratio;
        session.rotation = state.rotation;
        session.tracker = GestureTracker::settled(GestureState {
            scale: state.scale,
            translation: state.translation,
        });
        session.refresh_frame();
        Ok(session)
    }

    /// Reopen a previous edit from descriptor JSON. Unreadable text starts
    /// from defaults.
    pub fn resume_from_json(
        image: ImageDimensions,
        bounds: FrameBounds,
        config: EditorConfig,
        text: &str,
    ) -> Result<Self> {
        Self::resume(image, bounds, config, &TransformDescriptor::from_json(text))
    }

    /// Feed one gesture event through the reducer.
    pub fn apply(&mut self, event: GestureEvent) -> GestureState {
        self.tracker = reduce(self.tracker, event, &self.gesture_context());
        self.tracker.current
    }

    pub fn zoom_in(&mut self) -> GestureState {
        self.apply(GestureEvent::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> GestureState {
        self.apply(GestureEvent::ZoomOut)
    }

    pub fn reset(&mut self) -> GestureState {
        self.apply(GestureEvent::Reset)
    }

    /// Advance rotation by 90° clockwise. Scale is kept.
    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.next();
        log::debug!("Rotation set to {}", self.rotation.degrees());
        self.refresh_frame();
        self.rotation
    }

    /// Select a new aspect ratio and refit the frame.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> Result<()> {
        aspect_ratio.validate()?;
        self.aspect_ratio = aspect_ratio;
        log::debug!("Aspect ratio set to {}", aspect_ratio);
        self.refresh_frame();
        Ok(())
    }

    /// Update the space available on screen, e.g. after a layout change.
    pub fn set_frame_bounds(&mut self, bounds: FrameBounds) -> Result<()> {
        bounds.validate()?;
        self.bounds = bounds;
        self.refresh_frame();
        Ok(())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Natural size of the source image.
    pub fn image(&self) -> ImageDimensions {
        self.image
    }

    /// Source size as currently displayed, after rotation.
    pub fn displayed_image(&self) -> ImageDimensions {
        self.image.rotated(self.rotation)
    }

    pub fn gesture(&self) -> GestureState {
        self.tracker.current
    }

    pub fn phase(&self) -> ZoomPhase {
        self.tracker.current.phase()
    }

    pub fn frame(&self) -> FrameDimensions {
        self.frame
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn base_scale(&self) -> f64 {
        derive_base_scale(self.displayed_image(), self.frame)
    }

    /// Crop for the current state, in rotated-image pixels.
    pub fn crop_rect(&self) -> CropRect {
        let gesture = self.tracker.current;
        compute_crop_rect(&CropParams {
            image: self.displayed_image(),
            frame: self.frame,
            base_scale: self.base_scale(),
            user_scale: gesture.scale,
            translation: gesture.translation,
        })
    }

    /// Finish the edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DegenerateCrop`] if the crop has no area.
    pub fn save(&self) -> Result<SavedEdit> {
        let crop_rect = self.crop_rect();
        if crop_rect.is_empty() {
            log::warn!(
                "Refusing to save degenerate crop {}x{}",
                crop_rect.width,
                crop_rect.height
            );
            return Err(EditorError::DegenerateCrop {
                width: crop_rect.width,
                height: crop_rect.height,
            });
        }

        let gesture = self.tracker.current;
        let descriptor = descriptor::serialize(
            self.aspect_ratio,
            self.image,
            crop_rect,
            gesture.scale,
            self.base_scale(),
            gesture.translation,
            self.rotation,
        );
        Ok(SavedEdit {
            descriptor,
            crop_rect,
        })
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext::new(self.frame, &self.config)
    }

    /// Recompute the frame and re-clamp the gesture into its bounds.
    fn refresh_frame(&mut self) {
        let ratio = self.aspect_ratio.ratio(self.displayed_image());
        self.frame = frame_for_ratio(ratio, self.bounds);

        let ctx = self.gesture_context();
        let current = self.tracker.current;
        let scale = self.config.clamp_scale(current.scale);
        self.tracker = GestureTracker::settled(ctx.settle(GestureState {
            scale,
            translation: current.translation,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::Preset;
    use crate::geometry::Translation;
    use serde_json::json;

    fn session(w: u32, h: u32) -> EditorSession {
        EditorSession::new(
            ImageDimensions::new(w, h),
            FrameBounds::new(600, 900),
            EditorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_image() {
        let err = EditorSession::new(
            ImageDimensions::new(0, 100),
            FrameBounds::new(600, 900),
            EditorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EditorError::InvalidImageDimensions { .. }));
    }

    #[test]
    fn test_rejects_zero_bounds() {
        let err = EditorSession::new(
            ImageDimensions::new(100, 100),
            FrameBounds::new(600, 0),
            EditorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EditorError::InvalidFrameBounds { .. }));
    }

    #[test]
    fn test_rejects_raised_scale_floor() {
        // A floor above 1 would leave reset zoomed with panning allowed
        let mut config = EditorConfig::default();
        config.min_scale = 1.5;
        let err = EditorSession::new(
            ImageDimensions::new(1200, 800),
            FrameBounds::new(600, 900),
            config,
        )
        .unwrap_err();
        assert!(matches!(err, EditorError::InvalidConfig(_)));
    }

    #[test]
    fn test_fresh_session_defaults() {
        let s = session(1200, 800);
        assert_eq!(s.aspect_ratio(), AspectRatio::Preset(Preset::Square));
        assert_eq!(s.frame(), FrameDimensions::new(600, 600));
        assert_eq!(s.base_scale(), 0.5);
        assert_eq!(s.phase(), ZoomPhase::Idle);
        assert_eq!(s.crop_rect(), CropRect::new(0, 0, 1200, 800));
    }

    #[test]
    fn test_zoom_and_pan_then_save() {
        let mut s = session(1200, 800);
        s.zoom_in();
        s.zoom_in();
        assert_eq!(s.gesture().scale, 2.0);

        s.apply(GestureEvent::PanStart);
        s.apply(GestureEvent::PanMove { dx: 100.0, dy: 0.0 });
        s.apply(GestureEvent::PanEnd);

        let saved = s.save().unwrap();
        assert_eq!(saved.crop_rect, CropRect::new(200, 100, 600, 600));
        assert_eq!(saved.descriptor.crop_rect, saved.crop_rect);
        assert_eq!(saved.descriptor.scale, 2.0);
        assert_eq!(saved.descriptor.base_scale, 0.5);
        assert_eq!(saved.descriptor.translation, Translation::new(100.0, 0.0));
        assert_eq!(saved.descriptor.base, ImageDimensions::new(1200, 800));
    }

    #[test]
    fn test_aspect_change_refits_frame_and_clamps_pan() {
        let mut s = session(1200, 800);
        s.apply(GestureEvent::PinchStart);
        s.apply(GestureEvent::PinchMove { factor: 2.0 });
        s.apply(GestureEvent::PinchEnd);
        s.apply(GestureEvent::PanStart);
        s.apply(GestureEvent::PanMove { dx: 0.0, dy: 400.0 });
        s.apply(GestureEvent::PanEnd);
        assert_eq!(s.gesture().translation.y, 300.0);

        // 9:16 in 600x900 is height-limited: 900 * 9/16 = 506.25
        s.set_aspect_ratio(AspectRatio::Preset(Preset::Story)).unwrap();
        assert_eq!(s.frame(), FrameDimensions::new(506, 900));
        assert_eq!(s.gesture().translation.y, 300.0);

        s.set_aspect_ratio(AspectRatio::Preset(Preset::Square)).unwrap();
        assert_eq!(s.gesture().translation.y, 300.0);

        s.set_frame_bounds(FrameBounds::new(300, 300)).unwrap();
        assert_eq!(s.gesture().translation.y, 150.0);
    }

    #[test]
    fn test_invalid_custom_ratio_rejected() {
        let mut s = session(100, 100);
        let err = s
            .set_aspect_ratio(AspectRatio::Custom { width: 0, height: 1 })
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidAspectRatio(_)));
        assert_eq!(s.aspect_ratio(), AspectRatio::Preset(Preset::Square));
    }

    #[test]
    fn test_rotation_swaps_displayed_image() {
        let mut s = session(1200, 800);
        s.set_aspect_ratio(AspectRatio::Preset(Preset::Original)).unwrap();
        assert_eq!(s.frame(), FrameDimensions::new(600, 400));

        assert_eq!(s.rotate(), Rotation::Deg90);
        assert_eq!(s.displayed_image(), ImageDimensions::new(800, 1200));
        assert_eq!(s.frame(), FrameDimensions::new(600, 900));
        assert_eq!(s.crop_rect(), CropRect::new(0, 0, 800, 1200));

        s.rotate();
        s.rotate();
        assert_eq!(s.rotate(), Rotation::Deg0);
    }

    #[test]
    fn test_save_then_resume_restores_state() {
        let mut s = session(3000, 2000);
        s.set_aspect_ratio(AspectRatio::Preset(Preset::Portrait)).unwrap();
        s.rotate();
        s.zoom_in();
        s.apply(GestureEvent::PanStart);
        s.apply(GestureEvent::PanMove { dx: -40.0, dy: 25.0 });
        s.apply(GestureEvent::PanEnd);
        let saved = s.save().unwrap();

        let text = saved.descriptor.to_json().unwrap();
        let resumed = EditorSession::resume_from_json(
            ImageDimensions::new(3000, 2000),
            FrameBounds::new(600, 900),
            EditorConfig::default(),
            &text,
        )
        .unwrap();

        assert_eq!(resumed.aspect_ratio(), s.aspect_ratio());
        assert_eq!(resumed.rotation(), s.rotation());
        assert_eq!(resumed.gesture(), s.gesture());
        assert_eq!(resumed.frame(), s.frame());
        assert_eq!(resumed.crop_rect(), saved.crop_rect);
    }

    #[test]
    fn test_resume_from_garbage_starts_fresh() {
        let s = EditorSession::resume_from_json(
            ImageDimensions::new(1200, 800),
            FrameBounds::new(600, 900),
            EditorConfig::default(),
            "{\"scale\": \"oops\", \"rotation\": 33",
        )
        .unwrap();
        assert_eq!(s.gesture(), GestureState::IDLE);
        assert_eq!(s.rotation(), Rotation::Deg0);
        assert_eq!(s.aspect_ratio(), AspectRatio::Preset(Preset::Square));
    }

    #[test]
    fn test_resume_clamps_out_of_range_state() {
        let descriptor = TransformDescriptor::from_raw(&json!({
            "scale": 9.0,
            "translation": {"x": 10_000.0, "y": -10_000.0}
        }));
        let s = EditorSession::resume(
            ImageDimensions::new(1200, 800),
            FrameBounds::new(600, 900),
            EditorConfig::default(),
            &descriptor,
        )
        .unwrap();
        assert_eq!(s.gesture().scale, 4.0);
        // (4 - 1) * 600 / 2 = 900
        assert_eq!(s.gesture().translation, Translation::new(900.0, -900.0));
    }

    #[test]
    fn test_degenerate_save_rejected() {
        let mut config = EditorConfig::default();
        config.max_scale = 1e12;
        config.zoom_step = 1e12;
        let mut s = EditorSession::new(
            ImageDimensions::new(2, 2),
            FrameBounds::new(10, 10),
            config,
        )
        .unwrap();
        s.zoom_in();
        assert!(matches!(
            s.save(),
            Err(EditorError::DegenerateCrop { .. })
        ));
    }

    #[test]
    fn test_config_default_aspect_used() {
        let mut config = EditorConfig::default();
        config.default_aspect_ratio = AspectRatio::Preset(Preset::Portrait);
        let s = EditorSession::new(
            ImageDimensions::new(1000, 1000),
            FrameBounds::new(400, 1000),
            config,
        )
        .unwrap();
        assert_eq!(s.frame(), FrameDimensions::new(400, 500));
    }
}
