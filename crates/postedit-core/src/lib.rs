//! Postedit Core - crop and transform engine for the post media editor
//!
//! This crate turns the editor's visual state (base-fit scale, user zoom,
//! pan, rotation, aspect ratio) into the exact source-pixel rectangle to
//! extract, keeps live gestures inside valid bounds, and persists edits as
//! versioned descriptors that can be reopened later.
//!
//! Everything here is pure and synchronous; the host supplies measured
//! dimensions and gesture events and receives crop rectangles and
//! descriptors back.

pub mod aspect;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod session;

pub use aspect::{frame_for_ratio, AspectRatio, FrameBounds, Preset};
pub use config::EditorConfig;
pub use descriptor::{hydrate, parse_transform_states, HydratedState, TransformDescriptor};
pub use error::EditorError;
pub use geometry::{
    clamp_translation, compute_crop_rect, derive_base_scale, max_translation, CropParams,
    CropRect, FrameDimensions, ImageDimensions, Rotation, Translation, ZoomPhase,
};
pub use session::{EditorSession, GestureEvent, GestureState, SavedEdit};
