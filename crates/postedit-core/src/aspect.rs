//! Aspect ratio selection and frame sizing.
//!
//! The editor offers a handful of presets plus free-form `W:H` ratios. A
//! selection is resolved to a single number once, before any geometry runs,
//! and the frame is then fitted inside the available container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::geometry::{FrameDimensions, ImageDimensions};

/// Built-in aspect ratio choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 1:1
    Square,
    /// 4:5
    Portrait,
    /// 9:16
    Story,
    /// The image's own ratio.
    Original,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Square,
        Preset::Portrait,
        Preset::Story,
        Preset::Original,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Square => "1:1",
            Preset::Portrait => "4:5",
            Preset::Story => "9:16",
            Preset::Original => "original",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Preset::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Aspect ratio selected in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AspectRatio {
    Preset(Preset),
    Custom { width: u32, height: u32 },
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Preset(Preset::Square)
    }
}

impl AspectRatio {
    /// Create a custom ratio, rejecting zero sides.
    pub fn custom(width: u32, height: u32) -> Result<Self> {
        let ratio = AspectRatio::Custom { width, height };
        ratio.validate()?;
        Ok(ratio)
    }

    /// Label as stored in transform descriptors (`"1:1"`, `"original"`, `"3:2"`).
    pub fn label(&self) -> String {
        match self {
            AspectRatio::Preset(preset) => preset.label().to_string(),
            AspectRatio::Custom { width, height } => format!("{}:{}", width, height),
        }
    }

    /// Width over height for this selection.
    ///
    /// `image` is the source as currently displayed (after rotation); it is
    /// only consulted for [`Preset::Original`].
    pub fn ratio(&self, image: ImageDimensions) -> f64 {
        match self {
            AspectRatio::Preset(Preset::Square) => 1.0,
            AspectRatio::Preset(Preset::Portrait) => 4.0 / 5.0,
            AspectRatio::Preset(Preset::Story) => 9.0 / 16.0,
            AspectRatio::Preset(Preset::Original) => image.aspect_ratio(),
            AspectRatio::Custom { width, height } => *width as f64 / *height as f64,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            AspectRatio::Custom { width, height } if *width == 0 || *height == 0 => Err(
                EditorError::InvalidAspectRatio(format!("{}:{}", width, height)),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        if let Some(preset) = Preset::from_label(&label.to_ascii_lowercase()) {
            return Ok(AspectRatio::Preset(preset));
        }

        let invalid = || EditorError::InvalidAspectRatio(label.to_string());
        let (w, h) = label.split_once(':').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        // Custom ratios that spell out a preset collapse to it
        let ratio = AspectRatio::custom(width, height)?;
        Ok(Preset::from_label(&ratio.label())
            .map(AspectRatio::Preset)
            .unwrap_or(ratio))
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.label()
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Space available for the editing frame on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl FrameBounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(EditorError::InvalidFrameBounds {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }
}

/// Largest frame with the given width/height ratio that fits the bounds.
///
/// The frame fills the full width unless that would exceed the height
/// limit. Sides are rounded to whole points and never drop below 1.
pub fn frame_for_ratio(ratio: f64, bounds: FrameBounds) -> FrameDimensions {
    let max_w = bounds.max_width.max(1) as f64;
    let max_h = bounds.max_height.max(1) as f64;

    if !ratio.is_finite() || ratio <= 0.0 {
        return FrameDimensions::new(max_w as u32, max_w.min(max_h) as u32);
    }

    let (w, h) = if max_w / ratio <= max_h {
        (max_w, max_w / ratio)
    } else {
        (max_h * ratio, max_h)
    };

    FrameDimensions::new(round_side(w, max_w), round_side(h, max_h))
}

#[inline]
fn round_side(side: f64, max: f64) -> u32 {
    side.round().clamp(1.0, max) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_labels_round_trip() {
        for preset in Preset::ALL {
            let ratio: AspectRatio = preset.label().parse().unwrap();
            assert_eq!(ratio, AspectRatio::Preset(preset));
        }
    }

    #[test]
    fn test_parse_custom() {
        let ratio: AspectRatio = "3:2".parse().unwrap();
        assert_eq!(ratio, AspectRatio::Custom { width: 3, height: 2 });
        assert_eq!(ratio.label(), "3:2");
    }

    #[test]
    fn test_custom_spelling_preset_collapses() {
        let ratio: AspectRatio = " 4 : 5 ".parse().unwrap();
        assert_eq!(ratio, AspectRatio::Preset(Preset::Portrait));
    }

    #[test]
    fn test_parse_case_insensitive_original() {
        let ratio: AspectRatio = "Original".parse().unwrap();
        assert_eq!(ratio, AspectRatio::Preset(Preset::Original));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("square".parse::<AspectRatio>().is_err());
        assert!("0:5".parse::<AspectRatio>().is_err());
        assert!("4:".parse::<AspectRatio>().is_err());
        assert!("-1:2".parse::<AspectRatio>().is_err());
        assert!(AspectRatio::custom(3, 0).is_err());
    }

    #[test]
    fn test_resolved_ratios() {
        let image = ImageDimensions::new(1200, 800);
        assert_eq!(AspectRatio::Preset(Preset::Square).ratio(image), 1.0);
        assert_eq!(AspectRatio::Preset(Preset::Portrait).ratio(image), 0.8);
        assert_eq!(AspectRatio::Preset(Preset::Story).ratio(image), 0.5625);
        assert_eq!(AspectRatio::Preset(Preset::Original).ratio(image), 1.5);
        assert_eq!(AspectRatio::Custom { width: 2, height: 1 }.ratio(image), 2.0);
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&AspectRatio::Preset(Preset::Story)).unwrap();
        assert_eq!(json, "\"9:16\"");
        let ratio: AspectRatio = serde_json::from_str("\"16:9\"").unwrap();
        assert_eq!(ratio, AspectRatio::Custom { width: 16, height: 9 });
    }

    #[test]
    fn test_frame_fills_width() {
        let bounds = FrameBounds::new(400, 800);
        assert_eq!(frame_for_ratio(1.0, bounds), FrameDimensions::new(400, 400));
        assert_eq!(frame_for_ratio(0.8, bounds), FrameDimensions::new(400, 500));
    }

    #[test]
    fn test_frame_limited_by_height() {
        let bounds = FrameBounds::new(400, 600);
        // 400 / (9/16) = 711 > 600, so fit by height: 600 * 9/16 = 337.5
        let frame = frame_for_ratio(9.0 / 16.0, bounds);
        assert_eq!(frame, FrameDimensions::new(338, 600));
    }

    #[test]
    fn test_frame_never_collapses() {
        let frame = frame_for_ratio(10_000.0, FrameBounds::new(400, 600));
        assert_eq!(frame, FrameDimensions::new(400, 1));
    }

    #[test]
    fn test_frame_bounds_validation() {
        assert!(FrameBounds::new(0, 100).validate().is_err());
        assert!(FrameBounds::new(100, 100).validate().is_ok());
    }
}
