//! Caption style parameters.

use crate::image::Color;
use crate::layout::TextPosition;

use serde::{Deserialize, Serialize};

/// Smallest text size offered by the UI slider.
pub const TEXT_SIZE_MIN: u32 = 20;
/// Largest text size offered by the UI slider.
pub const TEXT_SIZE_MAX: u32 = 100;
/// Slider step. None of these bounds are enforced by the core.
pub const TEXT_SIZE_STEP: u32 = 2;

/// Immutable styling for one render. The caller owns it; the compositor
/// never retains it between calls.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StyleConfig {
    pub text_color: Color,
    pub text_size: u32,
    pub background_enabled: bool,
    pub background_color: Color,
    pub text_position: TextPosition,
}

/// The documented reset state. A full style reset assigns this value
/// wholesale rather than restoring fields one by one.
impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            text_size: 48,
            background_enabled: false,
            background_color: Color::BLACK,
            text_position: TextPosition::AboveImage,
        }
    }
}
