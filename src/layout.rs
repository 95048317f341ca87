//! Surface geometry: sizes the output surface and splits it into an image
//! rect and a caption band.

use serde::{Deserialize, Serialize};

/// Upper bound on the surface width, keeping layout stable on wide viewports.
pub const MAX_SURFACE_WIDTH: f64 = 800.0;
/// Aspect ratio (height / width) assumed while the image is still decoding.
pub const FALLBACK_ASPECT_RATIO: f64 = 3.0 / 4.0;
/// Single-line height estimate as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Vertical padding above and below the caption line within its band.
pub const BAND_VERTICAL_PADDING: f64 = 20.0;
/// Horizontal margin on each side of the caption.
pub const TEXT_HORIZONTAL_MARGIN: f64 = 20.0;
/// Inner padding between the caption glyphs and the band top / panel edges.
pub const TEXT_PADDING: f64 = 15.0;

/// Placement of the caption band relative to the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPosition {
    AboveImage,
    BelowImage,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::AboveImage
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// The caption's horizontal band. It always spans the full surface width.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextBand {
    pub top: f64,
    pub height: f64,
}

/// Pixel layout of one render: total surface size plus the image/caption
/// split. A pure function of its inputs, recomputed whenever any of them
/// changes; it holds no state of its own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geometry {
    pub surface_width: f64,
    pub surface_height: f64,
    pub image_rect: Rect,
    pub text_band: TextBand,
}

impl Geometry {
    /// Maximum rendered caption width before glyphs are compressed.
    pub fn max_text_width(&self) -> f64 {
        self.surface_width - 2.0 * TEXT_HORIZONTAL_MARGIN
    }
}

/// Computes the surface geometry for one render.
///
/// `aspect_ratio` is the image's natural height over its natural width;
/// `None` means the image has not decoded yet and the 3:4 fallback is used
/// so layout can proceed. A geometry built from the fallback is provisional:
/// callers recompute once decode resolves, and only post-decode geometry may
/// back an exported surface.
pub fn compute_geometry(
    container_width: f64,
    aspect_ratio: Option<f64>,
    text_size: u32,
    text_position: TextPosition,
) -> Geometry {
    let surface_width = container_width.min(MAX_SURFACE_WIDTH);
    let ratio = aspect_ratio.unwrap_or(FALLBACK_ASPECT_RATIO);
    let band_height = text_size as f64 * LINE_HEIGHT_FACTOR + 2.0 * BAND_VERTICAL_PADDING;
    let image_height = surface_width * ratio;
    let surface_height = image_height + band_height;

    let (band_top, image_top) = match text_position {
        TextPosition::AboveImage => (0.0, band_height),
        TextPosition::BelowImage => (image_height, 0.0),
    };

    Geometry {
        surface_width,
        surface_height,
        image_rect: Rect {
            x: 0.0,
            y: image_top,
            w: surface_width,
            h: image_height,
        },
        text_band: TextBand {
            top: band_top,
            height: band_height,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band_height(text_size: u32) -> f64 {
        text_size as f64 * LINE_HEIGHT_FACTOR + 2.0 * BAND_VERTICAL_PADDING
    }

    #[test]
    fn surface_width_matches_narrow_containers() {
        for w in [120.0, 375.0, 799.0, 800.0] {
            let g = compute_geometry(w, Some(1.0), 48, TextPosition::AboveImage);
            assert_eq!(g.surface_width, w);
        }
    }

    #[test]
    fn surface_width_caps_at_800() {
        for w in [801.0, 1024.0, 2560.0] {
            let g = compute_geometry(w, Some(1.0), 48, TextPosition::AboveImage);
            assert_eq!(g.surface_width, MAX_SURFACE_WIDTH);
        }
    }

    #[test]
    fn bands_tile_the_surface_vertically() {
        for position in [TextPosition::AboveImage, TextPosition::BelowImage] {
            for size in [20, 48, 100] {
                let g = compute_geometry(640.0, Some(0.6), size, position);
                assert_eq!(g.surface_height, g.image_rect.h + g.text_band.height);
                assert_eq!(g.image_rect.w, g.surface_width);
            }
        }
    }

    #[test]
    fn band_height_formula_at_size_bounds() {
        for size in [20, 100] {
            let g = compute_geometry(800.0, Some(1.0), size, TextPosition::AboveImage);
            assert_eq!(g.text_band.height, band_height(size));
        }
    }

    #[test]
    fn square_image_above_placement() {
        let g = compute_geometry(800.0, Some(1.0), 48, TextPosition::AboveImage);
        let band = band_height(48);
        assert_eq!(g.text_band.top, 0.0);
        assert_eq!(g.text_band.height, band);
        assert_eq!(g.image_rect.y, band);
        assert_eq!(g.image_rect.h, 800.0);
        assert_eq!(g.surface_height, 800.0 + band);
    }

    #[test]
    fn below_placement_mirrors_the_split() {
        let g = compute_geometry(800.0, Some(1.0), 48, TextPosition::BelowImage);
        assert_eq!(g.image_rect.y, 0.0);
        assert_eq!(g.text_band.top, g.image_rect.h);
        assert_eq!(g.surface_height, g.text_band.top + g.text_band.height);
    }

    #[test]
    fn missing_ratio_falls_back_to_three_quarters() {
        let g = compute_geometry(800.0, None, 48, TextPosition::AboveImage);
        assert_eq!(g.image_rect.h, 800.0 * FALLBACK_ASPECT_RATIO);
    }

    #[test]
    fn max_text_width_leaves_side_margins() {
        let g = compute_geometry(800.0, Some(1.0), 48, TextPosition::AboveImage);
        assert_eq!(g.max_text_width(), 760.0);
    }

    #[test]
    fn text_position_wire_names() {
        let p: TextPosition = serde_json::from_str("\"above-image\"").unwrap();
        assert_eq!(p, TextPosition::AboveImage);
        let p: TextPosition = serde_json::from_str("\"below-image\"").unwrap();
        assert_eq!(p, TextPosition::BelowImage);
    }
}
