//! Represents the caption band: a single measured line of text with an
//! optional background panel.

use crate::error::Result;
use crate::layer::{Layer, RenderContext};
use crate::layout::{self, Geometry, TextBand};
use crate::style::StyleConfig;

use libvips::VipsImage;

#[derive(Debug)]
pub struct CaptionLayer<'c> {
    text: &'c str,
    band: TextBand,
    surface_width: f64,
    max_width: f64,
    style: &'c StyleConfig,
}

impl<'c> CaptionLayer<'c> {
    pub fn new(text: &'c str, geometry: &Geometry, style: &'c StyleConfig) -> Self {
        Self {
            text,
            band: geometry.text_band,
            surface_width: geometry.surface_width,
            max_width: geometry.max_text_width(),
            style,
        }
    }

    /// Height of the background panel behind the caption.
    pub fn panel_height(text_size: u32) -> f64 {
        text_size as f64 * layout::LINE_HEIGHT_FACTOR + 2.0 * layout::TEXT_PADDING
    }

    /// Width of the background panel for a measured caption width. Uses the
    /// measured width even when the glyphs end up compressed.
    pub fn panel_width(measured: f64) -> f64 {
        measured + 2.0 * layout::TEXT_PADDING
    }
}

impl Layer for CaptionLayer<'_> {
    fn render(&self, img: VipsImage, ctx: &RenderContext) -> Result<VipsImage> {
        if self.text.is_empty() {
            return Ok(img);
        }
        let ib = ctx.backend;
        let style = self.style;
        let (glyphs, measured) =
            ib.caption(self.text, style.text_size as f64, style.text_color)?;

        let center_x = self.surface_width / 2.0;
        let text_y = self.band.top + layout::TEXT_PADDING;

        let mut img = img;
        if style.background_enabled {
            // Panel goes down before the glyphs so the text sits on top.
            let w = Self::panel_width(measured);
            let h = Self::panel_height(style.text_size);
            let panel =
                ib.new_canvas(&style.background_color, w.round() as i32, h.round() as i32)?;
            let x = (center_x - w / 2.0).round() as i32;
            let y = (text_y - layout::TEXT_PADDING).round() as i32;
            img = ib.overlay(&img, &panel, x, y)?;
        }

        // Text wider than its margins is compressed horizontally, never
        // wrapped.
        let glyphs = if measured > self.max_width {
            ib.scale(&glyphs, self.max_width / measured, 1.0)?
        } else {
            glyphs
        };
        let drawn_w = glyphs.get_width() as f64;
        let x = (center_x - drawn_w / 2.0).round() as i32;
        ib.overlay(&img, &glyphs, x, text_y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_tracks_measured_text() {
        assert_eq!(
            CaptionLayer::panel_height(48),
            48.0 * layout::LINE_HEIGHT_FACTOR + 30.0
        );
        assert_eq!(CaptionLayer::panel_width(512.0), 542.0);
    }
}
