//! Represents the image band: the uploaded picture scaled to the width of
//! its rect.

use crate::error::Result;
use crate::layer::{Layer, RenderContext};
use crate::layout::Rect;

use libvips::VipsImage;
use std::fmt;

pub struct PictureLayer<'i> {
    image: &'i VipsImage,
    rect: Rect,
}

impl<'i> PictureLayer<'i> {
    pub fn new(image: &'i VipsImage, rect: Rect) -> Self {
        Self { image, rect }
    }
}

impl fmt::Debug for PictureLayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PictureLayer({}x{} into {:?})",
            self.image.get_width(),
            self.image.get_height(),
            self.rect
        )
    }
}

impl Layer for PictureLayer<'_> {
    fn render(&self, img: VipsImage, ctx: &RenderContext) -> Result<VipsImage> {
        let ib = ctx.backend;
        let rect = self.rect;

        let s = rect.w / self.image.get_width() as f64;
        let scaled = ib.scale(self.image, s, s)?;
        let scaled_h = scaled.get_height() as f64;

        if scaled_h > rect.h {
            // Taller than the rect: clip top and bottom equally, no further
            // scaling.
            let top = ((scaled_h - rect.h) / 2.0).round() as i32;
            let h = (rect.h.round() as i32).min(scaled.get_height() - top);
            let cropped = ib.crop(&scaled, 0, top, scaled.get_width(), h)?;
            ib.overlay(&img, &cropped, rect.x.round() as i32, rect.y.round() as i32)
        } else {
            // Shorter: letterbox, the backdrop shows through above and below.
            let dy = (rect.h - scaled_h) / 2.0;
            ib.overlay(
                &img,
                &scaled,
                rect.x.round() as i32,
                (rect.y + dy).round() as i32,
            )
        }
    }
}
