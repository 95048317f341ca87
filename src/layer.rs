//! Implements the layers composited onto the output surface.

mod caption;
mod picture;

pub use caption::CaptionLayer;
pub use picture::PictureLayer;

use crate::error::Result;
use crate::image::{Color, ImgBackend};
use crate::layout::Geometry;
use crate::style::StyleConfig;

use core::fmt::Debug;
use libvips::VipsImage;

pub struct RenderContext<'a> {
    pub backend: &'a ImgBackend,
}

pub trait Layer: Debug {
    fn render(&self, img: VipsImage, ctx: &RenderContext) -> Result<VipsImage>;
}

#[derive(Debug)]
pub struct LayerStack<'a>(pub Vec<Box<dyn Layer + 'a>>);

impl<'a> LayerStack<'a> {
    /// Creates the cleared surface for `geometry` and folds the layers over
    /// it. Every invocation repaints from scratch; there is no incremental
    /// redraw, so a failed render never leaves half-drawn output behind.
    pub fn render(self, ctx: &RenderContext, geometry: &Geometry) -> Result<VipsImage> {
        let w = geometry.surface_width.round() as i32;
        let h = geometry.surface_height.round() as i32;
        let mut img = ctx.backend.new_canvas(&Color::TRANSPARENT, w, h)?;

        let LayerStack(layers) = self;
        for layer in layers.into_iter() {
            img = layer.render(img, ctx)?;
        }
        Ok(img)
    }
}

/// Composites one full frame: the picture in its rect, then the caption in
/// its band. The image handle is borrowed for the duration of the call only.
pub fn compose(
    backend: &ImgBackend,
    image: &VipsImage,
    caption: &str,
    geometry: &Geometry,
    style: &StyleConfig,
) -> Result<VipsImage> {
    let ctx = RenderContext { backend };
    let stack = LayerStack(vec![
        Box::new(PictureLayer::new(image, geometry.image_rect)),
        Box::new(CaptionLayer::new(caption, geometry, style)),
    ]);
    stack.render(&ctx, geometry)
}
