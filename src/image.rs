//! Image backend implementation.

mod color;

use crate::error::{Error, Result};
pub use crate::image::color::Color;

use cairo::ImageSurface;
use libvips::{ops, VipsApp, VipsImage};
use pango::prelude::FontMapExt;
use std::sync::OnceLock;

static VIPS_INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Provides the drawing primitives the compositor is built from.
///
/// The underlying vips library is initialized once per process and stays
/// initialized; shutting it down on drop would invalidate every other
/// backend still alive.
pub struct ImgBackend {
    _private: (),
}

impl ImgBackend {
    pub fn new() -> Result<Self> {
        let init = VIPS_INIT.get_or_init(|| match VipsApp::default("captionate") {
            Ok(app) => {
                std::mem::forget(app);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        });
        init.clone().map_err(Error::VipsError)?;
        Ok(Self { _private: () })
    }

    pub fn err(&self, e: libvips::error::Error) -> Error {
        Error::VipsError(e.to_string())
    }

    fn reinterpret(&self, img: &VipsImage) -> Result<VipsImage> {
        let img = ops::cast(&img, ops::BandFormat::Uchar).map_err(|e| self.err(e))?;
        let img = ops::copy_with_opts(
            &img,
            &ops::CopyOptions {
                interpretation: ops::Interpretation::Srgb,
                width: img.get_width(),
                height: img.get_height(),
                bands: img.get_bands(),
                format: ops::BandFormat::Uchar,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))?;
        if img.get_bands() == 3 {
            ops::bandjoin_const(&img, &mut [255.0]).map_err(|e| self.err(e))
        } else {
            Ok(img)
        }
    }

    /// Decodes an in-memory encoded image blob (any raster format vips
    /// understands), normalized to 8-bit sRGB with an alpha band.
    pub fn decode(&self, bytes: &[u8]) -> Result<VipsImage> {
        let mut img = VipsImage::new_from_buffer(bytes, "")
            .map_err(|e| Error::ImageDecodeFailed(e.to_string()))?;
        img.image_wio_input()
            .map_err(|e| Error::ImageDecodeFailed(e.to_string()))?;
        let img = self.reinterpret(&img)?;
        log::debug!("decoded image {}x{}", img.get_width(), img.get_height());
        Ok(img)
    }

    /// Creates a flat canvas. With a transparent color this is the cleared
    /// surface every render starts from.
    pub fn new_canvas(&self, bg: &Color, width: i32, height: i32) -> Result<VipsImage> {
        let (r, g, b, a) = bg.scaled_rgba();
        let img = ops::black_with_opts(width, height, &ops::BlackOptions { bands: 4 })
            .map_err(|e| self.err(e))?;
        let img = VipsImage::new_from_image(&img, &[r, g, b, a]).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn cairo_to_vips(&self, img: ImageSurface) -> Result<VipsImage> {
        let mut buffer = Vec::new();
        img.write_to_png(&mut buffer)
            .map_err(|e| Error::CanvasUnavailable(e.to_string()))?;
        let mut img = VipsImage::new_from_buffer(&buffer, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn scale(&self, img: &VipsImage, sx: f64, sy: f64) -> Result<VipsImage> {
        ops::resize_with_opts(
            &img,
            sx,
            &ops::ResizeOptions {
                vscale: sy,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))
    }

    pub fn crop(
        &self,
        img: &VipsImage,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> Result<VipsImage> {
        ops::extract_area(img, left, top, width, height).map_err(|e| self.err(e))
    }

    /// Composites `src` over `base` with its top-left corner at `(x, y)`.
    /// Pixels outside the base bounds are clipped.
    pub fn overlay(&self, base: &VipsImage, src: &VipsImage, x: i32, y: i32) -> Result<VipsImage> {
        let (bw, bh) = (base.get_width(), base.get_height());
        let src = ops::embed(&src, x, y, bw, bh).map_err(|e| self.err(e))?;
        ops::composite_2(&base, &src, ops::BlendMode::Over).map_err(|e| self.err(e))
    }

    /// Renders a single caption line in a bold sans face at an absolute
    /// pixel size, returning the glyph image and the measured logical width.
    /// The measured width is taken before any compression the compositor
    /// may apply.
    pub fn caption(&self, text: &str, size: f64, color: Color) -> Result<(VipsImage, f64)> {
        let err = |e: cairo::Error| Error::CanvasUnavailable(e.to_string());
        let ctx = pangocairo::FontMap::new().create_context();
        let layout = pango::Layout::new(&ctx);

        let mut opt = cairo::FontOptions::new().map_err(err)?;
        opt.set_antialias(cairo::Antialias::Good);
        pangocairo::functions::context_set_font_options(&ctx, Some(&opt));

        let mut desc = pango::FontDescription::new();
        desc.set_family("sans");
        desc.set_weight(pango::Weight::Bold);
        desc.set_absolute_size(size * pango::SCALE as f64);
        layout.set_font_description(Some(&desc));
        layout.set_text(text);

        let (_, log_rect) = layout.extents();
        let width = log_rect.width() / pango::SCALE;
        let height = log_rect.height() / pango::SCALE;
        let base = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            width.max(1),
            height.max(1),
        )
        .map_err(err)?;
        let cr = cairo::Context::new(&base).map_err(err)?;
        let (r, g, b, a) = color.rgba();
        cr.set_source_rgba(r, g, b, a);
        pangocairo::functions::show_layout(&cr, &layout);

        let img = self.cairo_to_vips(base)?;
        Ok((img, width as f64))
    }
}
