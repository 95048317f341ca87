//! Drives the two-phase render pipeline: provisional layout while an image
//! decodes, authoritative layout and export once it has.

use crate::error::{Error, Result};
use crate::export;
use crate::image::ImgBackend;
use crate::layer;
use crate::layout::{self, Geometry};
use crate::style::StyleConfig;

use libvips::VipsImage;
use std::path::Path;

/// Identifies one image selection. Tokens are monotonic; a decode result
/// carrying an old token belongs to a superseded upload and is discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageToken(u64);

/// Outcome of handing a finished decode back to the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The decode matched the current selection and was stored.
    Applied,
    /// The decode belonged to an older selection and was dropped.
    Stale,
}

struct LoadedImage {
    img: VipsImage,
    aspect_ratio: f64,
}

/// Holds the caption, style and image state for one preview surface.
///
/// All methods run on the caller's thread; renders against the same surface
/// must be serialized by the caller, since each render exclusively owns its
/// output while it is being repainted.
pub struct Session {
    backend: ImgBackend,
    caption: String,
    style: StyleConfig,
    container_width: f64,
    token: u64,
    image: Option<LoadedImage>,
}

impl Session {
    pub fn new(container_width: f64, caption: impl Into<String>) -> Result<Self> {
        Ok(Self {
            backend: ImgBackend::new()?,
            caption: caption.into(),
            style: StyleConfig::default(),
            container_width,
            token: 0,
            image: None,
        })
    }

    pub fn backend(&self) -> &ImgBackend {
        &self.backend
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
    }

    /// Restores every style field to its documented default in one step.
    pub fn reset_style(&mut self) {
        self.style = StyleConfig::default();
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width;
    }

    /// Registers a new image selection and returns its token. Any decode
    /// still in flight for a previous selection becomes stale.
    pub fn select_image(&mut self) -> ImageToken {
        self.token += 1;
        self.image = None;
        ImageToken(self.token)
    }

    /// Completes a decode for the selection identified by `token`.
    ///
    /// The staleness check runs before any decode work: a superseded blob is
    /// never decoded, let alone rendered. A failed decode leaves the session
    /// without an image, so the next render reports the failure rather than
    /// presenting half-drawn output.
    pub fn apply_decode(&mut self, token: ImageToken, bytes: &[u8]) -> Result<DecodeOutcome> {
        if token.0 != self.token {
            log::info!("discarding stale decode for superseded selection");
            return Ok(DecodeOutcome::Stale);
        }
        let img = self.backend.decode(bytes)?;
        let aspect_ratio = img.get_height() as f64 / img.get_width() as f64;
        self.image = Some(LoadedImage { img, aspect_ratio });
        Ok(DecodeOutcome::Applied)
    }

    /// True once a decoded image backs the geometry; renders before that are
    /// provisional and must not be exported.
    pub fn is_authoritative(&self) -> bool {
        self.image.is_some()
    }

    /// Current layout. Falls back to the 3:4 ratio while no image is
    /// decoded, so callers can size a preview without blocking on decode.
    pub fn geometry(&self) -> Geometry {
        let ratio = self.image.as_ref().map(|i| i.aspect_ratio);
        layout::compute_geometry(
            self.container_width,
            ratio,
            self.style.text_size,
            self.style.text_position,
        )
    }

    /// Repaints the full surface from the current state. Requires a decoded
    /// image; without one there is nothing valid to draw.
    pub fn render(&self) -> Result<VipsImage> {
        let loaded = self
            .image
            .as_ref()
            .ok_or_else(|| Error::ImageDecodeFailed("no decoded image selected".into()))?;
        let geometry = self.geometry();
        log::debug!(
            "rendering {}x{} surface",
            geometry.surface_width.round(),
            geometry.surface_height.round()
        );
        layer::compose(&self.backend, &loaded.img, &self.caption, &geometry, &self.style)
    }

    /// Renders and serializes to PNG bytes. Because rendering requires a
    /// decoded image, an export can never observe the fallback aspect ratio.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let surface = self.render()?;
        export::png_bytes(&surface)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.export_png()?;
        export::save_png(&bytes, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FALLBACK_ASPECT_RATIO;

    #[test]
    fn tokens_are_monotonic() {
        let mut session = Session::new(800.0, "caption").unwrap();
        let a = session.select_image();
        let b = session.select_image();
        assert_ne!(a, b);
    }

    #[test]
    fn stale_decode_is_discarded_before_decoding() {
        let mut session = Session::new(800.0, "caption").unwrap();
        let first = session.select_image();
        let _second = session.select_image();
        // Garbage bytes: a stale token must short-circuit before decode.
        let outcome = session.apply_decode(first, b"not an image").unwrap();
        assert_eq!(outcome, DecodeOutcome::Stale);
        assert!(!session.is_authoritative());
    }

    #[test]
    fn failed_decode_leaves_no_image_and_render_rejects() {
        let mut session = Session::new(800.0, "caption").unwrap();
        let token = session.select_image();
        let err = session.apply_decode(token, b"not an image").unwrap_err();
        assert!(matches!(err, Error::ImageDecodeFailed(_)));
        assert!(!session.is_authoritative());
        assert!(matches!(
            session.render(),
            Err(Error::ImageDecodeFailed(_))
        ));
    }

    #[test]
    fn geometry_uses_fallback_ratio_before_decode() {
        let session = Session::new(800.0, "caption").unwrap();
        let g = session.geometry();
        assert_eq!(g.image_rect.h, 800.0 * FALLBACK_ASPECT_RATIO);
    }
}
