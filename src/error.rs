//! Common error types.

/// A shortcut type equivalent to `Result<T, captionate::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
///
/// No variant is retried automatically; every failure propagates to the
/// caller, which decides how to recover (typically by asking the user to
/// select another file).
#[derive(Debug)]
pub enum Error {
    ImageDecodeFailed(String),
    CanvasUnavailable(String),
    ExportFailed(String),
    VipsError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ImageDecodeFailed(e) => write!(f, "failed to decode image: {e}"),
            Error::CanvasUnavailable(e) => write!(f, "drawing surface unavailable: {e}"),
            Error::ExportFailed(e) => write!(f, "PNG export failed: {e}"),
            Error::VipsError(e) => write!(f, "vips error: {e}"),
        }
    }
}
