//! PNG serialization and file delivery.

use crate::error::{Error, Result};

use libvips::{ops, VipsImage};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Filename used when the caller does not supply one.
pub const DEFAULT_FILENAME: &str = "epstein-meme.png";

/// Serializes a rendered surface to a PNG byte stream.
pub fn png_bytes(surface: &VipsImage) -> Result<Vec<u8>> {
    ops::pngsave_buffer(surface).map_err(|e| Error::ExportFailed(e.to_string()))
}

/// Writes exported bytes to disk. The file handle lives only within this
/// call and is released on every path, success or failure.
pub fn save_png(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| Error::ExportFailed(e.to_string()))?;
    file.write_all(bytes)
        .map_err(|e| Error::ExportFailed(e.to_string()))?;
    log::info!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
