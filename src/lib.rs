//! # Captionate
//!
//! A library to compose a styled caption band above or below an image and
//! export the result as a PNG byte stream.

pub mod error;
pub mod export;
pub mod image;
pub mod layer;
pub mod layout;
pub mod session;
pub mod style;

pub use error::{Error, Result};
pub use session::{DecodeOutcome, ImageToken, Session};
