//! Error types for BIM handling.

use thiserror::Error;

/// Errors that can occur when working with BIM textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DDS container error.
    #[error("DDS error: {0}")]
    Dds(#[from] bimage_dds::Error),

    /// The magic+version field is not the BIM signature.
    #[error("invalid BIM signature or version: expected {expected:#010X}, got {actual:#010X}")]
    FormatSignature { expected: u32, actual: u32 },

    /// The stream ended before a declared field or payload.
    #[error("truncated BIM stream: needed {needed} bytes but only {available} available")]
    TruncatedStream { needed: usize, available: usize },

    /// A header value is out of range.
    #[error("invalid BIM header: {0}")]
    InvalidHeader(String),

    /// A mip descriptor is out of range.
    #[error("invalid mip {level}: {reason}")]
    InvalidMip { level: usize, reason: String },

    /// No mapping exists for a pixel format where one is required.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// A pixel buffer disagrees with its declared dimensions.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A mip that must carry pixels has none.
    #[error("mip {level} has no pixel data")]
    MissingPixelData { level: usize },
}

impl From<bimage_common::Error> for Error {
    fn from(err: bimage_common::Error) -> Self {
        match err {
            bimage_common::Error::UnexpectedEof { needed, available } => {
                Self::TruncatedStream { needed, available }
            }
            bimage_common::Error::Io(err) => Self::Io(err),
            bimage_common::Error::InvalidMagic { expected, actual } => Self::InvalidHeader(format!(
                "bad magic: expected {expected:02X?}, got {actual:02X?}"
            )),
        }
    }
}

/// Result type for BIM operations.
pub type Result<T> = std::result::Result<T, Error>;
