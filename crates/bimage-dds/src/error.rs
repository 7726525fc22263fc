//! Error types for DDS handling.

use thiserror::Error;

use crate::DxgiFormat;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] bimage_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// The pixel format cannot be stored or resolved.
    #[error("unsupported DDS pixel format: {0}")]
    UnsupportedFormat(DxgiFormat),

    /// A DDS feature outside 2D textures with mip chains.
    #[error("unsupported DDS layout: {0}")]
    Unsupported(&'static str),

    /// Surface data does not match the size its dimensions require.
    #[error("mipmap {level} size mismatch: expected {expected} bytes, got {actual}")]
    MipmapSizeMismatch {
        level: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
