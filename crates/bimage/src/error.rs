//! Error types for the extract and repack workflows.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting or repacking textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// BIM container or conversion error.
    #[error(transparent)]
    Bim(#[from] bimage_bim::Error),

    /// DDS container error.
    #[error("DDS error: {0}")]
    Dds(#[from] bimage_dds::Error),

    /// Raster image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The output path cannot be derived from the input path.
    #[error("cannot derive an output path from {0}")]
    OutputPath(PathBuf),
}

/// Result type for extract and repack operations.
pub type Result<T> = std::result::Result<T, Error>;
