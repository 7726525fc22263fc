//! DDS (DirectDraw Surface) container handling.
//!
//! This crate models the subset of DDS needed to move idTech textures in
//! and out of the standard tooling ecosystem: a single 2D face carrying a
//! mip chain, described either by a legacy pixel format or by a `DX10`
//! extended header.
//!
//! - [`DxgiFormat`] - The generic pixel format space
//! - [`DdsFile`] - A parsed or freshly built container
//!
//! # Example
//!
//! ```
//! use bimage_dds::{DdsFile, DxgiFormat};
//!
//! let dds = DdsFile::from_rgba8(2, 2, vec![0xFF; 16])?;
//! let bytes = dds.to_bytes();
//!
//! let parsed = DdsFile::parse(&bytes)?;
//! assert_eq!(parsed.format(), DxgiFormat::R8G8B8A8Unorm);
//! assert_eq!(parsed.mipmap_count(), 1);
//! # Ok::<(), bimage_dds::Error>(())
//! ```

mod error;
mod file;
mod format;
mod header;

pub use error::{Error, Result};
pub use file::{DdsFace, DdsFile, DdsMipmap};
pub use format::DxgiFormat;
pub use header::{caps, header_flags, pixel_format_flags, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
