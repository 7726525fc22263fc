//! idTech BIM texture container handling.
//!
//! BIM files hold a fixed header followed by one record per mip level. All
//! multi-byte fields are stored big-endian; pixel payloads are copied
//! verbatim.
//!
//! - [`BimImage`] - Parse, build and write containers
//! - [`IdTechFormat`] - The engine's texture format enumeration, with
//!   [`forward`] and [`reverse`] mapping to [`DxgiFormat`](bimage_dds::DxgiFormat)
//! - [`to_dds`] / [`from_dds`] - Conversion to and from DDS files
//!
//! # Example
//!
//! ```no_run
//! use bimage_bim::BimImage;
//!
//! let image = BimImage::read_from("font.bim")?;
//! println!("{}x{}", image.header.pixel_width, image.header.pixel_height);
//!
//! let dds = bimage_bim::to_dds(&image)?;
//! dds.write_to("font.dds")?;
//! # Ok::<(), bimage_bim::Error>(())
//! ```

mod convert;
mod error;
mod format;
mod header;
mod image;
mod mipmap;
mod options;
mod reformat;

pub use convert::{from_dds, to_dds, ReplacementImage};
pub use error::{Error, Result};
pub use format::{forward, reverse, IdTechFormat};
pub use header::{BimHeader, TextureType, BIM_SIGNATURE};
pub use image::BimImage;
pub use mipmap::BimMipmap;
pub use options::{MipLayout, WriteOptions};
pub use reformat::{expand_alpha8, expand_luminance_alpha8};
