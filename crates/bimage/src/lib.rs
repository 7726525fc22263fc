//! bimage - idTech BIM texture extraction and repacking.
//!
//! This crate ties the bimage crates together and adds the file-level
//! workflows used by the command-line tool.
//!
//! # Crates
//!
//! - [`bimage_common`] - Binary reading
//! - [`bimage_dds`] - DDS containers and the generic pixel format
//! - [`bimage_bim`] - BIM containers, engine formats and DDS conversion
//!
//! # Example
//!
//! ```no_run
//! use bimage::prelude::*;
//! use std::path::Path;
//!
//! // BIM to DDS
//! let image = BimImage::read_from("ui_font.bim")?;
//! extract(&image)?.write_to("ui_font.dds")?;
//!
//! // Patch an edited PNG back into the original container
//! let source = load_source(Path::new("ui_font.png"))?;
//! replace(&image, &source)?.write_to("ui_font_new.bim")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod repack;

pub use bimage_bim as bim;
pub use bimage_common as common;
pub use bimage_dds as dds;

pub use error::{Error, Result};
pub use repack::{
    default_dds_path, describe, extract, extract_file, load_source, repack_file, replace,
    ReplacementSource,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::repack::{describe, extract, load_source, replace, ReplacementSource};
    pub use bimage_bim::{BimImage, IdTechFormat, MipLayout, WriteOptions};
    pub use bimage_dds::{DdsFile, DxgiFormat};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
