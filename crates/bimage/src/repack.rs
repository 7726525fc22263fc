//! Extract and replace workflows.
//!
//! These compose the container codec and the DDS bridge into the two
//! operations the tooling needs: turning a BIM texture into a DDS file, and
//! patching a new top-level image into an existing (or blank) BIM texture.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use bimage_bim::{from_dds, to_dds, BimImage, WriteOptions};
use bimage_dds::DdsFile;

use crate::{Error, Result};

/// Convert a BIM texture into a DDS file.
pub fn extract(image: &BimImage) -> Result<DdsFile> {
    Ok(to_dds(image)?)
}

/// `input` with its extension replaced by `.dds`.
pub fn default_dds_path(input: &Path) -> PathBuf {
    input.with_extension("dds")
}

/// Read a BIM file and write it out as DDS.
///
/// Without an `output`, the DDS file is written next to the input. Returns
/// the path written.
pub fn extract_file(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let image = BimImage::read_from(input)?;
    let dds = extract(&image)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_dds_path(input),
    };
    if output == input {
        return Err(Error::OutputPath(input.to_path_buf()));
    }

    dds.write_to(&output)?;
    log::info!("extracted {} to {}", input.display(), output.display());
    Ok(output)
}

/// An image to put into a BIM container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementSource {
    /// A DDS file, used as-is.
    Dds(DdsFile),
    /// Decoded RGBA8 pixels.
    Image { width: u32, height: u32, rgba: Vec<u8> },
}

impl ReplacementSource {
    /// The DDS view of this source. Raster images become a single-mip
    /// RGBA8 container.
    pub fn into_dds(self) -> Result<DdsFile> {
        match self {
            Self::Dds(dds) => Ok(dds),
            Self::Image { width, height, rgba } => Ok(DdsFile::from_rgba8(width, height, rgba)?),
        }
    }
}

/// Load a replacement image from disk.
///
/// `.dds` files (any case) are read as DDS; anything else is decoded as a
/// raster image.
pub fn load_source(path: &Path) -> Result<ReplacementSource> {
    let is_dds = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dds"));

    if is_dds {
        return Ok(ReplacementSource::Dds(DdsFile::read_from(path)?));
    }

    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    log::debug!("decoded {} as {width}x{height} RGBA8", path.display());
    Ok(ReplacementSource::Image {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}

/// A copy of `image` with mip 0 replaced by the top surface of `source`.
///
/// Every other header field and every mip past the first are kept.
pub fn replace(image: &BimImage, source: &ReplacementSource) -> Result<BimImage> {
    let replacement = match source {
        ReplacementSource::Dds(dds) => from_dds(dds)?,
        ReplacementSource::Image { .. } => from_dds(&source.clone().into_dds()?)?,
    };
    Ok(image.with_replaced_primary(&replacement)?)
}

/// Pack `texture` into a BIM file at `output`.
///
/// `template` supplies the header fields and the remaining mips; without
/// one a blank container is used. Missing parent directories of `output`
/// are created.
pub fn repack_file(
    texture: &Path,
    template: Option<&Path>,
    output: &Path,
    options: &WriteOptions,
) -> Result<BimImage> {
    let base = match template {
        Some(path) => BimImage::read_from(path)?,
        None => BimImage::blank(),
    };
    let source = load_source(texture)?;
    let packed = replace(&base, &source)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    packed.write_to_with(output, options)?;

    log::info!("packed {} into {}", texture.display(), output.display());
    Ok(packed)
}

/// Multi-line summary of a container's header and primary mip.
pub fn describe(image: &BimImage) -> String {
    let header = &image.header;
    let mut out = String::new();

    let texture_type = match image.texture_type() {
        Some(kind) => format!("{kind:?}"),
        None => format!("unknown ({})", header.texture_type),
    };
    let format = match image.format() {
        Some(format) => format.description(),
        None => "unknown",
    };

    // Writing to a String cannot fail.
    let _ = writeln!(out, "BIM image information:");
    let _ = writeln!(out, "Signature: {}", header.signature());
    let _ = writeln!(out, "Version: {}", header.version());
    let _ = writeln!(out, "Size: {}x{}", header.pixel_width, header.pixel_height);
    let _ = writeln!(out, "Depth: {}", header.depth);
    let _ = writeln!(out, "Mip count: {}", header.mip_count);
    let _ = writeln!(out, "Streamed: {}", header.is_streamed != 0);
    let _ = writeln!(out, "Reserved byte: {}", header.reserved);
    let _ = writeln!(out, "Texture type: {texture_type}");
    let _ = writeln!(out, "Texture format: {:#04X}, {format}", header.texture_format);
    let _ = writeln!(out, "Material kind: {}", header.material_kind);

    if let Some(mip) = image.primary() {
        let _ = writeln!(out, "-------------------");
        let _ = writeln!(out, "Primary mip:");
        let _ = writeln!(out, "Size: {}x{}", mip.width, mip.height);
        let _ = writeln!(out, "Declared size: {} bytes", mip.compressed_size);
        let _ = writeln!(out, "Payload length: {} bytes", mip.data.len());
        let _ = writeln!(out, "Reserved: {}", mip.reserved);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bimage_bim::{BimHeader, BimMipmap, IdTechFormat};

    fn bc1_image() -> BimImage {
        BimImage {
            header: BimHeader {
                pixel_width: 4,
                pixel_height: 4,
                mip_count: 1,
                texture_format: IdTechFormat::Bc1.code(),
                material_kind: 9,
                ..BimHeader::default()
            },
            mipmaps: vec![BimMipmap {
                width: 4,
                height: 4,
                compressed_size: 8,
                data: vec![0x55; 8],
                reserved: 77,
                ..BimMipmap::default()
            }],
            trailing: Vec::new(),
        }
    }

    #[test]
    fn test_describe() {
        let report = describe(&bc1_image());
        assert!(report.contains("Signature: BIM"));
        assert!(report.contains("Version: 7"));
        assert!(report.contains("Size: 4x4"));
        assert!(report.contains("Texture type: TwoD"));
        assert!(report.contains("Texture format: 0x0A, Compressed BC1 (DXT1)"));
        assert!(report.contains("Material kind: 9"));
        assert!(report.contains("Payload length: 8 bytes"));
        assert!(report.contains("Reserved: 77"));
    }

    #[test]
    fn test_describe_without_mips() {
        let mut image = bc1_image();
        image.mipmaps.clear();
        assert!(!describe(&image).contains("Primary mip"));
    }

    #[test]
    fn test_replace_from_raster() {
        let source = ReplacementSource::Image {
            width: 1,
            height: 2,
            rgba: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        let replaced = replace(&bc1_image(), &source).unwrap();

        assert_eq!(replaced.format(), Some(IdTechFormat::Rgba8));
        assert_eq!((replaced.header.pixel_width, replaced.header.pixel_height), (1, 2));
        assert_eq!(replaced.mipmaps[0].data, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(replaced.header.material_kind, 9);
    }

    #[test]
    fn test_replace_from_bad_raster() {
        let source = ReplacementSource::Image {
            width: 2,
            height: 2,
            rgba: vec![0; 4],
        };
        assert!(matches!(
            replace(&bc1_image(), &source),
            Err(Error::Dds(bimage_dds::Error::MipmapSizeMismatch { .. }))
        ));
    }

    #[test]
    fn test_extract() {
        let dds = extract(&bc1_image()).unwrap();
        assert_eq!(dds.format(), bimage_dds::DxgiFormat::Bc1Unorm);
        assert_eq!(dds.primary_surface().map(|s| s.data.len()), Some(8));
    }

    #[test]
    fn test_default_dds_path() {
        assert_eq!(
            default_dds_path(Path::new("fonts/ui.bim")),
            PathBuf::from("fonts/ui.dds")
        );
    }
}
