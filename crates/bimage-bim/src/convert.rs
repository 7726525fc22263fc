//! Conversion between BIM containers and DDS files.

use bimage_dds::{DdsFace, DdsFile, DdsMipmap, DxgiFormat};

use crate::format::{forward, reverse, IdTechFormat};
use crate::image::BimImage;
use crate::mipmap::BimMipmap;
use crate::reformat::{expand_alpha8, expand_luminance_alpha8};
use crate::{Error, Result};

/// Top-level surface of a DDS file, translated into engine terms.
///
/// This is what gets written into mip 0 of a BIM container on replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementImage {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Engine format of `pixels`.
    pub format: IdTechFormat,
    /// Surface bytes.
    pub pixels: Vec<u8>,
    /// Number of surfaces the source carried.
    pub mip_count: usize,
}

fn dimension(value: i32) -> u32 {
    value.max(0) as u32
}

fn widen(mip: &BimMipmap, index: usize, format: IdTechFormat) -> Result<Vec<u8>> {
    if mip.data.is_empty() {
        return Err(Error::MissingPixelData { level: index });
    }
    let (width, height) = (dimension(mip.width), dimension(mip.height));
    match format {
        IdTechFormat::Alpha8 => expand_alpha8(&mip.data, width, height),
        _ => expand_luminance_alpha8(&mip.data, width, height),
    }
}

/// Build a DDS file from a BIM container.
///
/// `Alpha8` and `L8A8` textures are widened to RGBA8, every other format
/// is carried over byte for byte. The container itself is never modified.
pub fn to_dds(image: &BimImage) -> Result<DdsFile> {
    let header = &image.header;
    let mut format = forward(header.texture_format);
    if format == DxgiFormat::Unknown {
        return Err(Error::UnsupportedPixelFormat(format!(
            "no generic format for engine format {:#04X}",
            header.texture_format
        )));
    }

    let widened = match header.format() {
        Some(id @ (IdTechFormat::Alpha8 | IdTechFormat::L8A8)) => {
            log::info!("widening {id} to RGBA8, size might grow");
            format = DxgiFormat::R8G8B8A8Unorm;
            let surfaces = image
                .mipmaps
                .iter()
                .enumerate()
                .map(|(index, mip)| widen(mip, index, id))
                .collect::<Result<Vec<_>>>()?;
            Some(surfaces)
        }
        _ => None,
    };

    let primary = image.primary().ok_or(Error::MissingPixelData { level: 0 })?;
    if primary.data.is_empty() {
        return Err(Error::MissingPixelData { level: 0 });
    }

    let (width, height) = (dimension(header.pixel_width), dimension(header.pixel_height));
    let mut dds = if format.is_compressed() {
        DdsFile::new_compressed(width, height, format)?
    } else {
        DdsFile::new_uncompressed(width, height, format)?
    };
    dds.set_mipmap_count(image.mipmaps.len() as u32);

    let surfaces: Vec<Vec<u8>> = match widened {
        Some(surfaces) => surfaces,
        None => image.mipmaps.iter().map(|mip| mip.data.clone()).collect(),
    };

    let mut face = DdsFace::new(dimension(primary.width), dimension(primary.height), surfaces[0].len());
    for (mip, data) in image.mipmaps.iter().zip(surfaces) {
        face.mipmaps.push(DdsMipmap::new(data, dimension(mip.width), dimension(mip.height)));
    }
    dds.faces.push(face);

    log::debug!(
        "built DDS {width}x{height} {format} with {} mip(s)",
        dds.mipmap_count()
    );
    Ok(dds)
}

/// Take the top-level surface of a DDS file as a replacement image.
///
/// Fails when the DDS format has no engine counterpart; writing a wrong
/// code into a container would break the asset.
pub fn from_dds(dds: &DdsFile) -> Result<ReplacementImage> {
    let surface = dds.primary_surface().ok_or(Error::MissingPixelData { level: 0 })?;

    let format = dds.format();
    let id = reverse(format, format.is_srgb()).ok_or_else(|| {
        Error::UnsupportedPixelFormat(format!("no engine format for {format}"))
    })?;

    let mip_count = dds.mipmap_count();
    if mip_count > 1 {
        log::warn!("source has {mip_count} mips, only the first is used");
    }

    Ok(ReplacementImage {
        width: surface.width,
        height: surface.height,
        format: id,
        pixels: surface.data.clone(),
        mip_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::BimHeader;
    use bimage_dds::{caps, header_flags};

    fn image(format: IdTechFormat, mips: &[(i32, i32, Vec<u8>)]) -> BimImage {
        let (width, height) = mips.first().map_or((0, 0), |(w, h, _)| (*w, *h));
        BimImage {
            header: BimHeader {
                pixel_width: width,
                pixel_height: height,
                mip_count: mips.len() as i32,
                texture_format: format.code(),
                ..BimHeader::default()
            },
            mipmaps: mips
                .iter()
                .enumerate()
                .map(|(level, (w, h, data))| BimMipmap {
                    level: level as u32,
                    width: *w,
                    height: *h,
                    compressed_size: data.len() as i32,
                    data: data.clone(),
                    ..BimMipmap::default()
                })
                .collect(),
            trailing: Vec::new(),
        }
    }

    #[test]
    fn test_bc1_single_mip() {
        let bim = image(IdTechFormat::Bc1, &[(8, 8, vec![0xAA; 32])]);
        let dds = to_dds(&bim).unwrap();

        assert_eq!(dds.format(), DxgiFormat::Bc1Unorm);
        assert!(!dds.uses_dx10());
        let flags = dds.header.flags;
        assert_eq!(flags & header_flags::MIPMAP_COUNT, 0);
        assert_eq!(dds.faces.len(), 1);
        assert_eq!(dds.faces[0].size, 32);

        let parsed = DdsFile::parse(&dds.to_bytes()).unwrap();
        assert_eq!(parsed, dds);
    }

    #[test]
    fn test_bc7_chain() {
        let bim = image(
            IdTechFormat::Bc7Srgb,
            &[(8, 8, vec![1; 64]), (4, 4, vec![2; 16]), (2, 2, vec![3; 16])],
        );
        let dds = to_dds(&bim).unwrap();

        assert_eq!(dds.format(), DxgiFormat::Bc7UnormSrgb);
        assert!(dds.uses_dx10());
        let (flags, header_caps, count) = (dds.header.flags, dds.header.caps, dds.header.mipmap_count);
        assert_ne!(flags & header_flags::MIPMAP_COUNT, 0);
        assert_eq!(header_caps & (caps::COMPLEX | caps::MIPMAP), caps::COMPLEX | caps::MIPMAP);
        assert_eq!(count, 3);

        let face = &dds.faces[0];
        assert_eq!((face.width, face.height, face.size), (8, 8, 64));
        assert_eq!(face.mipmaps[2].width, 2);
        assert_eq!(face.mipmaps[2].data, vec![3; 16]);

        let parsed = DdsFile::parse(&dds.to_bytes()).unwrap();
        assert_eq!(parsed.mipmap_count(), 3);
    }

    #[test]
    fn test_alpha8_is_widened() {
        let bim = image(IdTechFormat::Alpha8, &[(2, 2, vec![0x80; 4]), (1, 1, vec![0x40])]);
        let dds = to_dds(&bim).unwrap();

        assert_eq!(dds.format(), DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(dds.faces[0].size, 16);
        assert_eq!(dds.faces[0].mipmaps[0].data, [255, 255, 255, 0x80].repeat(4));
        assert_eq!(dds.faces[0].mipmaps[1].data, [255, 255, 255, 0x40]);
        assert_eq!(bim.mipmaps[0].data, vec![0x80; 4]);
    }

    #[test]
    fn test_l8a8_widened_but_rg8_is_not() {
        let la = to_dds(&image(IdTechFormat::L8A8, &[(1, 1, vec![10, 20])])).unwrap();
        assert_eq!(la.format(), DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(la.faces[0].mipmaps[0].data, [10, 10, 10, 20]);

        let rg = to_dds(&image(IdTechFormat::Rg8, &[(1, 1, vec![10, 20])])).unwrap();
        assert_eq!(rg.format(), DxgiFormat::R8G8Unorm);
        assert_eq!(rg.faces[0].mipmaps[0].data, [10, 20]);
    }

    #[test]
    fn test_widen_size_mismatch() {
        let bim = image(IdTechFormat::Alpha8, &[(2, 2, vec![0x80; 3])]);
        assert!(matches!(to_dds(&bim), Err(Error::SizeMismatch { expected: 4, actual: 3 })));
    }

    #[test]
    fn test_unknown_format() {
        let mut bim = image(IdTechFormat::Rgba8, &[(1, 1, vec![0; 4])]);
        bim.header.texture_format = 0x30;
        let before = bim.clone();

        assert!(matches!(to_dds(&bim), Err(Error::UnsupportedPixelFormat(_))));
        assert_eq!(bim, before);

        bim.header.texture_format = IdTechFormat::NoFormat.code();
        assert!(matches!(to_dds(&bim), Err(Error::UnsupportedPixelFormat(_))));
    }

    #[test]
    fn test_missing_primary_payload() {
        let bim = image(IdTechFormat::Rgba8, &[(1, 1, Vec::new())]);
        assert!(matches!(to_dds(&bim), Err(Error::MissingPixelData { level: 0 })));

        let mut empty = bim.clone();
        empty.mipmaps.clear();
        assert!(matches!(to_dds(&empty), Err(Error::MissingPixelData { level: 0 })));
    }

    #[test]
    fn test_from_dds_rgba8() {
        let dds = DdsFile::from_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let replacement = from_dds(&dds).unwrap();

        assert_eq!(replacement.width, 2);
        assert_eq!(replacement.height, 1);
        assert_eq!(replacement.format, IdTechFormat::Rgba8);
        assert_eq!(replacement.pixels, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(replacement.mip_count, 1);
    }

    #[test]
    fn test_from_dds_keeps_srgb() {
        let bim = image(IdTechFormat::Bc7Srgb, &[(4, 4, vec![9; 16])]);
        let replacement = from_dds(&to_dds(&bim).unwrap()).unwrap();
        assert_eq!(replacement.format, IdTechFormat::Bc7Srgb);
    }

    #[test]
    fn test_from_dds_multi_mip() {
        let bim = image(IdTechFormat::Bc1, &[(8, 8, vec![1; 32]), (4, 4, vec![2; 8])]);
        let replacement = from_dds(&to_dds(&bim).unwrap()).unwrap();
        assert_eq!(replacement.mip_count, 2);
        assert_eq!(replacement.pixels, vec![1; 32]);
        assert_eq!((replacement.width, replacement.height), (8, 8));
    }

    #[test]
    fn test_from_dds_without_counterpart() {
        let mut dds = DdsFile::new_compressed(4, 4, DxgiFormat::Bc2Unorm).unwrap();
        let mut face = DdsFace::new(4, 4, 16);
        face.mipmaps.push(DdsMipmap::new(vec![0; 16], 4, 4));
        dds.faces.push(face);

        assert!(matches!(from_dds(&dds), Err(Error::UnsupportedPixelFormat(_))));
    }

    #[test]
    fn test_from_empty_dds() {
        let dds = DdsFile::new_uncompressed(1, 1, DxgiFormat::R8G8B8A8Unorm).unwrap();
        assert!(matches!(from_dds(&dds), Err(Error::MissingPixelData { level: 0 })));
    }
}
