use std::fs;
use std::path::Path;

use bimage::prelude::*;
use bimage::{extract_file, repack_file};
use bimage::bim::{BimHeader, BimMipmap};
use tempfile::TempDir;

/// A three-mip BC1 container with distinctive values in every field.
fn template() -> BimImage {
    let mip = |level: u32, size: i32, fill: u8| {
        let bytes = (size * size / 2).max(8);
        BimMipmap {
            level,
            reserved: 0x1000 + level,
            width: size,
            height: size,
            compressed_size: bytes,
            data: vec![fill; bytes as usize],
        }
    };

    BimImage {
        header: BimHeader {
            timestamp: 0x6543_2100,
            texture_type: 0,
            pixel_width: 8,
            pixel_height: 8,
            depth: 1,
            mip_count: 3,
            is_streamed: 1,
            texture_format: IdTechFormat::Bc1.code(),
            material_kind: 12,
            stream_db_mip_count: 2,
            reserved: 0x7F,
            ..BimHeader::default()
        },
        mipmaps: vec![mip(0, 8, 0xA0), mip(1, 4, 0xA1), mip(2, 2, 0xA2)],
        trailing: Vec::new(),
    }
}

fn write_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("template.bim");
    template()
        .write_to_with(&path, &WriteOptions::interleaved())
        .unwrap();
    path
}

#[test]
fn test_replace_with_rgba8_dds_keeps_everything_else() {
    let original = template();
    let pixels: Vec<u8> = (0..64).collect();
    let dds = DdsFile::from_rgba8(4, 4, pixels.clone()).unwrap();

    let replaced = replace(&original, &ReplacementSource::Dds(dds)).unwrap();

    assert_eq!(replaced.header.pixel_width, 4);
    assert_eq!(replaced.header.pixel_height, 4);
    assert_eq!(replaced.format(), Some(IdTechFormat::Rgba8));
    assert_eq!(replaced.mipmaps[0].width, 4);
    assert_eq!(replaced.mipmaps[0].height, 4);
    assert_eq!(replaced.mipmaps[0].compressed_size, 64);
    assert_eq!(replaced.mipmaps[0].data, pixels);

    let (before, after) = (&original.header, &replaced.header);
    assert_eq!(after.timestamp, before.timestamp);
    assert_eq!(after.magic_and_version, before.magic_and_version);
    assert_eq!(after.texture_type, before.texture_type);
    assert_eq!(after.depth, before.depth);
    assert_eq!(after.mip_count, before.mip_count);
    assert_eq!(after.is_streamed, before.is_streamed);
    assert_eq!(after.material_kind, before.material_kind);
    assert_eq!(after.stream_db_mip_count, before.stream_db_mip_count);
    assert_eq!(after.reserved, before.reserved);
    assert_eq!(replaced.mipmaps[0].reserved, original.mipmaps[0].reserved);
    assert_eq!(&replaced.mipmaps[1..], &original.mipmaps[1..]);

    // the input container is a separate value
    assert_eq!(original, template());
}

#[test]
fn test_extract_file_writes_dds_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_template(dir.path());

    let output = extract_file(&input, None).unwrap();
    assert_eq!(output, dir.path().join("template.dds"));

    let dds = DdsFile::read_from(&output).unwrap();
    assert_eq!(dds.format(), DxgiFormat::Bc1Unorm);
    assert_eq!(dds.mipmap_count(), 3);
    assert_eq!(dds.faces[0].mipmaps[0].data, vec![0xA0; 32]);
    assert_eq!(dds.faces[0].mipmaps[2].data, vec![0xA2; 8]);
}

#[test]
fn test_extract_file_unsupported_format_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.bim");
    let mut image = template();
    image.header.texture_format = 0x42;
    image.write_to(&input).unwrap();

    let output = dir.path().join("broken.dds");
    assert!(extract_file(&input, Some(&output)).is_err());
    assert!(!output.exists());
}

#[test]
fn test_repack_png_into_template() {
    let dir = TempDir::new().unwrap();
    let template_path = write_template(dir.path());

    let png = dir.path().join("edited.png");
    let raster = image::RgbaImage::from_fn(2, 2, |x, y| image::Rgba([x as u8, y as u8, 0x10, 0xFF]));
    raster.save(&png).unwrap();

    let output = dir.path().join("out").join("nested").join("packed.bim");
    let options = WriteOptions::interleaved();
    let packed = repack_file(&png, Some(&template_path), &output, &options).unwrap();

    let reread = BimImage::read_from(&output).unwrap();
    assert_eq!(reread, packed);
    assert_eq!(reread.format(), Some(IdTechFormat::Rgba8));
    assert_eq!(reread.mipmaps[0].data, raster.into_raw());
    assert_eq!(reread.header.material_kind, 12);
    assert_eq!(reread.mipmaps.len(), 3);
}

#[test]
fn test_repack_dds_without_template() {
    let dir = TempDir::new().unwrap();
    let texture = dir.path().join("FRESH.DDS");
    DdsFile::from_rgba8(1, 1, vec![9, 8, 7, 6])
        .unwrap()
        .write_to(&texture)
        .unwrap();

    let output = dir.path().join("fresh.bim");
    repack_file(&texture, None, &output, &WriteOptions::default()).unwrap();

    let image = BimImage::read_from(&output).unwrap();
    assert_eq!(image.header.mip_count, 1);
    assert_eq!((image.header.pixel_width, image.header.pixel_height), (1, 1));
    assert_eq!(image.mipmaps[0].data, [9, 8, 7, 6]);
    assert!(describe(&image).contains("RGBA 8-bit Unsigned Integer"));
}

#[test]
fn test_repack_missing_texture_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.bim");

    let result = repack_file(
        &dir.path().join("missing.png"),
        None,
        &output,
        &WriteOptions::default(),
    );
    assert!(result.is_err());
    assert!(!output.exists());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
