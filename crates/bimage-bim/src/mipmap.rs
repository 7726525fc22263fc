//! BIM mip records.

use std::io::Write;

use bimage_common::BinaryReader;
use byteorder::{BigEndian, WriteBytesExt};

use crate::{Error, Result};

/// One mip level: its 20-byte descriptor and the payload that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BimMipmap {
    /// Mip level index.
    pub level: u32,
    /// Opaque descriptor field, preserved verbatim.
    pub reserved: u32,
    /// Surface width in pixels.
    pub width: i32,
    /// Surface height in pixels.
    pub height: i32,
    /// Declared payload length in bytes.
    pub compressed_size: i32,
    /// Payload bytes.
    pub data: Vec<u8>,
}

impl BimMipmap {
    /// Serialised descriptor size in bytes.
    pub const DESCRIPTOR_SIZE: usize = 20;

    /// Read a descriptor and then `compressed_size` payload bytes.
    ///
    /// `index` is the record's position in the file, used in errors.
    pub fn read(reader: &mut BinaryReader<'_>, index: usize) -> Result<Self> {
        let level = reader.read_u32_be()?;
        let reserved = reader.read_u32_be()?;
        let width = reader.read_i32_be()?;
        let height = reader.read_i32_be()?;
        let compressed_size = reader.read_i32_be()?;

        let size = usize::try_from(compressed_size).map_err(|_| Error::InvalidMip {
            level: index,
            reason: format!("negative payload size {compressed_size}"),
        })?;

        let data = reader.read_bytes(size)?.to_vec();

        Ok(Self {
            level,
            reserved,
            width,
            height,
            compressed_size,
            data,
        })
    }

    /// Declared payload length, clamped at zero.
    pub fn declared_size(&self) -> usize {
        usize::try_from(self.compressed_size).unwrap_or(0)
    }

    /// Write the 20-byte descriptor.
    pub fn write_descriptor<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_u32::<BigEndian>(self.level)?;
        out.write_u32::<BigEndian>(self.reserved)?;
        out.write_i32::<BigEndian>(self.width)?;
        out.write_i32::<BigEndian>(self.height)?;
        out.write_i32::<BigEndian>(self.compressed_size)?;
        Ok(())
    }

    /// Write the payload.
    ///
    /// An empty payload with a positive declared size is written as that
    /// many zero bytes, or rejected when `strict` is set. A payload whose
    /// length differs from the declared size is written as-is.
    pub fn write_payload<W: Write>(&self, out: &mut W, strict: bool) -> Result<()> {
        let declared = self.declared_size();

        if self.data.is_empty() && declared > 0 {
            if strict {
                return Err(Error::MissingPixelData {
                    level: self.level as usize,
                });
            }
            log::debug!("mip {} has no payload, writing {declared} zero bytes", self.level);
            out.write_all(&vec![0u8; declared])?;
            return Ok(());
        }

        if self.data.len() != declared {
            log::warn!(
                "mip {} payload is {} bytes but declares {declared}",
                self.level,
                self.data.len()
            );
        }
        out.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(level: u32, width: i32, height: i32, size: i32) -> Vec<u8> {
        let mip = BimMipmap {
            level,
            reserved: 0xDEAD_BEEF,
            width,
            height,
            compressed_size: size,
            data: Vec::new(),
        };
        let mut bytes = Vec::new();
        mip.write_descriptor(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_descriptor_layout() {
        let bytes = descriptor(2, 64, 32, 1024);
        assert_eq!(bytes.len(), BimMipmap::DESCRIPTOR_SIZE);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[4..8], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(&bytes[16..20], &[0, 0, 0x04, 0]);
    }

    #[test]
    fn test_read_with_payload() {
        let mut bytes = descriptor(0, 4, 4, 16);
        bytes.extend(0..16u8);
        bytes.push(0xFF);

        let mut reader = BinaryReader::new(&bytes);
        let mip = BimMipmap::read(&mut reader, 0).unwrap();
        assert_eq!(mip.reserved, 0xDEAD_BEEF);
        assert_eq!(mip.width, 4);
        assert_eq!(mip.data, (0..16u8).collect::<Vec<_>>());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_read_truncated_payload() {
        let mut bytes = descriptor(0, 4, 4, 16);
        bytes.extend([0u8; 10]);

        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            BimMipmap::read(&mut reader, 0),
            Err(Error::TruncatedStream { needed: 16, available: 10 })
        ));
    }

    #[test]
    fn test_read_negative_size() {
        let bytes = descriptor(0, 4, 4, -5);
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            BimMipmap::read(&mut reader, 3),
            Err(Error::InvalidMip { level: 3, .. })
        ));
    }

    #[test]
    fn test_read_negative_dimensions() {
        let mut bytes = descriptor(1, -1, -8, 2);
        bytes.extend([0xAB, 0xCD]);

        let mut reader = BinaryReader::new(&bytes);
        let mip = BimMipmap::read(&mut reader, 1).unwrap();
        assert_eq!((mip.width, mip.height), (-1, -8));
        assert_eq!(mip.data, [0xAB, 0xCD]);

        let mut out = Vec::new();
        mip.write_descriptor(&mut out).unwrap();
        mip.write_payload(&mut out, true).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_zero_fill_and_strict() {
        let mip = BimMipmap {
            level: 1,
            compressed_size: 8,
            ..BimMipmap::default()
        };

        let mut out = Vec::new();
        mip.write_payload(&mut out, false).unwrap();
        assert_eq!(out, vec![0u8; 8]);

        let mut out = Vec::new();
        assert!(matches!(
            mip.write_payload(&mut out, true),
            Err(Error::MissingPixelData { level: 1 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_mismatched_payload_written_verbatim() {
        let mip = BimMipmap {
            compressed_size: 8,
            data: vec![7; 3],
            ..BimMipmap::default()
        };
        let mut out = Vec::new();
        mip.write_payload(&mut out, true).unwrap();
        assert_eq!(out, vec![7; 3]);
    }
}
