//! BIM header structure.

use std::io::Write;

use bimage_common::BinaryReader;
use byteorder::{BigEndian, WriteBytesExt};

use crate::format::IdTechFormat;
use crate::{Error, Result};

/// Magic and version of every BIM file: "BIM" plus version 7, read in
/// reversed byte order.
pub const BIM_SIGNATURE: u32 = 0x074D_4942;

/// Texture dimensionality stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TextureType {
    TwoD = 0,
    ThreeD = 1,
    Cubic = 2,
}

impl TextureType {
    /// Look up a raw header code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::TwoD),
            1 => Some(Self::ThreeD),
            2 => Some(Self::Cubic),
            _ => None,
        }
    }
}

/// BIM file header.
///
/// Numeric codes are kept raw so values this crate does not understand
/// survive a decode/encode round-trip. All multi-byte fields are stored
/// big-endian; the two single-byte fields sit between them unaligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BimHeader {
    /// Creation timestamp (opaque).
    pub timestamp: u32,
    /// Magic and version, always [`BIM_SIGNATURE`] once parsed.
    pub magic_and_version: u32,
    /// Raw [`TextureType`] code.
    pub texture_type: i32,
    /// Width of the top-level surface.
    pub pixel_width: i32,
    /// Height of the top-level surface.
    pub pixel_height: i32,
    /// Depth (1 for 2D textures).
    pub depth: i32,
    /// Number of mip records that follow the header.
    pub mip_count: i32,
    /// Streaming flag byte.
    pub is_streamed: u8,
    /// Raw [`IdTechFormat`] code.
    pub texture_format: i32,
    /// Material kind (opaque).
    pub material_kind: i32,
    /// Mip count used by on-disk streaming.
    pub stream_db_mip_count: i32,
    /// Trailing byte of unknown purpose.
    pub reserved: u8,
}

impl BimHeader {
    /// Serialised header size in bytes.
    pub const SIZE: usize = 42;

    /// Read and validate a header.
    ///
    /// The signature is checked before any other field is read.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let timestamp = reader.read_u32_be()?;
        let magic_and_version = reader.read_u32_be()?;
        if magic_and_version != BIM_SIGNATURE {
            return Err(Error::FormatSignature {
                expected: BIM_SIGNATURE,
                actual: magic_and_version,
            });
        }

        let header = Self {
            timestamp,
            magic_and_version,
            texture_type: reader.read_i32_be()?,
            pixel_width: reader.read_i32_be()?,
            pixel_height: reader.read_i32_be()?,
            depth: reader.read_i32_be()?,
            mip_count: reader.read_i32_be()?,
            is_streamed: reader.read_u8()?,
            texture_format: reader.read_i32_be()?,
            material_kind: reader.read_i32_be()?,
            stream_db_mip_count: reader.read_i32_be()?,
            reserved: reader.read_u8()?,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.pixel_width < 0 || self.pixel_height < 0 {
            return Err(Error::InvalidHeader(format!(
                "negative dimensions {}x{}",
                self.pixel_width, self.pixel_height
            )));
        }
        if self.mip_count < 0 {
            return Err(Error::InvalidHeader(format!(
                "negative mip count {}",
                self.mip_count
            )));
        }
        Ok(())
    }

    /// Write the header. The signature field is always [`BIM_SIGNATURE`].
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_u32::<BigEndian>(self.timestamp)?;
        out.write_u32::<BigEndian>(BIM_SIGNATURE)?;
        out.write_i32::<BigEndian>(self.texture_type)?;
        out.write_i32::<BigEndian>(self.pixel_width)?;
        out.write_i32::<BigEndian>(self.pixel_height)?;
        out.write_i32::<BigEndian>(self.depth)?;
        out.write_i32::<BigEndian>(self.mip_count)?;
        out.write_u8(self.is_streamed)?;
        out.write_i32::<BigEndian>(self.texture_format)?;
        out.write_i32::<BigEndian>(self.material_kind)?;
        out.write_i32::<BigEndian>(self.stream_db_mip_count)?;
        out.write_u8(self.reserved)?;
        Ok(())
    }

    /// The texture format, if the code belongs to the enumeration.
    pub fn format(&self) -> Option<IdTechFormat> {
        IdTechFormat::from_code(self.texture_format)
    }

    /// The texture dimensionality, if the code is known.
    pub fn texture_type(&self) -> Option<TextureType> {
        TextureType::from_code(self.texture_type)
    }

    /// The three signature characters ("BIM").
    pub fn signature(&self) -> String {
        let bytes = self.magic_and_version.to_le_bytes();
        String::from_utf8_lossy(&bytes[..3]).into_owned()
    }

    /// Format version (the fourth signature byte).
    pub fn version(&self) -> u8 {
        self.magic_and_version.to_le_bytes()[3]
    }
}

impl Default for BimHeader {
    /// An empty 2D header with no mips and no format.
    fn default() -> Self {
        Self {
            timestamp: 0,
            magic_and_version: BIM_SIGNATURE,
            texture_type: TextureType::TwoD as i32,
            pixel_width: 0,
            pixel_height: 0,
            depth: 1,
            mip_count: 0,
            is_streamed: 0,
            texture_format: IdTechFormat::NoFormat.code(),
            material_kind: 0,
            stream_db_mip_count: 0,
            reserved: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BimHeader {
        BimHeader {
            timestamp: 0x1122_3344,
            pixel_width: 256,
            pixel_height: 128,
            mip_count: 1,
            is_streamed: 1,
            texture_format: IdTechFormat::Bc7.code(),
            material_kind: 5,
            reserved: 0xAB,
            ..BimHeader::default()
        }
    }

    #[test]
    fn test_layout_is_big_endian() {
        let mut bytes = Vec::new();
        sample().write(&mut bytes).unwrap();

        assert_eq!(bytes.len(), BimHeader::SIZE);
        assert_eq!(&bytes[0..4], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&bytes[4..8], &[0x07, 0x4D, 0x49, 0x42]);
        assert_eq!(&bytes[12..16], &[0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes[28], 1);
        assert_eq!(&bytes[29..33], &[0x00, 0x00, 0x00, 0x17]);
        assert_eq!(bytes[41], 0xAB);
    }

    #[test]
    fn test_read_back() {
        let mut bytes = Vec::new();
        sample().write(&mut bytes).unwrap();

        let mut reader = BinaryReader::new(&bytes);
        let header = BimHeader::read(&mut reader).unwrap();
        assert_eq!(header, sample());
        assert!(reader.is_empty());
        assert_eq!(header.signature(), "BIM");
        assert_eq!(header.version(), 7);
        assert_eq!(header.format(), Some(IdTechFormat::Bc7));
        assert_eq!(header.texture_type(), Some(TextureType::TwoD));
    }

    #[test]
    fn test_bad_signature_stops_early() {
        let mut bytes = Vec::new();
        sample().write(&mut bytes).unwrap();
        bytes[7] = 0x43;

        let mut reader = BinaryReader::new(&bytes);
        match BimHeader::read(&mut reader) {
            Err(Error::FormatSignature { expected, actual }) => {
                assert_eq!(expected, BIM_SIGNATURE);
                assert_eq!(actual, 0x074D_4943);
            }
            other => panic!("expected signature error, got {other:?}"),
        }
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_negative_values_rejected() {
        let header = BimHeader {
            mip_count: -1,
            ..sample()
        };
        let mut bytes = Vec::new();
        header.write(&mut bytes).unwrap();

        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            BimHeader::read(&mut reader),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let mut bytes = Vec::new();
        sample().write(&mut bytes).unwrap();

        let mut reader = BinaryReader::new(&bytes[..20]);
        assert!(matches!(
            BimHeader::read(&mut reader),
            Err(Error::TruncatedStream { needed: 4, available: 0 })
        ));
    }
}
