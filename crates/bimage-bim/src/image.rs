//! BIM container reading and writing.

use std::fs;
use std::path::Path;

use bimage_common::BinaryReader;

use crate::convert::ReplacementImage;
use crate::format::IdTechFormat;
use crate::header::{BimHeader, TextureType};
use crate::mipmap::BimMipmap;
use crate::options::{MipLayout, WriteOptions};
use crate::{Error, Result};

/// A parsed BIM texture: header plus mip records in ascending level order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BimImage {
    /// File header.
    pub header: BimHeader,
    /// Mip records, one per `header.mip_count`.
    pub mipmaps: Vec<BimMipmap>,
    /// Bytes after the last mip record, written back unchanged.
    pub trailing: Vec<u8>,
}

impl BimImage {
    /// Read a BIM file from disk.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a BIM file from bytes.
    ///
    /// Mip records are read as descriptor/payload pairs in a single forward
    /// pass. A payload running past the end of `data` fails with
    /// [`Error::TruncatedStream`](crate::Error::TruncatedStream).
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let header = BimHeader::read(&mut reader)?;

        let count = header.mip_count as usize;
        let mut mipmaps = Vec::with_capacity(count.min(32));
        for index in 0..count {
            mipmaps.push(BimMipmap::read(&mut reader, index)?);
        }

        log::debug!(
            "parsed BIM {}x{} format {:#04X} with {} mip(s)",
            header.pixel_width,
            header.pixel_height,
            header.texture_format,
            mipmaps.len()
        );
        let trailing = reader.remaining_bytes().to_vec();
        if !trailing.is_empty() {
            log::debug!("keeping {} trailing byte(s)", trailing.len());
        }

        Ok(Self {
            header,
            mipmaps,
            trailing,
        })
    }

    /// Serialise with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&WriteOptions::default())
    }

    /// Serialise the container.
    pub fn to_bytes_with(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let payload: usize = self.mipmaps.iter().map(|mip| mip.data.len().max(mip.declared_size())).sum();
        let mut out = Vec::with_capacity(
            BimHeader::SIZE + self.mipmaps.len() * BimMipmap::DESCRIPTOR_SIZE + payload + self.trailing.len(),
        );

        self.header.write(&mut out)?;
        match options.mip_layout {
            MipLayout::Grouped => {
                for mip in &self.mipmaps {
                    mip.write_descriptor(&mut out)?;
                }
                for mip in &self.mipmaps {
                    mip.write_payload(&mut out, options.strict_payloads)?;
                }
            }
            MipLayout::Interleaved => {
                for mip in &self.mipmaps {
                    mip.write_descriptor(&mut out)?;
                    mip.write_payload(&mut out, options.strict_payloads)?;
                }
            }
        }
        out.extend_from_slice(&self.trailing);

        log::debug!(
            "encoded BIM with {} mip(s), {} bytes ({:?})",
            self.mipmaps.len(),
            out.len(),
            options.mip_layout
        );
        Ok(out)
    }

    /// Write to disk with default options.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to_with(path, &WriteOptions::default())
    }

    /// Write to disk. The file is only created once encoding succeeded.
    pub fn write_to_with<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<()> {
        let bytes = self.to_bytes_with(options)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// An empty 2D container with a single, empty level-0 mip.
    ///
    /// Used as the template when packing a texture that has no existing
    /// BIM file.
    pub fn blank() -> Self {
        Self {
            header: BimHeader {
                mip_count: 1,
                ..BimHeader::default()
            },
            mipmaps: vec![BimMipmap::default()],
            trailing: Vec::new(),
        }
    }

    /// A copy of this container with mip 0 replaced.
    ///
    /// Header dimensions and format follow the replacement, as do mip 0's
    /// dimensions, payload and declared size. Everything else, including
    /// every mip past the first, is carried over unchanged. A container
    /// without mips gains a level-0 record.
    ///
    /// Fails when a dimension or the payload length does not fit the
    /// header's 32-bit signed fields.
    pub fn with_replaced_primary(&self, replacement: &ReplacementImage) -> Result<Self> {
        let field = |name: &str, value: usize| {
            i32::try_from(value).map_err(|_| {
                Error::InvalidHeader(format!("replacement {name} {value} exceeds {}", i32::MAX))
            })
        };
        let width = field("width", replacement.width as usize)?;
        let height = field("height", replacement.height as usize)?;
        let size = field("payload size", replacement.pixels.len())?;

        let mut image = self.clone();

        image.header.pixel_width = width;
        image.header.pixel_height = height;
        image.header.texture_format = replacement.format.code();

        if image.mipmaps.is_empty() {
            image.mipmaps.push(BimMipmap::default());
            image.header.mip_count = 1;
        }
        let primary = &mut image.mipmaps[0];
        primary.width = width;
        primary.height = height;
        primary.compressed_size = size;
        primary.data = replacement.pixels.clone();

        Ok(image)
    }

    /// The texture format, if the header code is known.
    pub fn format(&self) -> Option<IdTechFormat> {
        self.header.format()
    }

    /// The texture dimensionality, if the header code is known.
    pub fn texture_type(&self) -> Option<TextureType> {
        self.header.texture_type()
    }

    /// The level-0 mip record.
    pub fn primary(&self) -> Option<&BimMipmap> {
        self.mipmaps.first()
    }
}
