//! DDS container reading, writing and construction.

use std::fs;
use std::path::Path;

use bimage_common::BinaryReader;
use zerocopy::IntoBytes;

use crate::header::{caps, header_flags, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};
use crate::{DxgiFormat, Error, Result, DDS_MAGIC};

/// A single surface of a mip chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsMipmap {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Raw (possibly block-compressed) surface bytes.
    pub data: Vec<u8>,
}

impl DdsMipmap {
    /// Create a surface.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self { width, height, data }
    }
}

/// One face of a texture and its mip chain, largest surface first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsFace {
    /// Width of the top-level surface.
    pub width: u32,
    /// Height of the top-level surface.
    pub height: u32,
    /// Byte length of the top-level surface.
    pub size: usize,
    /// Surfaces in ascending mip order.
    pub mipmaps: Vec<DdsMipmap>,
}

impl DdsFace {
    /// Create an empty face sized from its top-level surface.
    pub fn new(width: u32, height: u32, size: usize) -> Self {
        Self {
            width,
            height,
            size,
            mipmaps: Vec::new(),
        }
    }
}

/// A DDS container: header, optional `DX10` header and its faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsFile {
    /// Main header.
    pub header: DdsHeader,
    /// Extended header, present when the pixel format has no legacy code.
    pub dx10_header: Option<DdsHeaderDxt10>,
    /// Texture faces. Only single-face 2D textures are produced.
    pub faces: Vec<DdsFace>,
}

/// Surface size of `format`, failing on sizes that do not fit in memory.
fn surface_bytes(format: DxgiFormat, width: u32, height: u32) -> Result<usize> {
    format.surface_size(width, height).ok_or_else(|| {
        Error::InvalidHeader(format!("{width}x{height} surface of {format} is too large"))
    })
}

/// A size for the 32-bit pitch/linear-size header field.
fn size_field(size: usize) -> Result<u32> {
    u32::try_from(size)
        .map_err(|_| Error::InvalidHeader(format!("size {size} does not fit the header")))
}

/// Number of levels in a full mip chain down to 1x1.
fn full_chain_length(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

impl DdsFile {
    /// Build an empty container for a block-compressed format.
    ///
    /// The extended header is emitted only when `format` has no legacy
    /// four-character code.
    pub fn new_compressed(width: u32, height: u32, format: DxgiFormat) -> Result<Self> {
        if !format.is_compressed() {
            return Err(Error::UnsupportedFormat(format));
        }

        let (pixel_format, dx10_header) = Self::describe(format, FourCC::for_format(format).is_none());
        let mut header = DdsHeader::new(width, height, pixel_format);
        header.flags |= header_flags::LINEAR_SIZE;
        header.pitch_or_linear_size = size_field(surface_bytes(format, width, height)?)?;

        Ok(Self {
            header,
            dx10_header,
            faces: Vec::new(),
        })
    }

    /// Build an empty container for an uncompressed format.
    pub fn new_uncompressed(width: u32, height: u32, format: DxgiFormat) -> Result<Self> {
        if format.is_compressed() || format == DxgiFormat::Unknown {
            return Err(Error::UnsupportedFormat(format));
        }

        let legacy = DdsPixelFormat::legacy(format);
        let (pixel_format, dx10_header) = Self::describe(format, legacy.is_none());
        let mut header = DdsHeader::new(width, height, pixel_format);
        header.flags |= header_flags::PITCH;
        let pitch = format.row_pitch(width).ok_or_else(|| {
            Error::InvalidHeader(format!("row pitch of {width} pixels of {format} overflows"))
        })?;
        header.pitch_or_linear_size = size_field(pitch)?;

        Ok(Self {
            header,
            dx10_header,
            faces: Vec::new(),
        })
    }

    /// Single-surface, uncompressed RGBA8 container around decoded pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let format = DxgiFormat::R8G8B8A8Unorm;
        let expected = surface_bytes(format, width, height)?;
        if pixels.len() != expected {
            return Err(Error::MipmapSizeMismatch {
                level: 0,
                expected,
                actual: pixels.len(),
            });
        }

        let mut dds = Self::new_uncompressed(width, height, format)?;
        let mut face = DdsFace::new(width, height, pixels.len());
        face.mipmaps.push(DdsMipmap::new(pixels, width, height));
        dds.faces.push(face);
        Ok(dds)
    }

    fn describe(format: DxgiFormat, needs_dx10: bool) -> (DdsPixelFormat, Option<DdsHeaderDxt10>) {
        match DdsPixelFormat::legacy(format) {
            Some(pixel_format) if !needs_dx10 => (pixel_format, None),
            _ => (
                DdsPixelFormat::from_four_cc(FourCC::DX10),
                Some(DdsHeaderDxt10::texture_2d(format)),
            ),
        }
    }

    /// Record a mip chain of `count` levels in the header.
    ///
    /// A single level leaves the header untouched.
    pub fn set_mipmap_count(&mut self, count: u32) {
        if count > 1 {
            self.header.flags |= header_flags::MIPMAP_COUNT;
            self.header.caps |= caps::COMPLEX | caps::MIPMAP;
            self.header.mipmap_count = count;
        }
    }

    /// The generic pixel format, from the extended header if present.
    pub fn format(&self) -> DxgiFormat {
        match &self.dx10_header {
            Some(dx10) if self.header.is_dx10() => dx10.format(),
            _ => self.header.pixel_format.resolve(),
        }
    }

    /// Whether the format was described by the `DX10` extended header.
    pub fn uses_dx10(&self) -> bool {
        self.dx10_header.is_some() && self.header.is_dx10()
    }

    /// Top-level surface of the first face.
    pub fn primary_surface(&self) -> Option<&DdsMipmap> {
        self.faces.first().and_then(|face| face.mipmaps.first())
    }

    /// Number of surfaces in the first face's mip chain.
    pub fn mipmap_count(&self) -> usize {
        self.faces.first().map_or(0, |face| face.mipmaps.len())
    }

    /// Read a DDS file from disk.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a DDS file from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::InvalidHeader("file too small".into()));
        }

        let mut reader = BinaryReader::new(data);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(reader.read_bytes(4)?);
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let header: DdsHeader = reader.read_struct()?;
        let header_size = header.size;
        if header_size != DdsHeader::SIZE {
            return Err(Error::InvalidHeader(format!(
                "header size {header_size}, expected {}",
                DdsHeader::SIZE
            )));
        }

        let dx10_header: Option<DdsHeaderDxt10> = if header.is_dx10() {
            Some(reader.read_struct()?)
        } else {
            None
        };

        if header.caps2 & caps::CUBEMAP != 0
            || dx10_header.is_some_and(|dx10| dx10.misc_flag & DdsHeaderDxt10::MISC_TEXTURE_CUBE != 0)
        {
            return Err(Error::Unsupported("cube maps"));
        }
        if header.caps2 & caps::VOLUME != 0 {
            return Err(Error::Unsupported("volume textures"));
        }
        if dx10_header.is_some_and(|dx10| dx10.array_size > 1) {
            return Err(Error::Unsupported("texture arrays"));
        }

        let mut dds = Self {
            header,
            dx10_header,
            faces: Vec::new(),
        };

        let format = dds.format();
        if format == DxgiFormat::Unknown {
            return Err(Error::UnsupportedFormat(format));
        }

        let (width, height) = (header.width, header.height);
        let levels = header.mip_levels();
        let chain = full_chain_length(width, height);
        if levels > chain {
            return Err(Error::InvalidHeader(format!(
                "{levels} mip levels for a {width}x{height} surface, at most {chain} possible"
            )));
        }
        log::debug!("parsing DDS {width}x{height} {format} with {levels} mip level(s)");

        let mut face = DdsFace::new(width, height, surface_bytes(format, width, height)?);
        for level in 0..levels {
            let mip_width = (width >> level).max(1);
            let mip_height = (height >> level).max(1);
            let size = surface_bytes(format, mip_width, mip_height)?;

            if reader.remaining() < size {
                return Err(Error::MipmapSizeMismatch {
                    level: level as usize,
                    expected: size,
                    actual: reader.remaining(),
                });
            }
            let bytes = reader.read_bytes(size)?;
            face.mipmaps.push(DdsMipmap::new(bytes.to_vec(), mip_width, mip_height));
        }
        dds.faces.push(face);

        if !reader.is_empty() {
            log::debug!("ignoring {} trailing byte(s) after the mip chain", reader.remaining());
        }

        Ok(dds)
    }

    /// Serialise to bytes: magic, header, optional extended header and
    /// every face's surfaces in order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload: usize = self
            .faces
            .iter()
            .flat_map(|face| face.mipmaps.iter())
            .map(|mip| mip.data.len())
            .sum();

        let mut output = Vec::with_capacity(4 + DdsHeader::SIZE as usize + 20 + payload);
        output.extend_from_slice(DDS_MAGIC);
        output.extend_from_slice(self.header.as_bytes());
        if let Some(dx10) = &self.dx10_header {
            output.extend_from_slice(dx10.as_bytes());
        }
        for face in &self.faces {
            for mip in &face.mipmaps {
                output.extend_from_slice(&mip.data);
            }
        }
        output
    }

    /// Write the container to disk.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}
