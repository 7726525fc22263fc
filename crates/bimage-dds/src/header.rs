//! DDS header structures.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::DxgiFormat;

/// `DdsHeader::flags` bits.
pub mod header_flags {
    pub const CAPS: u32 = 0x1;
    pub const HEIGHT: u32 = 0x2;
    pub const WIDTH: u32 = 0x4;
    pub const PITCH: u32 = 0x8;
    pub const PIXEL_FORMAT: u32 = 0x1000;
    pub const MIPMAP_COUNT: u32 = 0x20000;
    pub const LINEAR_SIZE: u32 = 0x80000;
    pub const DEPTH: u32 = 0x800000;
    /// Flags every valid header must carry.
    pub const REQUIRED: u32 = CAPS | HEIGHT | WIDTH | PIXEL_FORMAT;
}

/// `DdsHeader::caps` and `DdsHeader::caps2` bits.
pub mod caps {
    pub const COMPLEX: u32 = 0x8;
    pub const TEXTURE: u32 = 0x1000;
    pub const MIPMAP: u32 = 0x400000;

    /// `caps2`: cube map.
    pub const CUBEMAP: u32 = 0x200;
    /// `caps2`: volume texture.
    pub const VOLUME: u32 = 0x200000;
}

/// `DdsPixelFormat::flags` bits.
pub mod pixel_format_flags {
    pub const ALPHA_PIXELS: u32 = 0x1;
    pub const ALPHA: u32 = 0x2;
    pub const FOURCC: u32 = 0x4;
    pub const RGB: u32 = 0x40;
    pub const LUMINANCE: u32 = 0x20000;
}

/// DDS file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// A 2D texture header with the required flags and a single surface.
    pub fn new(width: u32, height: u32, pixel_format: DdsPixelFormat) -> Self {
        Self {
            size: Self::SIZE,
            flags: header_flags::REQUIRED,
            height,
            width,
            pitch_or_linear_size: 0,
            depth: 1,
            mipmap_count: 1,
            reserved1: [0; 11],
            pixel_format,
            caps: caps::TEXTURE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        let pixel_format = self.pixel_format;
        pixel_format.flags & pixel_format_flags::FOURCC != 0 && pixel_format.four_cc == FourCC::DX10
    }

    /// Number of stored mip levels (at least one).
    pub fn mip_levels(&self) -> u32 {
        let count = self.mipmap_count;
        if self.flags & header_flags::MIPMAP_COUNT != 0 {
            count.max(1)
        } else {
            1
        }
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

/// Legacy channel-mask layouts: `(format, flags, bits, r, g, b, a)`.
const LEGACY_MASKS: &[(DxgiFormat, u32, u32, u32, u32, u32, u32)] = &[
    (
        DxgiFormat::R8G8B8A8Unorm,
        pixel_format_flags::RGB | pixel_format_flags::ALPHA_PIXELS,
        32,
        0x0000_00ff,
        0x0000_ff00,
        0x00ff_0000,
        0xff00_0000,
    ),
    (
        DxgiFormat::B8G8R8A8Unorm,
        pixel_format_flags::RGB | pixel_format_flags::ALPHA_PIXELS,
        32,
        0x00ff_0000,
        0x0000_ff00,
        0x0000_00ff,
        0xff00_0000,
    ),
    (DxgiFormat::B5G6R5Unorm, pixel_format_flags::RGB, 16, 0xf800, 0x07e0, 0x001f, 0),
    (DxgiFormat::R8G8Unorm, pixel_format_flags::RGB, 16, 0x00ff, 0xff00, 0, 0),
    (DxgiFormat::R8Unorm, pixel_format_flags::LUMINANCE, 8, 0xff, 0, 0, 0),
    (DxgiFormat::A8Unorm, pixel_format_flags::ALPHA, 8, 0, 0, 0, 0xff),
];

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;

    /// A pixel format described only by a four-character code.
    pub fn from_four_cc(four_cc: FourCC) -> Self {
        Self {
            size: Self::SIZE,
            flags: pixel_format_flags::FOURCC,
            four_cc,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }

    /// The pre-DX10 description of `format`, if one exists.
    ///
    /// Formats without one must be written with a `DX10` extended header.
    pub fn legacy(format: DxgiFormat) -> Option<Self> {
        if let Some(four_cc) = FourCC::for_format(format) {
            return Some(Self::from_four_cc(four_cc));
        }
        LEGACY_MASKS
            .iter()
            .find(|entry| entry.0 == format)
            .map(|&(_, flags, bits, r, g, b, a)| Self {
                size: Self::SIZE,
                flags,
                four_cc: FourCC([0; 4]),
                rgb_bit_count: bits,
                r_bit_mask: r,
                g_bit_mask: g,
                b_bit_mask: b,
                a_bit_mask: a,
            })
    }

    /// Resolve a pre-DX10 pixel format to its generic format.
    pub fn resolve(&self) -> DxgiFormat {
        let flags = self.flags;
        if flags & pixel_format_flags::FOURCC != 0 {
            return self.four_cc.format();
        }

        let (bits, r, g, b, a) = (
            self.rgb_bit_count,
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        );
        let layout = flags
            & (pixel_format_flags::RGB | pixel_format_flags::LUMINANCE | pixel_format_flags::ALPHA);

        LEGACY_MASKS
            .iter()
            .find(|entry| {
                let entry_layout = entry.1 & !pixel_format_flags::ALPHA_PIXELS;
                entry_layout == layout
                    && entry.2 == bits
                    && entry.3 == r
                    && entry.4 == g
                    && entry.5 == b
                    && (a == entry.6 || a == 0)
            })
            .map_or(DxgiFormat::Unknown, |entry| entry.0)
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
    /// BC4 compression (ATI naming).
    pub const ATI1: Self = Self(*b"ATI1");
    /// BC5 compression (ATI naming).
    pub const ATI2: Self = Self(*b"ATI2");
    /// BC4U compression.
    pub const BC4U: Self = Self(*b"BC4U");
    /// BC5U compression.
    pub const BC5U: Self = Self(*b"BC5U");

    /// The code written for `format`, if it has a legacy one.
    pub fn for_format(format: DxgiFormat) -> Option<Self> {
        match format {
            DxgiFormat::Bc1Unorm => Some(Self::DXT1),
            DxgiFormat::Bc2Unorm => Some(Self::DXT3),
            DxgiFormat::Bc3Unorm => Some(Self::DXT5),
            DxgiFormat::Bc4Unorm => Some(Self::ATI1),
            DxgiFormat::Bc5Unorm => Some(Self::ATI2),
            _ => None,
        }
    }

    /// The generic format this code stands for.
    pub fn format(self) -> DxgiFormat {
        match self {
            Self::DXT1 => DxgiFormat::Bc1Unorm,
            Self::DXT3 => DxgiFormat::Bc2Unorm,
            Self::DXT5 => DxgiFormat::Bc3Unorm,
            Self::ATI1 | Self::BC4U => DxgiFormat::Bc4Unorm,
            Self::ATI2 | Self::BC5U => DxgiFormat::Bc5Unorm,
            _ => DxgiFormat::Unknown,
        }
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    /// `D3D10_RESOURCE_DIMENSION_TEXTURE2D`.
    pub const DIMENSION_TEXTURE_2D: u32 = 3;
    /// `D3D10_RESOURCE_MISC_TEXTURECUBE`.
    pub const MISC_TEXTURE_CUBE: u32 = 0x4;

    /// Extended header for a single 2D texture of `format`.
    pub fn texture_2d(format: DxgiFormat) -> Self {
        Self {
            dxgi_format: format.as_u32(),
            resource_dimension: Self::DIMENSION_TEXTURE_2D,
            misc_flag: 0,
            array_size: 1,
            misc_flags2: 0,
        }
    }

    /// The generic format stored in this header.
    pub fn format(&self) -> DxgiFormat {
        DxgiFormat::from_u32(self.dxgi_format)
    }
}
