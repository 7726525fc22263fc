//! idTech image formats and their mapping to generic pixel formats.
//!
//! The engine stores a raw format code in every BIM header. [`forward`]
//! translates such a code into a [`DxgiFormat`]; [`reverse`] picks the
//! canonical engine code for a generic format. Both directions are plain
//! `match` tables with no runtime state.
//!
//! Several engine codes share one generic format. The reverse direction
//! always resolves those to a single canonical code, see
//! [`IdTechFormat::canonical`].

use std::fmt;

use bimage_dds::DxgiFormat;

macro_rules! id_tech_formats {
    ($($name:ident = $code:literal => $desc:literal,)+) => {
        /// Texture formats of the engine's image enumeration.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum IdTechFormat {
            $($name = $code,)+
        }

        impl IdTechFormat {
            /// Every format of the enumeration, in code order.
            pub const ALL: &'static [IdTechFormat] = &[$(Self::$name,)+];

            /// Look up a raw header code.
            pub const fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$name),)+
                    _ => None,
                }
            }

            /// Human-readable label.
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$name => $desc,)+
                }
            }
        }
    };
}

id_tech_formats! {
    NoFormat = 0x00 => "No Format",
    Rgba32F = 0x01 => "RGBA 32-bit Float",
    Rgba16F = 0x02 => "RGBA 16-bit Float (Half)",
    Rgba8 = 0x03 => "RGBA 8-bit Unsigned Integer",
    Argb8 = 0x04 => "ARGB 8-bit Unsigned Integer",
    Alpha8 = 0x05 => "Alpha 8-bit",
    L8A8 = 0x06 => "Luminance 8-bit + Alpha 8-bit",
    Rg8 = 0x07 => "RG 8-bit Unsigned Integer",
    Lum8 = 0x08 => "Luminance 8-bit",
    Int8 = 0x09 => "R 8-bit Integer",
    Bc1 = 0x0A => "Compressed BC1 (DXT1)",
    Bc3 = 0x0B => "Compressed BC3 (DXT5)",
    Depth = 0x0C => "Depth 32-bit Float",
    DepthStencil = 0x0D => "Depth 24-bit + Stencil 8-bit",
    X32FR32F = 0x0E => "R 32-bit Float",
    Y16FX16FRg16F = 0x0F => "RG 16-bit Float (legacy)",
    X16R16 = 0x10 => "R 16-bit Unsigned Normalized",
    Y16X16Rg16 = 0x11 => "RG 16-bit Unsigned Normalized",
    Rgb565 = 0x12 => "RGB 5-6-5",
    R8 = 0x13 => "R 8-bit Unsigned Integer",
    R11G11B10F = 0x14 => "RGB 11-11-10 Float",
    X16FR16F = 0x15 => "R 16-bit Float",
    Bc6hUf16 = 0x16 => "Compressed BC6H (Unsigned HDR)",
    Bc7 = 0x17 => "Compressed BC7",
    Bc4 = 0x18 => "Compressed BC4 (R Channel)",
    Bc5 = 0x19 => "Compressed BC5 (RG Channels)",
    Rg16F = 0x1A => "RG 16-bit Float",
    R10G10B10A2 = 0x1B => "RGBA 10-10-10-2 Unsigned Integer",
    Rg32F = 0x1C => "RG 32-bit Float",
    R32Uint = 0x1D => "R 32-bit Unsigned Integer",
    R16Uint = 0x1E => "R 16-bit Unsigned Integer",
    Depth16 = 0x1F => "Depth 16-bit",
    Rgba8Srgb = 0x20 => "sRGBA 8-bit Unsigned Integer",
    Bc1Srgb = 0x21 => "Compressed sRGB BC1 (DXT1)",
    Bc3Srgb = 0x22 => "Compressed sRGB BC3 (DXT5)",
    Bc7Srgb = 0x23 => "Compressed sRGB BC7",
    Bc6hSf16 = 0x24 => "Compressed BC6H (Signed HDR)",
    Astc4x4 = 0x25 => "Compressed ASTC 4x4",
    Astc4x4Srgb = 0x26 => "Compressed sRGB ASTC 4x4",
    Depth32F = 0x35 => "Depth 32-bit Float",
    Bc1ZeroAlpha = 0x36 => "Compressed BC1 (DXT1, zero alpha)",
}

impl IdTechFormat {
    /// Raw header code.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether the engine treats this format as sRGB encoded.
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::Rgba8Srgb | Self::Bc1Srgb | Self::Bc3Srgb | Self::Bc7Srgb | Self::Astc4x4Srgb
        )
    }

    /// The code [`reverse`] returns for this format's generic format.
    ///
    /// Legacy aliases collapse onto their modern equivalent:
    ///
    /// | alias | canonical |
    /// |---|---|
    /// | `L8A8` | `Rg8` |
    /// | `Lum8` | `R8` |
    /// | `Y16FX16FRg16F` | `Rg16F` |
    /// | `Depth` | `Depth32F` |
    /// | `Bc1ZeroAlpha` | `Bc1` |
    pub const fn canonical(self) -> Self {
        match self {
            Self::L8A8 => Self::Rg8,
            Self::Lum8 => Self::R8,
            Self::Y16FX16FRg16F => Self::Rg16F,
            Self::Depth => Self::Depth32F,
            Self::Bc1ZeroAlpha => Self::Bc1,
            other => other,
        }
    }

    /// The generic pixel format for this engine format.
    pub const fn to_dxgi(self) -> DxgiFormat {
        use DxgiFormat as D;

        match self {
            Self::NoFormat => D::Unknown,
            Self::Rgba32F => D::R32G32B32A32Float,
            Self::Rgba16F => D::R16G16B16A16Float,
            Self::Rgba8 => D::R8G8B8A8Unorm,
            Self::Argb8 => D::B8G8R8A8Unorm,
            Self::Alpha8 => D::A8Unorm,
            Self::L8A8 | Self::Rg8 => D::R8G8Unorm,
            Self::Lum8 | Self::R8 => D::R8Unorm,
            Self::Int8 => D::R8Uint,
            Self::Bc1 | Self::Bc1ZeroAlpha => D::Bc1Unorm,
            Self::Bc3 => D::Bc3Unorm,
            Self::Depth | Self::Depth32F => D::D32Float,
            Self::DepthStencil => D::D24UnormS8Uint,
            Self::X32FR32F => D::R32Float,
            Self::Y16FX16FRg16F | Self::Rg16F => D::R16G16Float,
            Self::X16R16 => D::R16Unorm,
            Self::Y16X16Rg16 => D::R16G16Unorm,
            Self::Rgb565 => D::B5G6R5Unorm,
            Self::R11G11B10F => D::R11G11B10Float,
            Self::X16FR16F => D::R16Float,
            Self::Bc6hUf16 => D::Bc6hUf16,
            Self::Bc7 => D::Bc7Unorm,
            Self::Bc4 => D::Bc4Unorm,
            Self::Bc5 => D::Bc5Unorm,
            Self::R10G10B10A2 => D::R10G10B10A2Unorm,
            Self::Rg32F => D::R32G32Float,
            Self::R32Uint => D::R32Uint,
            Self::R16Uint => D::R16Uint,
            Self::Depth16 => D::D16Unorm,
            Self::Rgba8Srgb => D::R8G8B8A8UnormSrgb,
            Self::Bc1Srgb => D::Bc1UnormSrgb,
            Self::Bc3Srgb => D::Bc3UnormSrgb,
            Self::Bc7Srgb => D::Bc7UnormSrgb,
            Self::Bc6hSf16 => D::Bc6hSf16,
            Self::Astc4x4 => D::Astc4x4Unorm,
            Self::Astc4x4Srgb => D::Astc4x4UnormSrgb,
        }
    }

    /// The canonical engine format for a generic format.
    ///
    /// `prefer_srgb` selects the sRGB sibling for linear formats that have
    /// one (RGBA8, BC1, BC3, BC7, ASTC 4x4). Explicit sRGB generic formats
    /// always map to their sRGB code.
    pub const fn from_dxgi(format: DxgiFormat, prefer_srgb: bool) -> Option<Self> {
        use DxgiFormat as D;

        let linear = match format {
            D::R32G32B32A32Float => Self::Rgba32F,
            D::R16G16B16A16Float => Self::Rgba16F,
            D::R8G8B8A8Unorm => Self::Rgba8,
            D::R8G8B8A8UnormSrgb => Self::Rgba8Srgb,
            D::B8G8R8A8Unorm => Self::Argb8,
            D::A8Unorm => Self::Alpha8,
            D::R8G8Unorm => Self::Rg8,
            D::R8Unorm => Self::R8,
            D::R8Uint => Self::Int8,
            D::Bc1Unorm => Self::Bc1,
            D::Bc1UnormSrgb => Self::Bc1Srgb,
            D::Bc3Unorm => Self::Bc3,
            D::Bc3UnormSrgb => Self::Bc3Srgb,
            D::D32Float => Self::Depth32F,
            D::D24UnormS8Uint => Self::DepthStencil,
            D::R32Float => Self::X32FR32F,
            D::R16G16Float => Self::Rg16F,
            D::R16Unorm => Self::X16R16,
            D::R16G16Unorm => Self::Y16X16Rg16,
            D::B5G6R5Unorm => Self::Rgb565,
            D::R11G11B10Float => Self::R11G11B10F,
            D::R16Float => Self::X16FR16F,
            D::Bc6hUf16 => Self::Bc6hUf16,
            D::Bc6hSf16 => Self::Bc6hSf16,
            D::Bc7Unorm => Self::Bc7,
            D::Bc7UnormSrgb => Self::Bc7Srgb,
            D::Bc4Unorm => Self::Bc4,
            D::Bc5Unorm => Self::Bc5,
            D::R10G10B10A2Unorm => Self::R10G10B10A2,
            D::R32G32Float => Self::Rg32F,
            D::R32Uint => Self::R32Uint,
            D::R16Uint => Self::R16Uint,
            D::D16Unorm => Self::Depth16,
            D::Astc4x4Unorm => Self::Astc4x4,
            D::Astc4x4UnormSrgb => Self::Astc4x4Srgb,
            D::Bc2Unorm | D::Unknown => return None,
        };

        if !prefer_srgb {
            return Some(linear);
        }
        Some(match linear {
            Self::Rgba8 => Self::Rgba8Srgb,
            Self::Bc1 => Self::Bc1Srgb,
            Self::Bc3 => Self::Bc3Srgb,
            Self::Bc7 => Self::Bc7Srgb,
            Self::Astc4x4 => Self::Astc4x4Srgb,
            other => other,
        })
    }
}

impl fmt::Display for IdTechFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04X})", self.description(), self.code())
    }
}

/// Generic format for a raw header code.
///
/// Codes outside the enumeration, and `NoFormat` itself, yield
/// [`DxgiFormat::Unknown`]; callers must check for it.
pub fn forward(code: i32) -> DxgiFormat {
    IdTechFormat::from_code(code).map_or(DxgiFormat::Unknown, IdTechFormat::to_dxgi)
}

/// Canonical engine format for a generic format, `None` when the engine
/// has no counterpart.
pub fn reverse(format: DxgiFormat, prefer_srgb: bool) -> Option<IdTechFormat> {
    IdTechFormat::from_dxgi(format, prefer_srgb)
}
