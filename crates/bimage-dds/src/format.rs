//! Generic pixel formats.
//!
//! [`DxgiFormat`] is the format space shared by the DDS container and the
//! engine-specific format tables: every engine format code is translated to
//! one of these values before a DDS header is built, and back again when a
//! DDS file is imported.

use std::fmt;

/// DXGI pixel formats understood by this crate.
///
/// Discriminants are the numeric DXGI values stored in the `DX10` extended
/// header. Only the formats reachable from the engine format table are
/// listed, plus [`DxgiFormat::Bc2Unorm`] which legacy `DXT3` files resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DxgiFormat {
    /// Unknown or unmapped format.
    Unknown = 0,
    R32G32B32A32Float = 2,
    R16G16B16A16Float = 10,
    R32G32Float = 16,
    R10G10B10A2Unorm = 24,
    R11G11B10Float = 26,
    R8G8B8A8Unorm = 28,
    R8G8B8A8UnormSrgb = 29,
    R16G16Float = 34,
    R16G16Unorm = 35,
    D32Float = 40,
    R32Float = 41,
    R32Uint = 42,
    D24UnormS8Uint = 45,
    R8G8Unorm = 49,
    R16Float = 54,
    D16Unorm = 55,
    R16Unorm = 56,
    R16Uint = 57,
    R8Unorm = 61,
    R8Uint = 62,
    A8Unorm = 65,
    Bc1Unorm = 71,
    Bc1UnormSrgb = 72,
    Bc2Unorm = 74,
    Bc3Unorm = 77,
    Bc3UnormSrgb = 78,
    Bc4Unorm = 80,
    Bc5Unorm = 83,
    B5G6R5Unorm = 85,
    B8G8R8A8Unorm = 87,
    Bc6hUf16 = 95,
    Bc6hSf16 = 96,
    Bc7Unorm = 98,
    Bc7UnormSrgb = 99,
    Astc4x4Unorm = 134,
    Astc4x4UnormSrgb = 135,
}

impl DxgiFormat {
    /// Every known format except [`DxgiFormat::Unknown`].
    pub const ALL: [DxgiFormat; 36] = [
        Self::R32G32B32A32Float,
        Self::R16G16B16A16Float,
        Self::R32G32Float,
        Self::R10G10B10A2Unorm,
        Self::R11G11B10Float,
        Self::R8G8B8A8Unorm,
        Self::R8G8B8A8UnormSrgb,
        Self::R16G16Float,
        Self::R16G16Unorm,
        Self::D32Float,
        Self::R32Float,
        Self::R32Uint,
        Self::D24UnormS8Uint,
        Self::R8G8Unorm,
        Self::R16Float,
        Self::D16Unorm,
        Self::R16Unorm,
        Self::R16Uint,
        Self::R8Unorm,
        Self::R8Uint,
        Self::A8Unorm,
        Self::Bc1Unorm,
        Self::Bc1UnormSrgb,
        Self::Bc2Unorm,
        Self::Bc3Unorm,
        Self::Bc3UnormSrgb,
        Self::Bc4Unorm,
        Self::Bc5Unorm,
        Self::B5G6R5Unorm,
        Self::B8G8R8A8Unorm,
        Self::Bc6hUf16,
        Self::Bc6hSf16,
        Self::Bc7Unorm,
        Self::Bc7UnormSrgb,
        Self::Astc4x4Unorm,
        Self::Astc4x4UnormSrgb,
    ];

    /// Look up a format by its numeric DXGI value.
    ///
    /// Values this crate does not know resolve to [`DxgiFormat::Unknown`].
    pub fn from_u32(value: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|format| *format as u32 == value)
            .unwrap_or(Self::Unknown)
    }

    /// Numeric DXGI value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether this is a block-compressed format.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::Bc1Unorm
                | Self::Bc1UnormSrgb
                | Self::Bc2Unorm
                | Self::Bc3Unorm
                | Self::Bc3UnormSrgb
                | Self::Bc4Unorm
                | Self::Bc5Unorm
                | Self::Bc6hUf16
                | Self::Bc6hSf16
                | Self::Bc7Unorm
                | Self::Bc7UnormSrgb
                | Self::Astc4x4Unorm
                | Self::Astc4x4UnormSrgb
        )
    }

    /// Whether channel values are sRGB encoded.
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::R8G8B8A8UnormSrgb
                | Self::Bc1UnormSrgb
                | Self::Bc3UnormSrgb
                | Self::Bc7UnormSrgb
                | Self::Astc4x4UnormSrgb
        )
    }

    /// Bytes per 4x4 block, or `None` for uncompressed formats.
    pub const fn block_bytes(self) -> Option<usize> {
        match self {
            Self::Bc1Unorm | Self::Bc1UnormSrgb | Self::Bc4Unorm => Some(8),
            Self::Bc2Unorm
            | Self::Bc3Unorm
            | Self::Bc3UnormSrgb
            | Self::Bc5Unorm
            | Self::Bc6hUf16
            | Self::Bc6hSf16
            | Self::Bc7Unorm
            | Self::Bc7UnormSrgb
            | Self::Astc4x4Unorm
            | Self::Astc4x4UnormSrgb => Some(16),
            _ => None,
        }
    }

    /// Bits per pixel for uncompressed formats, or `None` for block formats
    /// and [`DxgiFormat::Unknown`].
    pub const fn bits_per_pixel(self) -> Option<usize> {
        match self {
            Self::R32G32B32A32Float => Some(128),
            Self::R16G16B16A16Float | Self::R32G32Float => Some(64),
            Self::R10G10B10A2Unorm
            | Self::R11G11B10Float
            | Self::R8G8B8A8Unorm
            | Self::R8G8B8A8UnormSrgb
            | Self::R16G16Float
            | Self::R16G16Unorm
            | Self::D32Float
            | Self::R32Float
            | Self::R32Uint
            | Self::D24UnormS8Uint
            | Self::B8G8R8A8Unorm => Some(32),
            Self::R8G8Unorm
            | Self::R16Float
            | Self::D16Unorm
            | Self::R16Unorm
            | Self::R16Uint
            | Self::B5G6R5Unorm => Some(16),
            Self::R8Unorm | Self::R8Uint | Self::A8Unorm => Some(8),
            _ => None,
        }
    }

    /// Size in bytes of one surface of the given dimensions.
    ///
    /// Block formats round each dimension up to whole 4x4 blocks, with at
    /// least one block per axis. Returns `None` for [`DxgiFormat::Unknown`]
    /// and when the size does not fit in `usize`.
    pub fn surface_size(self, width: u32, height: u32) -> Option<usize> {
        if let Some(block) = self.block_bytes() {
            let blocks_x = (width as usize).div_ceil(4).max(1);
            let blocks_y = (height as usize).div_ceil(4).max(1);
            return blocks_x.checked_mul(blocks_y)?.checked_mul(block);
        }
        let bits = self.bits_per_pixel()?;
        let total = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(bits)?;
        Some(total.div_ceil(8))
    }

    /// Row pitch in bytes for uncompressed formats.
    pub fn row_pitch(self, width: u32) -> Option<usize> {
        let bits = self.bits_per_pixel()?;
        Some((width as usize).checked_mul(bits)?.div_ceil(8))
    }
}

impl fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_u32())
    }
}
