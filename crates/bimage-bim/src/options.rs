//! Encoder settings.

/// Placement of mip descriptors relative to their payloads on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MipLayout {
    /// Every descriptor first, then every payload in the same order.
    ///
    /// This is what the engine's own tooling writes. For containers with
    /// more than one mip it does not match the interleaved layout the
    /// reader expects.
    #[default]
    Grouped,
    /// Descriptor and payload alternate, mirroring the read path.
    Interleaved,
}

/// Options for [`BimImage::to_bytes_with`](crate::BimImage::to_bytes_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Fail with [`Error::MissingPixelData`](crate::Error::MissingPixelData)
    /// instead of zero-filling an empty mip that declares a size.
    pub strict_payloads: bool,
    /// Record layout.
    pub mip_layout: MipLayout,
}

impl WriteOptions {
    /// Interleaved layout, byte-identical to what was read.
    pub fn interleaved() -> Self {
        Self {
            mip_layout: MipLayout::Interleaved,
            ..Self::default()
        }
    }

    /// Builder-style toggle for [`WriteOptions::strict_payloads`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_payloads = strict;
        self
    }
}
