//! Widening of single- and dual-channel pixel buffers to RGBA8.
//!
//! The engine's `Alpha8` and `L8A8` textures have no direct equivalent in
//! the formats downstream tools handle well, so they are expanded to four
//! channels before they are handed to a DDS container.

use crate::{Error, Result};

fn check_len(buffer: &[u8], width: u32, height: u32, channels: usize) -> Result<usize> {
    let pixels = width as usize * height as usize;
    let expected = pixels * channels;
    if buffer.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(pixels)
}

/// Expand one alpha byte per pixel into white RGBA8 pixels.
///
/// ```
/// let rgba = bimage_bim::expand_alpha8(&[0x80], 1, 1)?;
/// assert_eq!(rgba, [255, 255, 255, 0x80]);
/// # Ok::<(), bimage_bim::Error>(())
/// ```
pub fn expand_alpha8(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixels = check_len(buffer, width, height, 1)?;

    let mut out = Vec::with_capacity(pixels * 4);
    for &alpha in buffer {
        out.extend_from_slice(&[u8::MAX, u8::MAX, u8::MAX, alpha]);
    }
    Ok(out)
}

/// Expand interleaved luminance/alpha pairs into grey RGBA8 pixels.
pub fn expand_luminance_alpha8(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixels = check_len(buffer, width, height, 2)?;

    let mut out = Vec::with_capacity(pixels * 4);
    for pair in buffer.chunks_exact(2) {
        let (luminance, alpha) = (pair[0], pair[1]);
        out.extend_from_slice(&[luminance, luminance, luminance, alpha]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_alpha8() {
        let out = expand_alpha8(&[0x80; 4], 2, 2).unwrap();
        assert_eq!(out.len(), 16);
        for pixel in out.chunks_exact(4) {
            assert_eq!(pixel, [255, 255, 255, 128]);
        }
    }

    #[test]
    fn test_expand_luminance_alpha8() {
        let out = expand_luminance_alpha8(&[10, 20, 30, 40], 2, 1).unwrap();
        assert_eq!(out, [10, 10, 10, 20, 30, 30, 30, 40]);
    }

    #[test]
    fn test_size_mismatch() {
        assert!(matches!(
            expand_alpha8(&[0; 3], 2, 2),
            Err(Error::SizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(matches!(
            expand_luminance_alpha8(&[0; 4], 2, 2),
            Err(Error::SizeMismatch { expected: 8, actual: 4 })
        ));
    }

    #[test]
    fn test_input_untouched() {
        let input = vec![1, 2];
        let _ = expand_luminance_alpha8(&input, 1, 1).unwrap();
        assert_eq!(input, [1, 2]);
    }
}
