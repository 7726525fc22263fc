//! Common utilities for bimage.
//!
//! This crate provides the foundational pieces shared by the container crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices, in both the
//!   little-endian order used by DDS and the reversed order used by BIM
//! - [`Error`] - Errors raised while reading raw bytes

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
