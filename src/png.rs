#![forbid(unsafe_code)]

//! Module for working with PNG chunk streams.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! A PNG is an 8 byte signature followed by a series of chunks. Every chunk
//! has the same layout:
//!
//! | bytes    | meaning                                   |
//! |----------|-------------------------------------------|
//! | 4        | data length `n`, big-endian               |
//! | 4        | chunk type, four ASCII letters            |
//! | `n`      | data                                      |
//! | 4        | CRC-32 of the type and data, big-endian   |
//!
//! The last chunk is always `IEND`, which has no data.
//!
//! This module only ever looks at chunk boundaries. Pixel data is never
//! decompressed, and chunks other than `tEXt` and `IEND` are treated as
//! opaque bytes.
//!
//! ## Parsing Errors
//!
//! Reading is lenient: declared CRCs are *not* checked when chunks are
//! iterated (you can call [`PngRawChunk::crc_is_valid`] yourself), and the
//! chunk ordering rules are ignored. A declared length that runs past the end
//! of the data stops iteration, and the iterator remembers that it stopped
//! early so the caller can decide how much that matters.
//!
//! Writing is strict: every chunk written gets a correct length and CRC.

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod text;
pub use text::*;

mod iend;
pub use iend::*;

use crate::StructuralError;

/// The 8 bytes that every PNG starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The default limit on input size: 8 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, ..])
}

/// Checks that the bytes could be a PNG before any chunks are looked at.
///
/// The checks happen in this order:
/// * zero bytes is [`StructuralError::Empty`]
/// * more than `max_size_bytes` is [`StructuralError::TooLarge`]
/// * a missing or wrong signature is [`StructuralError::BadSignature`]
#[inline]
pub const fn validate(bytes: &[u8], max_size_bytes: usize) -> Result<(), StructuralError> {
  if bytes.is_empty() {
    Err(StructuralError::Empty)
  } else if bytes.len() > max_size_bytes {
    Err(StructuralError::TooLarge { len: bytes.len(), max: max_size_bytes })
  } else if !is_png_header_correct(bytes) {
    Err(StructuralError::BadSignature)
  } else {
    Ok(())
  }
}
