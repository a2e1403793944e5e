use alloc::vec::Vec;

use crate::int_endian::write_u32_be;
use crate::{EmbedError, KeywordError};

use super::{Crc32, PngChunkType, PngRawChunk, PngRawChunkIter};

/// The largest data length a PNG chunk may declare.
pub const MAX_CHUNK_DATA_LEN: usize = (1 << 31) - 1;

/// A `tEXt` keyword that follows the PNG rules.
///
/// * 1 to 79 bytes.
/// * Latin-1 printable characters (32 to 126, 161 to 255) only, so never a
///   null byte.
/// * No leading or trailing space, and no two spaces in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Keyword<'k>(&'k [u8]);
impl<'k> Keyword<'k> {
  /// Checks the bytes against the keyword rules.
  pub const fn new(bytes: &'k [u8]) -> Result<Self, KeywordError> {
    if bytes.is_empty() || bytes.len() > 79 {
      return Err(KeywordError::BadLength(bytes.len()));
    }
    let mut i = 0;
    while i < bytes.len() {
      let byte = bytes[i];
      if !matches!(byte, 32..=126 | 161..=255) {
        return Err(KeywordError::BadByte { byte, index: i });
      }
      if byte == b' ' && (i == 0 || i == bytes.len() - 1 || bytes[i - 1] == b' ') {
        return Err(KeywordError::BadSpacing);
      }
      i += 1;
    }
    Ok(Self(bytes))
  }

  /// The keyword's bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &'k [u8] {
    self.0
  }
}

/// A keyword/text pair from a `tEXt` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextChunk<'b> {
  /// Everything before the first null byte.
  pub keyword: &'b [u8],
  /// Everything after the first null byte. Not decoded.
  pub text: &'b [u8],
}
impl<'b> TextChunk<'b> {
  /// Splits the chunk data on the first null byte.
  ///
  /// Gives `None` for chunks that aren't `tEXt`, and for `tEXt` chunks with
  /// no null byte at all.
  #[inline]
  #[must_use]
  pub fn from_raw(raw: &PngRawChunk<'b>) -> Option<Self> {
    if raw.type_() != PngChunkType::tEXt {
      return None;
    }
    let data = raw.data();
    let nul = data.iter().position(|&b| b == 0)?;
    Some(Self { keyword: &data[..nul], text: &data[nul + 1..] })
  }
}

/// Every keyword/text pair in the PNG, in file order.
///
/// Iteration stops at `IEND`, or when the stream is cut short.
#[inline]
pub fn text_chunks(bytes: &[u8]) -> impl Iterator<Item = TextChunk<'_>> + '_ {
  PngRawChunkIter::new(bytes).until_iend().filter_map(|raw| TextChunk::from_raw(&raw))
}

/// The full size of a `tEXt` chunk holding this keyword and text.
#[inline]
#[must_use]
pub const fn text_chunk_len(keyword: Keyword<'_>, text: &[u8]) -> usize {
  12 + keyword.as_bytes().len() + 1 + text.len()
}

/// The length field of a `tEXt` chunk holding this keyword and `text_len`
/// bytes of text.
///
/// ## Failure
/// * If that's more than [`MAX_CHUNK_DATA_LEN`].
#[inline]
pub fn text_chunk_data_len(keyword: Keyword<'_>, text_len: usize) -> Result<u32, EmbedError> {
  match (keyword.as_bytes().len() + 1).checked_add(text_len) {
    Some(len) if len <= MAX_CHUNK_DATA_LEN => Ok(len as u32),
    Some(len) => Err(EmbedError::ChunkTooLarge { len }),
    None => Err(EmbedError::ChunkTooLarge { len: usize::MAX }),
  }
}

/// Appends a complete `tEXt` chunk (length, type, data, CRC) to `out`.
///
/// ## Failure
/// * If the data would be longer than [`MAX_CHUNK_DATA_LEN`]. Nothing is
///   appended in that case.
pub fn write_text_chunk(
  out: &mut Vec<u8>, keyword: Keyword<'_>, text: &[u8],
) -> Result<(), EmbedError> {
  let data_len = text_chunk_data_len(keyword, text.len())?;
  out.reserve(12 + data_len as usize);
  write_u32_be(out, data_len);
  let crc_start = out.len();
  out.extend_from_slice(PngChunkType::tEXt.as_bytes());
  out.extend_from_slice(keyword.as_bytes());
  out.push(0);
  out.extend_from_slice(text);
  let mut crc = Crc32::new();
  crc.update(&out[crc_start..]);
  write_u32_be(out, crc.finish());
  Ok(())
}
