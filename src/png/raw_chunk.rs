use core::fmt::{Debug, Write};
use core::iter::FusedIterator;

use crate::int_endian::read_u32_be;
use crate::{try_pull_byte_array, try_split_off};

use super::{Crc32, PNG_SIGNATURE};

/// The four letter type code of a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Uncompressed Latin-1 text
  pub const tEXt: Self = Self(*b"tEXt");

  /// The type as bytes, as they appear in the file.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
  /// Critical chunks have an uppercase first letter.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 32) == 0
  }
  /// Chunks in the public registry have an uppercase second letter.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & 32) == 0
  }
  /// The third letter is currently required to be uppercase.
  #[inline]
  #[must_use]
  pub const fn is_reserved_bit_valid(self) -> bool {
    (self.0[2] & 32) == 0
  }
  /// Editors may copy safe-to-copy chunks (lowercase fourth letter) even
  /// after they've changed critical chunks.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 32) != 0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for b in self.0 {
      f.write_char(b as char)?;
    }
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) offset: usize,
  pub(crate) type_: PngChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl<'b> PngRawChunk<'b> {
  /// Offset within the whole PNG (signature included) of this chunk's
  /// length field.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }
  /// Offset just past this chunk's CRC field.
  #[inline]
  #[must_use]
  pub const fn end_offset(&self) -> usize {
    self.offset + 12 + self.data.len()
  }
  /// The chunk's type code.
  #[inline]
  #[must_use]
  pub const fn type_(&self) -> PngChunkType {
    self.type_
  }
  /// The declared data length.
  #[inline]
  #[must_use]
  pub const fn length(&self) -> u32 {
    // the iterator read this from a u32, so it always fits
    self.data.len() as u32
  }
  /// The chunk's data.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC stored in the file. This is never checked during iteration.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Computes the CRC that this chunk *should* have.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    let mut crc = Crc32::new();
    crc.update(self.type_.as_bytes());
    crc.update(self.data);
    crc.finish()
  }
  /// If the declared CRC matches the actual CRC.
  #[inline]
  #[must_use]
  pub fn crc_is_valid(&self) -> bool {
    self.declared_crc == self.compute_actual_crc()
  }
}
impl Debug for PngRawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("offset", &self.offset)
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// Where a [`PngRawChunkIter`] is at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterState {
  /// More chunks might follow.
  Running,
  /// Every byte was consumed by whole chunks.
  Done,
  /// The chunk starting at `offset` claims more bytes than remain.
  ///
  /// Nothing more will be produced.
  Truncated {
    /// Offset of the chunk that didn't fit.
    offset: usize,
  },
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// This never panics and never reads out of bounds, no matter what bytes it
/// is given. Once it stops it stays stopped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngRawChunkIter<'b> {
  spare: &'b [u8],
  offset: usize,
  state: IterState,
}
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will skip the PNG signature automatically.
  ///
  /// The signature bytes are skipped, not checked. Use
  /// [`validate`](super::validate) first if you care.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => {
        Self { spare: rest, offset: PNG_SIGNATURE.len(), state: IterState::Running }
      }
      _ => Self { spare: &[], offset: 0, state: IterState::Truncated { offset: 0 } },
    }
  }

  /// The iterator's current status.
  #[inline]
  #[must_use]
  pub const fn state(&self) -> IterState {
    self.state
  }

  /// If iteration stopped because a chunk ran past the end of the data.
  #[inline]
  #[must_use]
  pub const fn is_truncated(&self) -> bool {
    matches!(self.state, IterState::Truncated { .. })
  }

  /// Stops the iteration right after the `IEND` chunk.
  #[inline]
  #[must_use]
  pub const fn until_iend(self) -> UntilIend<'b> {
    UntilIend { inner: self, seen_iend: false }
  }

  #[inline]
  fn truncated(&mut self) -> Option<PngRawChunk<'b>> {
    log::trace!("chunk at byte {} runs past the end of the data", self.offset);
    self.spare = &[];
    self.state = IterState::Truncated { offset: self.offset };
    None
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.state != IterState::Running {
      return None;
    }
    if self.spare.is_empty() {
      self.state = IterState::Done;
      return None;
    }
    let Some((chunk_len, rest)) = read_u32_be(self.spare) else { return self.truncated() };
    let Some((type_bytes, rest)) = try_pull_byte_array::<4>(rest) else {
      return self.truncated();
    };
    let Some((data, rest)) = try_split_off(rest, chunk_len as usize) else {
      return self.truncated();
    };
    let Some((declared_crc, rest)) = read_u32_be(rest) else { return self.truncated() };
    let chunk =
      PngRawChunk { offset: self.offset, type_: PngChunkType(type_bytes), data, declared_crc };
    self.spare = rest;
    self.offset = chunk.end_offset();
    log::trace!("{chunk:?}");
    Some(chunk)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some(self.spare.len() / 12))
  }
}
impl FusedIterator for PngRawChunkIter<'_> {}

/// See [`PngRawChunkIter::until_iend`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UntilIend<'b> {
  inner: PngRawChunkIter<'b>,
  seen_iend: bool,
}
impl UntilIend<'_> {
  /// If the `IEND` chunk has been produced.
  #[inline]
  #[must_use]
  pub const fn seen_iend(&self) -> bool {
    self.seen_iend
  }
  /// The underlying iterator's status.
  ///
  /// Stopping at `IEND` leaves this as [`IterState::Running`] when more
  /// bytes follow.
  #[inline]
  #[must_use]
  pub const fn state(&self) -> IterState {
    self.inner.state()
  }
  /// If iteration stopped because a chunk ran past the end of the data.
  #[inline]
  #[must_use]
  pub const fn is_truncated(&self) -> bool {
    self.inner.is_truncated()
  }
}
impl<'b> Iterator for UntilIend<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.seen_iend {
      return None;
    }
    let chunk = self.inner.next()?;
    self.seen_iend = chunk.type_ == PngChunkType::IEND;
    Some(chunk)
  }
}
impl FusedIterator for UntilIend<'_> {}
