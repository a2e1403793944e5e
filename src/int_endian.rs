//! Big-endian integer helpers.
//!
//! PNG stores every multi-byte integer in network byte order, regardless of
//! what the host machine uses.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};

use crate::try_pull_pod;

/// A `u32` stored as big-endian bytes.
///
/// This stores only an array of bytes, so unlike a normal `u32` it has an
/// alignment of 1.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U32BE([u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn from_u32(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
  /// The bytes, in the order they appear in a file.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    self.0
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("U32BE").field(&self.to_u32()).finish()
  }
}
impl From<u32> for U32BE {
  #[inline]
  fn from(value: u32) -> Self {
    Self::from_u32(value)
  }
}
impl From<U32BE> for u32 {
  #[inline]
  fn from(value: U32BE) -> Self {
    value.to_u32()
  }
}

/// Reads exactly 4 bytes off the front of the slice as a big-endian `u32`.
///
/// Returns the value and the rest of the slice, or `None` if fewer than 4
/// bytes are available.
#[inline]
#[must_use]
pub fn read_u32_be(bytes: &[u8]) -> Option<(u32, &[u8])> {
  try_pull_pod::<U32BE>(bytes).map(|(u, rest)| (u.to_u32(), rest))
}

/// Appends exactly 4 bytes to `out`: the big-endian form of `value`.
#[inline]
pub fn write_u32_be(out: &mut Vec<u8>, value: u32) {
  out.extend_from_slice(&U32BE::from_u32(value).to_bytes());
}
