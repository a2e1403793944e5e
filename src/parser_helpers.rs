use bytemuck::{pod_read_unaligned, Pod};

use core::mem::size_of;

#[inline]
#[must_use]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  let (head, tail) = bytes.split_first_chunk::<N>()?;
  Some((*head, tail))
}

#[inline]
#[must_use]
pub(crate) fn try_pull_pod<T: Pod>(bytes: &[u8]) -> Option<(T, &[u8])> {
  let position = size_of::<T>();
  if bytes.len() >= position {
    let (head, tail) = bytes.split_at(position);
    Some((pod_read_unaligned(head), tail))
  } else {
    None
  }
}

/// Splits `len` bytes off the front, if there's that many.
#[inline]
#[must_use]
pub(crate) fn try_split_off(bytes: &[u8], len: usize) -> Option<(&[u8], &[u8])> {
  if bytes.len() >= len {
    Some(bytes.split_at(len))
  } else {
    None
  }
}
