/// The CRC-32 lookup table (reflected polynomial `0xEDB88320`).
///
/// Built at compile time and never written afterward, so any number of
/// threads can read it at once.
static CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320_u32 ^ (c >> 1) } else { c >> 1 };
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

#[inline]
fn update_crc(mut crc: u32, bytes: &[u8]) -> u32 {
  for &byte in bytes {
    crc = CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// Standard CRC-32 (the one zlib and PNG use) of some bytes.
///
/// For a PNG chunk the checksum covers the chunk type followed by the chunk
/// data, which you can get without joining the two slices by using
/// [`Crc32`] instead.
#[inline]
#[must_use]
pub fn png_crc(bytes: &[u8]) -> u32 {
  update_crc(u32::MAX, bytes) ^ u32::MAX
}

/// Incremental CRC-32.
///
/// Feeding the bytes in pieces gives the same result as [`png_crc`] on all
/// of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc32(u32);
impl Crc32 {
  /// A fresh checksum, with no bytes processed.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }
  /// Process more bytes.
  #[inline]
  pub fn update(&mut self, bytes: &[u8]) {
    self.0 = update_crc(self.0, bytes);
  }
  /// The checksum of everything processed so far.
  #[inline]
  #[must_use]
  pub const fn finish(&self) -> u32 {
    self.0 ^ u32::MAX
  }
}
impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
