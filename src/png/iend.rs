use crate::EmbedError;

use super::{PngChunkType, PngRawChunkIter};

/// Finds the byte offset where the `IEND` chunk's length field begins.
///
/// This is where new ancillary chunks go when you want to add them after
/// everything else.
///
/// ## Failure
/// * [`EmbedError::MissingTerminator`] if the chunk stream ends, or is cut
///   short, before an `IEND` chunk shows up.
pub fn find_iend_offset(bytes: &[u8]) -> Result<usize, EmbedError> {
  let mut it = PngRawChunkIter::new(bytes);
  match it.find(|chunk| chunk.type_() == PngChunkType::IEND) {
    Some(iend) => Ok(iend.offset()),
    None => {
      if let super::IterState::Truncated { offset } = it.state() {
        log::debug!("no IEND: chunk stream truncated at byte {offset}");
      } else {
        log::debug!("no IEND: chunk stream ended without one");
      }
      Err(EmbedError::MissingTerminator)
    }
  }
}
