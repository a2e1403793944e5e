use alloc::vec::Vec;

use crate::png::{
  find_iend_offset, text_chunk_data_len, validate, write_text_chunk, IterState, Keyword, PngRawChunkIter,
  TextChunk, DEFAULT_MAX_SIZE_BYTES,
};
use crate::{EmbedError, ExtractError};

/// The keyword this crate uses for its own `tEXt` chunk unless told
/// otherwise.
pub const DEFAULT_KEYWORD: &str = "persona";

/// Embeds and extracts one kind of metadata, identified by a keyword.
///
/// The [`Default`] codec uses [`DEFAULT_KEYWORD`] and
/// [`DEFAULT_MAX_SIZE_BYTES`].
///
/// A codec holds no state between calls, so one value can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataCodec<'k> {
  keyword: Keyword<'k>,
  max_size_bytes: usize,
}
impl Default for MetadataCodec<'static> {
  #[inline]
  fn default() -> Self {
    Self::DEFAULT
  }
}
impl MetadataCodec<'static> {
  /// The default codec, usable in `const` contexts.
  pub const DEFAULT: Self = match Keyword::new(DEFAULT_KEYWORD.as_bytes()) {
    Ok(keyword) => Self { keyword, max_size_bytes: DEFAULT_MAX_SIZE_BYTES },
    Err(_) => panic!("DEFAULT_KEYWORD is not a legal tEXt keyword"),
  };
}
impl<'k> MetadataCodec<'k> {
  /// Uses a different keyword, keeping the size limit.
  #[inline]
  #[must_use]
  pub const fn with_keyword<'n>(self, keyword: Keyword<'n>) -> MetadataCodec<'n> {
    MetadataCodec { keyword, max_size_bytes: self.max_size_bytes }
  }
  /// Uses a different input size limit, keeping the keyword.
  #[inline]
  #[must_use]
  pub const fn with_max_size_bytes(self, max_size_bytes: usize) -> Self {
    Self { max_size_bytes, ..self }
  }
  /// The keyword that marks this codec's chunk.
  #[inline]
  #[must_use]
  pub const fn keyword(&self) -> Keyword<'k> {
    self.keyword
  }
  /// The largest input, in bytes, that will be accepted.
  #[inline]
  #[must_use]
  pub const fn max_size_bytes(&self) -> usize {
    self.max_size_bytes
  }

  /// Gets the text of the first `tEXt` chunk that uses this codec's keyword.
  ///
  /// Only the first matching chunk is ever looked at. If its text isn't
  /// UTF-8 the result is an error, even when a later chunk would have been
  /// fine. Chunks after `IEND` are trailing data, not part of the PNG, and
  /// are never looked at.
  pub fn try_extract_text<'b>(&self, bytes: &'b [u8]) -> Result<&'b str, ExtractError> {
    validate(bytes, self.max_size_bytes)?;
    let mut it = PngRawChunkIter::new(bytes).until_iend();
    let found = it
      .by_ref()
      .filter_map(|raw| TextChunk::from_raw(&raw))
      .find(|text| text.keyword == self.keyword.as_bytes());
    match found {
      Some(TextChunk { text, .. }) => {
        core::str::from_utf8(text).map_err(|_| ExtractError::InvalidUtf8)
      }
      None => match it.state() {
        IterState::Truncated { offset } => Err(ExtractError::Truncated { offset }),
        _ => Err(ExtractError::NotFound),
      },
    }
  }

  /// Like [`try_extract_text`](Self::try_extract_text), but any failure is
  /// just `None`.
  #[inline]
  #[must_use]
  pub fn extract_text<'b>(&self, bytes: &'b [u8]) -> Option<&'b str> {
    self.try_extract_text(bytes).map_err(|e| log_extract_failure(&e)).ok()
  }

  /// Makes a new PNG with a `tEXt` chunk holding `text` added just before
  /// the `IEND` chunk.
  ///
  /// All other bytes are copied over unchanged. If the PNG already has a
  /// chunk with this keyword, it stays, and the new chunk goes after it.
  /// Since extraction takes the first match, the *old* text is what
  /// extraction will keep finding. Use [`strip`](Self::strip) first if you
  /// want to replace it.
  ///
  /// ## Failure
  /// * [`EmbedError::Structural`] if `bytes` fails [`validate`].
  /// * [`EmbedError::MissingTerminator`] if there's no `IEND` chunk.
  /// * [`EmbedError::ChunkTooLarge`] if the text can't fit in one chunk.
  pub fn embed_text(&self, bytes: &[u8], text: &str) -> Result<Vec<u8>, EmbedError> {
    validate(bytes, self.max_size_bytes)?;
    let iend = find_iend_offset(bytes)?;
    let data_len = text_chunk_data_len(self.keyword, text.len())?;
    let (head, tail) = bytes.split_at(iend);
    let mut out = Vec::with_capacity(bytes.len() + 12 + data_len as usize);
    out.extend_from_slice(head);
    write_text_chunk(&mut out, self.keyword, text.as_bytes())?;
    out.extend_from_slice(tail);
    log::debug!(
      "embedded {} bytes of text at offset {iend}, {} -> {} bytes",
      text.len(),
      bytes.len(),
      out.len()
    );
    Ok(out)
  }

  /// Makes a new PNG with every `tEXt` chunk that uses this codec's keyword
  /// removed.
  ///
  /// Every other chunk is copied over unchanged. Anything after `IEND` is
  /// trailing data, so it's copied over unchanged too.
  /// A PNG with no such chunks comes back as an identical copy.
  ///
  /// ## Failure
  /// * [`EmbedError::Structural`] if `bytes` fails [`validate`].
  /// * [`EmbedError::MissingTerminator`] if there's no `IEND` chunk.
  pub fn strip(&self, bytes: &[u8]) -> Result<Vec<u8>, EmbedError> {
    validate(bytes, self.max_size_bytes)?;
    let mut out = Vec::with_capacity(bytes.len());
    let mut copied_to = 0;
    let mut it = PngRawChunkIter::new(bytes).until_iend();
    for raw in it.by_ref() {
      if TextChunk::from_raw(&raw).is_some_and(|t| t.keyword == self.keyword.as_bytes()) {
        out.extend_from_slice(&bytes[copied_to..raw.offset()]);
        copied_to = raw.end_offset();
      }
    }
    if !it.seen_iend() {
      return Err(EmbedError::MissingTerminator);
    }
    out.extend_from_slice(&bytes[copied_to..]);
    log::debug!("stripped {} bytes of metadata", bytes.len() - out.len());
    Ok(out)
  }
}

#[cfg(feature = "json")]
impl MetadataCodec<'_> {
  /// Extracts the first matching chunk's text and parses it as JSON.
  ///
  /// As with [`try_extract_text`](Self::try_extract_text), only the first
  /// chunk with the keyword is considered.
  #[cfg_attr(docs_rs, doc(cfg(feature = "json")))]
  pub fn try_extract<T: serde::de::DeserializeOwned>(
    &self, bytes: &[u8],
  ) -> Result<T, ExtractError> {
    let text = self.try_extract_text(bytes)?;
    serde_json::from_str(text)
      .map_err(|e| ExtractError::Json { line: e.line(), column: e.column() })
  }

  /// Like [`try_extract`](Self::try_extract), but any failure is just `None`.
  #[cfg_attr(docs_rs, doc(cfg(feature = "json")))]
  #[inline]
  #[must_use]
  pub fn extract<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Option<T> {
    self.try_extract(bytes).map_err(|e| log_extract_failure(&e)).ok()
  }

  /// Serializes `value` as JSON and embeds it with
  /// [`embed_text`](Self::embed_text).
  ///
  /// ## Failure
  /// * [`EmbedError::Serialize`] if `value` can't be written as JSON.
  /// * Anything [`embed_text`](Self::embed_text) can fail with.
  #[cfg_attr(docs_rs, doc(cfg(feature = "json")))]
  pub fn embed<T: serde::Serialize + ?Sized>(
    &self, bytes: &[u8], value: &T,
  ) -> Result<Vec<u8>, EmbedError> {
    use alloc::string::ToString;
    let text = serde_json::to_string(value).map_err(|e| EmbedError::Serialize(e.to_string()))?;
    self.embed_text(bytes, &text)
  }
}

/// Not finding metadata is routine. A matching chunk that won't decode is
/// worth a warning.
fn log_extract_failure(e: &ExtractError) {
  match e {
    ExtractError::InvalidUtf8 | ExtractError::Json { .. } => {
      log::warn!("metadata chunk unusable: {e}")
    }
    _ => log::trace!("no metadata: {e}"),
  }
}

/// [`MetadataCodec::extract_text`] with the default codec.
#[inline]
#[must_use]
pub fn extract_text(bytes: &[u8]) -> Option<&str> {
  MetadataCodec::DEFAULT.extract_text(bytes)
}

/// [`MetadataCodec::embed_text`] with the default codec.
#[inline]
pub fn embed_text(bytes: &[u8], text: &str) -> Result<Vec<u8>, EmbedError> {
  MetadataCodec::DEFAULT.embed_text(bytes, text)
}

/// [`MetadataCodec::extract`] with the default codec.
#[cfg(feature = "json")]
#[cfg_attr(docs_rs, doc(cfg(feature = "json")))]
#[inline]
#[must_use]
pub fn extract<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Option<T> {
  MetadataCodec::DEFAULT.extract(bytes)
}

/// [`MetadataCodec::embed`] with the default codec.
#[cfg(feature = "json")]
#[cfg_attr(docs_rs, doc(cfg(feature = "json")))]
#[inline]
pub fn embed<T: serde::Serialize + ?Sized>(bytes: &[u8], value: &T) -> Result<Vec<u8>, EmbedError> {
  MetadataCodec::DEFAULT.embed(bytes, value)
}
