use alloc::string::String;

use thiserror::Error;

/// The bytes can't be a PNG at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StructuralError {
  /// Zero bytes were given.
  #[error("empty")]
  Empty,

  /// More bytes than the configured limit were given.
  #[error("too large ({len} bytes, limit is {max})")]
  TooLarge {
    /// Length of the input.
    len: usize,
    /// The limit it was checked against.
    max: usize,
  },

  /// The first 8 bytes aren't the PNG signature (or there's less than 8).
  #[error("bad signature")]
  BadSignature,
}

/// A keyword that isn't allowed as a `tEXt` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum KeywordError {
  /// Keywords must be 1 to 79 bytes.
  #[error("keyword must be 1 to 79 bytes, got {0}")]
  BadLength(usize),

  /// Keywords are Latin-1 printable characters and space only.
  #[error("keyword contains byte {byte:#04x} at index {index}")]
  BadByte {
    /// The byte value.
    byte: u8,
    /// Where it was.
    index: usize,
  },

  /// Leading, trailing, or consecutive spaces.
  #[error("keyword has a leading, trailing, or doubled space")]
  BadSpacing,
}

/// Embedding failed, and no output was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
  /// The source isn't a well formed PNG.
  #[error("source is not a usable PNG: {0}")]
  Structural(#[from] StructuralError),

  /// The chunk stream ended (or was cut short) before an `IEND` chunk.
  #[error("no IEND chunk found")]
  MissingTerminator,

  /// A chunk can hold at most `2^31 - 1` bytes of data.
  #[error("chunk data of {len} bytes exceeds the PNG chunk limit")]
  ChunkTooLarge {
    /// The data length that was attempted.
    len: usize,
  },

  /// The payload value couldn't be turned into text.
  #[error("payload serialization failed: {0}")]
  Serialize(String),
}

/// Why extraction came back empty handed.
///
/// The `Option` returning extraction functions collapse all of these to
/// `None`; this type is for callers that want to log the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ExtractError {
  /// The input isn't a well formed PNG.
  #[error("not a PNG: {0}")]
  Structural(#[from] StructuralError),

  /// The chunk stream was cut short before any match was found.
  #[error("chunk stream truncated at byte {offset}")]
  Truncated {
    /// Offset of the chunk that didn't fit.
    offset: usize,
  },

  /// No text chunk uses the keyword.
  #[error("no metadata chunk present")]
  NotFound,

  /// The matching chunk's text isn't UTF-8.
  #[error("metadata text is not valid UTF-8")]
  InvalidUtf8,

  /// The matching chunk's text isn't valid JSON for the requested type.
  #[error("metadata text is not valid JSON (line {line}, column {column})")]
  Json {
    /// Line of the parse failure.
    line: usize,
    /// Column of the parse failure.
    column: usize,
  },
}
