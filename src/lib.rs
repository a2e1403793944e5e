#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for tucking text metadata into PNG files.
//!
//! The metadata lives in an ordinary `tEXt` chunk under a reserved keyword,
//! inserted just before the `IEND` chunk. Nothing else about the PNG is
//! touched: no pixel data is ever decoded or re-encoded, so every other byte
//! of the file comes back out exactly as it went in.
//!
//! ```no_run
//! let png: &[u8] = unimplemented!("data from somewhere");
//! let tagged = inscribe::embed_text(png, r#"{"version":1}"#).unwrap();
//! assert_eq!(inscribe::extract_text(&tagged), Some(r#"{"version":1}"#));
//! ```
//!
//! Embedding is strict: if the source isn't a well formed PNG you get an
//! error rather than a file that silently lacks the metadata. Extraction is
//! forgiving: anything that goes wrong just means "no metadata here".

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod int_endian;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod png;

mod metadata;
pub use metadata::*;
