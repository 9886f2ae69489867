#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # Overview
//!
//! `stream` decides which wire stream type describes a file's data bytes.
//! The decision combines the file's [`FileKind`], the [`OptionFlags`] the
//! backup job requested, the [`DataBackend`] that will produce the bytes and
//! the job-wide [`StreamSelector`] settings (legacy naming, compression
//! algorithm, encryption support).
//!
//! # Design
//!
//! Selection is a pure function. Contradictory options are never rejected;
//! they are cleared from the caller's flags and reported through
//! [`Selection::dropped`]. Tag mappings that should be unreachable are kept as
//! explicit [`ConsistencyError`] returns: the selection then carries
//! [`StreamTag::None`] and the failure is logged on the
//! [`logging::targets::STREAM`] target.
//!
//! # Examples
//!
//! ```
//! use stream::{DataBackend, FileKind, OptionFlags, StreamSelector, StreamTag};
//!
//! let mut flags = OptionFlags::NONE.with_sparse().with_encrypt();
//! let selection = StreamSelector::new().select(FileKind::Regular, DataBackend::Portable, &mut flags);
//! # #[cfg(feature = "crypto")]
//! assert_eq!(selection.tag(), StreamTag::EncryptedFileData);
//! assert!(!flags.sparse);
//! ```

mod algorithm;
mod error;
mod flags;
mod kind;
mod selector;
mod tag;

pub use algorithm::{CompressionAlgorithm, CompressionAlgorithmParseError};
pub use error::{ConsistencyError, ParseError};
pub use flags::OptionFlags;
pub use kind::FileKind;
pub use selector::{DataBackend, Selection, StreamSelector, select_stream};
pub use tag::StreamTag;
