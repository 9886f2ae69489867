#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `attribs` turns the extended attribute record of a file into the short
//! printable blob that travels next to the file's portable metadata in a
//! backup, and turns the blob back into the record on restore. The portable
//! part of the metadata (mode, owner, POSIX times) is carried elsewhere; this
//! crate only handles what some platforms keep beyond it: the native
//! attribute record on hosts that have one, and the resource fork length on
//! hosts with forked files.
//!
//! # Design
//!
//! - [`radix64`] encodes individual integers into a growable [`String`].
//! - [`AttributeLayout`] fixes the field order for each platform family.
//! - [`encode`] and [`decode`] walk that order. [`encode`] also picks the
//!   [`AttributeStream`] marker that must accompany the blob.
//!
//! # Invariants
//!
//! - `decode(encode(record, layout).blob, layout) == record` for every record
//!   the layout can represent, including the empty record.
//! - The empty record encodes to the empty blob and the empty blob decodes to
//!   the empty record; neither case is an error.
//! - Field order and count per layout never change.
//!
//! # Errors
//!
//! [`decode`] reports [`DecodeError`]. A [`DecodeError::FieldCount`] is
//! recoverable: restoring a blob written by a richer platform onto a simpler
//! one continues with the portable attributes only.
//!
//! # Examples
//!
//! ```
//! use attribs::{AttributeLayout, AttributeRecord, AttributeStream, decode, encode};
//!
//! let record = AttributeRecord::with_resource_fork(4096);
//! let encoded = encode(&record, AttributeLayout::ResourceFork);
//! assert_eq!(encoded.stream, AttributeStream::UnixAttributes);
//! assert_eq!(encoded.blob, "BAA");
//!
//! let decoded = decode(&encoded.blob, AttributeLayout::ResourceFork).unwrap();
//! assert_eq!(decoded, record);
//! ```

pub mod codec;
mod error;
mod layout;
pub mod radix64;
mod record;

pub use codec::{DecodedAttributes, EncodedAttributes, decode, decode_lenient, encode};
pub use error::DecodeError;
pub use layout::AttributeLayout;
pub use record::{
    AttributeRecord, AttributeStream, FILE_ATTRIBUTE_ARCHIVE, FILE_ATTRIBUTE_DIRECTORY,
    FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NORMAL, FILE_ATTRIBUTE_NOT_CONTENT_INDEXED,
    FILE_ATTRIBUTE_OFFLINE, FILE_ATTRIBUTE_READONLY, FILE_ATTRIBUTE_SYSTEM,
    FILE_ATTRIBUTE_TEMPORARY, NativeAttributes, SETTABLE_ATTRIBUTES, UNIX_EPOCH_TICKS,
    ticks_to_unix, unix_to_ticks,
};
