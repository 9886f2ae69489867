//! crates/attribs/src/codec.rs
//!
//! Encoding and decoding of the extended attribute blob.
//!
//! # Wire Format
//!
//! The blob is a single ASCII string. Fields are [`radix64`](crate::radix64)
//! integers separated by one space, in the order defined by the
//! [`AttributeLayout`] of the writing host:
//!
//! ```text
//! native:        <attributes> <created> <accessed> <written> <size-high> <size-low>
//! resource-fork: <fork-length>
//! portable:      (empty)
//! ```
//!
//! The order and count of fields are part of the backup format and must not
//! change: archives written by older agents have to stay restorable.

use crate::error::DecodeError;
use crate::layout::AttributeLayout;
use crate::radix64::{decode_u64, encode_i64_into};
use crate::record::{AttributeRecord, AttributeStream, NativeAttributes};

/// Field separator inside the blob.
pub const SEPARATOR: char = ' ';

/// Blob and accompanying stream tag produced by [`encode`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedAttributes {
    /// Stream tag to send with the blob.
    pub stream: AttributeStream,
    /// The printable blob itself.
    pub blob: String,
}

impl EncodedAttributes {
    /// The "no extended attributes" value.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stream: AttributeStream::UnixAttributes,
            blob: String::new(),
        }
    }
}

struct FieldWriter {
    out: String,
}

impl FieldWriter {
    const fn new() -> Self {
        Self { out: String::new() }
    }

    fn push(&mut self, value: u64) {
        if !self.out.is_empty() {
            self.out.push(SEPARATOR);
        }
        encode_i64_into(value as i64, &mut self.out);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Encodes `record` in the field order of `layout`.
///
/// Only fields the layout defines are written; a record with none of them
/// present yields an empty blob. The extended stream marker is returned only
/// when the native field set was written.
#[must_use]
pub fn encode(record: &AttributeRecord, layout: AttributeLayout) -> EncodedAttributes {
    let mut writer = FieldWriter::new();
    let mut stream = AttributeStream::UnixAttributes;

    match layout {
        AttributeLayout::Portable => {}
        AttributeLayout::Native => {
            if let Some(native) = &record.native {
                writer.push(u64::from(native.attributes));
                writer.push(native.creation_time);
                writer.push(native.last_access_time);
                writer.push(native.last_write_time);
                writer.push(u64::from(native.size_high));
                writer.push(u64::from(native.size_low));
                stream = AttributeStream::UnixAttributesEx;
            }
        }
        AttributeLayout::ResourceFork => {
            if let Some(length) = record.resource_fork_length {
                writer.push(length);
            }
        }
    }

    EncodedAttributes {
        stream,
        blob: writer.finish(),
    }
}

/// Splits a blob into its fields and decodes each one.
pub fn decode_fields(blob: &str) -> Result<Vec<u64>, DecodeError> {
    if blob.is_empty() {
        return Ok(Vec::new());
    }
    blob.split(SEPARATOR).map(decode_u64).collect()
}

/// Decodes `blob` using the field order of `layout`.
///
/// An empty blob decodes to the empty record. A blob whose field count
/// differs from what the layout defines returns
/// [`DecodeError::FieldCount`]; use [`decode_lenient`] to keep the fields
/// that were present. Hosts using the portable layout never read extended
/// fields, so any content is ignored there.
pub fn decode(blob: &str, layout: AttributeLayout) -> Result<AttributeRecord, DecodeError> {
    let decoded = decode_lenient(blob, layout)?;
    match decoded.mismatch {
        Some(mismatch) => Err(mismatch),
        None => Ok(decoded.record),
    }
}

/// Result of [`decode_lenient`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodedAttributes {
    /// Fields recovered from the blob.
    pub record: AttributeRecord,
    /// Set when the blob carried a different number of fields than the
    /// layout defines.
    pub mismatch: Option<DecodeError>,
}

/// Decodes `blob`, keeping whatever the leading fields provide when the
/// field count does not match `layout`.
///
/// Surplus trailing fields are ignored. A blob too short for the layout
/// yields the empty record. Malformed fields are still errors.
pub fn decode_lenient(
    blob: &str,
    layout: AttributeLayout,
) -> Result<DecodedAttributes, DecodeError> {
    if blob.is_empty() {
        return Ok(DecodedAttributes::default());
    }

    if layout == AttributeLayout::Portable {
        logging::trace_attribs!(
            len = blob.len(),
            "ignoring extended attribute fields on portable host"
        );
        return Ok(DecodedAttributes::default());
    }

    let fields = decode_fields(blob)?;
    let expected = layout.field_count();
    let mismatch = (fields.len() != expected).then_some(DecodeError::FieldCount {
        layout,
        expected,
        found: fields.len(),
    });

    let record = match (layout, fields.get(..expected)) {
        (
            AttributeLayout::Native,
            Some(
                &[
                    attributes,
                    creation_time,
                    last_access_time,
                    last_write_time,
                    size_high,
                    size_low,
                ],
            ),
        ) => AttributeRecord::with_native(NativeAttributes {
            attributes: narrow(0, attributes)?,
            creation_time,
            last_access_time,
            last_write_time,
            size_high: narrow(4, size_high)?,
            size_low: narrow(5, size_low)?,
        }),
        (AttributeLayout::ResourceFork, Some(&[length])) => {
            AttributeRecord::with_resource_fork(length)
        }
        _ => AttributeRecord::default(),
    };

    if let Some(mismatch) = &mismatch {
        logging::trace_attribs!(recovered = !record.is_empty(), "{mismatch}");
    }

    Ok(DecodedAttributes { record, mismatch })
}

fn narrow(index: usize, value: u64) -> Result<u32, DecodeError> {
    u32::try_from(value).map_err(|_| DecodeError::FieldRange { index, value })
}
