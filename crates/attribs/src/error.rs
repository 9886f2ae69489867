//! crates/attribs/src/error.rs
//!
//! Error types for attribute blob decoding.

use thiserror::Error;

use crate::layout::AttributeLayout;

/// Errors produced while decoding an extended attribute blob.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// A field between two separators was empty.
    #[error("empty attribute field")]
    EmptyField,

    /// A field contained a character outside the encoding alphabet.
    #[error("invalid digit '{digit}' at offset {offset}")]
    InvalidDigit {
        /// The rejected character.
        digit: char,
        /// Byte offset of the character within its field.
        offset: usize,
    },

    /// A field encoded a value wider than 64 bits.
    #[error("attribute field '{field}' overflows 64 bits")]
    Overflow {
        /// The offending field text.
        field: String,
    },

    /// A 32-bit field carried a wider value.
    #[error("attribute field {index} value {value} exceeds 32 bits")]
    FieldRange {
        /// Position of the field within the blob.
        index: usize,
        /// The decoded value.
        value: u64,
    },

    /// The blob carried a different number of fields than the layout expects.
    ///
    /// This is recoverable: callers fall back to the portable attribute path.
    #[error("expected {expected} attribute fields for {layout} layout, found {found}")]
    FieldCount {
        /// Layout the blob was decoded against.
        layout: AttributeLayout,
        /// Field count the layout defines.
        expected: usize,
        /// Field count present in the blob.
        found: usize,
    },
}

impl DecodeError {
    /// Reports whether the error is a field-count mismatch rather than a
    /// malformed field.
    #[must_use]
    pub const fn is_field_count(&self) -> bool {
        matches!(self, Self::FieldCount { .. })
    }
}
