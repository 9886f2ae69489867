use thiserror::Error;

use crate::tag::StreamTag;

const fn framing(gzip: &bool) -> &'static str {
    if *gzip { "gzip" } else { "compressed" }
}

/// A flag combination survived normalisation into a tag with no mapping.
///
/// Selection never produces this for inputs that went through the earlier
/// normalisation steps; seeing one means the selector itself is wrong.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConsistencyError {
    /// Compression was still requested for a tag without a compressed form.
    #[error("no {} variant of stream {tag}", framing(.gzip))]
    Compression {
        /// Tag at the point of failure.
        tag: StreamTag,
        /// Whether the legacy gzip form was wanted.
        gzip: bool,
    },
    /// Encryption was still requested for a tag without an encrypted form.
    #[error("no encrypted variant of stream {tag}")]
    Encryption {
        /// Tag at the point of failure.
        tag: StreamTag,
    },
}

impl ConsistencyError {
    /// The tag that could not be mapped.
    #[must_use]
    pub const fn tag(&self) -> StreamTag {
        match self {
            Self::Compression { tag, .. } | Self::Encryption { tag } => *tag,
        }
    }
}

/// Error returned when a name does not match any known value.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unsupported {what}: {input}")]
pub struct ParseError {
    what: &'static str,
    input: String,
}

impl ParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(what: &'static str, input: impl Into<String>) -> Self {
        Self {
            what,
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
