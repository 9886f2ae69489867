//! Stream type selection.
//!
//! Selection runs a fixed sequence of normalisation steps over the requested
//! [`OptionFlags`]. A step may clear an option but never sets one again, so
//! the flags left behind describe exactly what the data producer must do.

use logging::{targets, trace_stream};
use platform::Capabilities;

use crate::algorithm::CompressionAlgorithm;
use crate::error::ConsistencyError;
use crate::flags::OptionFlags;
use crate::kind::FileKind;
use crate::tag::StreamTag;

/// Which producer writes the file's data bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DataBackend {
    /// Portable reader: plain, sparse or offset-encoded bytes.
    #[default]
    Portable,
    /// Platform-native backup API.
    Native,
}

impl DataBackend {
    /// Picks the backend for a platform. Native platforms may still be asked
    /// for portable data.
    #[must_use]
    pub const fn for_platform(capabilities: &Capabilities, portable_requested: bool) -> Self {
        if capabilities.native_attributes && !portable_requested {
            Self::Native
        } else {
            Self::Portable
        }
    }

    /// Reports whether this is the platform-native producer.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}

/// Outcome of one selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Selection {
    tag: StreamTag,
    dropped: OptionFlags,
    fault: Option<ConsistencyError>,
}

impl Selection {
    /// The selected tag; [`StreamTag::None`] when [`Selection::fault`] is set.
    #[must_use]
    pub const fn tag(&self) -> StreamTag {
        self.tag
    }

    /// Options the selector cleared.
    #[must_use]
    pub const fn dropped(&self) -> OptionFlags {
        self.dropped
    }

    /// The consistency failure, if the selector reached an unmapped tag.
    #[must_use]
    pub const fn fault(&self) -> Option<ConsistencyError> {
        self.fault
    }

    /// Converts into a `Result`, surfacing the consistency failure.
    pub const fn into_result(self) -> Result<StreamTag, ConsistencyError> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.tag),
        }
    }
}

/// Job-wide selection settings.
///
/// ```
/// use stream::{CompressionAlgorithm, DataBackend, FileKind, OptionFlags, StreamSelector, StreamTag};
///
/// let selector = StreamSelector::new()
///     .compatible(true)
///     .algorithm(CompressionAlgorithm::Gzip);
/// let mut flags = OptionFlags::NONE.with_compress();
/// let selection = selector.select(FileKind::Regular, DataBackend::Portable, &mut flags);
/// assert_eq!(selection.tag(), StreamTag::GzipFileData);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StreamSelector {
    compatible: bool,
    algorithm: CompressionAlgorithm,
    encryption_supported: bool,
}

impl Default for StreamSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSelector {
    /// Creates a selector with legacy naming off and the default algorithm.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compatible: false,
            algorithm: CompressionAlgorithm::Gzip,
            encryption_supported: cfg!(feature = "crypto"),
        }
    }

    /// Enables or disables legacy gzip stream naming.
    #[must_use]
    pub const fn compatible(mut self, compatible: bool) -> Self {
        self.compatible = compatible;
        self
    }

    /// Sets the compression algorithm requested by the job.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: CompressionAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Enables or disables encrypted streams. Builds without the `crypto`
    /// feature never encrypt.
    #[must_use]
    pub const fn encryption_supported(mut self, supported: bool) -> Self {
        self.encryption_supported = supported && cfg!(feature = "crypto");
        self
    }

    /// Reports whether legacy naming is enabled.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        self.compatible
    }

    /// The configured compression algorithm.
    #[must_use]
    pub const fn compression_algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Reports whether encrypted streams may be selected.
    #[must_use]
    pub const fn supports_encryption(&self) -> bool {
        self.encryption_supported
    }

    /// Chooses the stream tag for one file, clearing options that cannot apply.
    pub fn select(
        &self,
        kind: FileKind,
        backend: DataBackend,
        flags: &mut OptionFlags,
    ) -> Selection {
        let requested = *flags;

        if kind == FileKind::RestoreObject {
            *flags = OptionFlags::NONE;
            return self.finish(kind, requested, flags, Ok(StreamTag::FileData));
        }

        if flags.encrypt {
            flags.sparse = false;
        }

        let mut tag = if kind == FileKind::ResourceFork {
            flags.sparse = false;
            flags.offsets = false;
            StreamTag::ResourceForkData
        } else if backend.is_native() {
            flags.sparse = false;
            StreamTag::NativeData
        } else if flags.sparse {
            StreamTag::SparseData
        } else {
            StreamTag::FileData
        };
        if flags.offsets {
            tag = StreamTag::SparseData;
        }

        if !matches!(
            tag,
            StreamTag::FileData | StreamTag::NativeData | StreamTag::ResourceForkData
        ) {
            flags.encrypt = false;
        }

        if tag == StreamTag::ResourceForkData {
            flags.compress = false;
        }

        if flags.compress {
            let gzip = self.compatible && self.algorithm.is_legacy();
            match compressed_variant(tag, gzip) {
                Ok(compressed) => tag = compressed,
                Err(fault) => return self.finish(kind, requested, flags, Err(fault)),
            }
        }

        if flags.encrypt {
            if self.encryption_supported {
                match encrypted_variant(tag) {
                    Ok(encrypted) => tag = encrypted,
                    Err(fault) => return self.finish(kind, requested, flags, Err(fault)),
                }
            } else {
                flags.encrypt = false;
            }
        }

        self.finish(kind, requested, flags, Ok(tag))
    }

    fn finish(
        &self,
        kind: FileKind,
        requested: OptionFlags,
        flags: &OptionFlags,
        outcome: Result<StreamTag, ConsistencyError>,
    ) -> Selection {
        let dropped = requested.difference(*flags);
        match outcome {
            Ok(tag) => {
                trace_stream!(
                    kind = %kind,
                    tag = %tag,
                    dropped = %dropped,
                    "selected stream"
                );
                Selection {
                    tag,
                    dropped,
                    fault: None,
                }
            }
            Err(fault) => {
                tracing::error!(
                    target: targets::STREAM,
                    kind = %kind,
                    flags = %flags,
                    compatible = self.compatible,
                    algorithm = %self.algorithm,
                    "internal stream selection error: {fault}"
                );
                Selection {
                    tag: StreamTag::None,
                    dropped,
                    fault: Some(fault),
                }
            }
        }
    }
}

/// Chooses the stream tag for one file with explicit job settings.
///
/// Equivalent to configuring a [`StreamSelector`] and calling
/// [`StreamSelector::select`].
pub fn select_stream(
    kind: FileKind,
    flags: &mut OptionFlags,
    backend: DataBackend,
    compatible: bool,
    algorithm: CompressionAlgorithm,
) -> Selection {
    StreamSelector::new()
        .compatible(compatible)
        .algorithm(algorithm)
        .select(kind, backend, flags)
}

pub(crate) const fn compressed_variant(
    tag: StreamTag,
    gzip: bool,
) -> Result<StreamTag, ConsistencyError> {
    match (tag, gzip) {
        (StreamTag::FileData, true) => Ok(StreamTag::GzipFileData),
        (StreamTag::SparseData, true) => Ok(StreamTag::SparseGzipData),
        (StreamTag::NativeData, true) => Ok(StreamTag::NativeGzipData),
        (StreamTag::FileData, false) => Ok(StreamTag::CompressedFileData),
        (StreamTag::SparseData, false) => Ok(StreamTag::SparseCompressedData),
        (StreamTag::NativeData, false) => Ok(StreamTag::NativeCompressedData),
        _ => Err(ConsistencyError::Compression { tag, gzip }),
    }
}

pub(crate) const fn encrypted_variant(tag: StreamTag) -> Result<StreamTag, ConsistencyError> {
    match tag {
        StreamTag::FileData => Ok(StreamTag::EncryptedFileData),
        StreamTag::NativeData => Ok(StreamTag::EncryptedNativeData),
        StreamTag::GzipFileData => Ok(StreamTag::EncryptedGzipFileData),
        StreamTag::NativeGzipData => Ok(StreamTag::EncryptedNativeGzipData),
        StreamTag::ResourceForkData => Ok(StreamTag::EncryptedResourceForkData),
        StreamTag::CompressedFileData => Ok(StreamTag::EncryptedCompressedFileData),
        StreamTag::NativeCompressedData => Ok(StreamTag::EncryptedNativeCompressedData),
        _ => Err(ConsistencyError::Encryption { tag }),
    }
}
