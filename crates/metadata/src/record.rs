//! Per-file attribute state handed to the applicator.

use std::path::{Path, PathBuf};

use attribs::{AttributeStream, EncodedAttributes};
use stream::{FileKind, StreamTag};

/// File-type mask of a POSIX mode.
pub const S_IFMT: u32 = 0o170_000;
/// File-type bits of a socket.
pub const S_IFSOCK: u32 = 0o140_000;

/// POSIX attributes recorded at backup time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct StatRecord {
    /// Full mode, file-type bits included.
    pub mode: u32,
    /// Owner.
    pub uid: u32,
    /// Group.
    pub gid: u32,
    /// Access time, seconds since the Unix epoch.
    pub atime: i64,
    /// Modification time, seconds since the Unix epoch.
    pub mtime: i64,
    /// Size in bytes.
    pub size: u64,
    /// User-settable file flags.
    pub flags: u32,
}

impl StatRecord {
    /// Reports whether the mode describes a socket.
    #[must_use]
    pub const fn is_socket(&self) -> bool {
        self.mode & S_IFMT == S_IFSOCK
    }

    /// Captures the attributes of an existing file without following a
    /// final symbolic link.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            mode: metadata.mode(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            atime: metadata.atime(),
            mtime: metadata.mtime(),
            size: metadata.size(),
            flags: file_flags(metadata),
        }
    }
}

#[cfg(target_os = "macos")]
fn file_flags(metadata: &std::fs::Metadata) -> u32 {
    std::os::macos::fs::MetadataExt::st_flags(metadata)
}

#[cfg(target_os = "freebsd")]
fn file_flags(metadata: &std::fs::Metadata) -> u32 {
    std::os::freebsd::fs::MetadataExt::st_flags(metadata)
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "freebsd"))))]
const fn file_flags(_metadata: &std::fs::Metadata) -> u32 {
    0
}

/// Everything the applicator needs to restore one file's attributes.
///
/// The output path is consumed by [`AttributeApplicator::apply`], on success
/// and failure alike.
///
/// [`AttributeApplicator::apply`]: crate::AttributeApplicator::apply
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RestoreAttributes {
    /// Kind of the restored object.
    pub kind: FileKind,
    /// POSIX attributes.
    pub stat: StatRecord,
    /// Stream tag that accompanied the extended blob.
    pub attribute_stream: AttributeStream,
    /// Stream tag the file's data bytes were written with.
    pub data_stream: StreamTag,
    /// Encoded extended attributes.
    pub extended: String,
    output_path: Option<PathBuf>,
}

impl RestoreAttributes {
    /// Creates a record for `path` with default attributes.
    pub fn new(kind: FileKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            output_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sets the POSIX attributes.
    #[must_use]
    pub const fn with_stat(mut self, stat: StatRecord) -> Self {
        self.stat = stat;
        self
    }

    /// Sets the extended blob and its stream tag.
    #[must_use]
    pub fn with_extended(mut self, encoded: EncodedAttributes) -> Self {
        self.attribute_stream = encoded.stream;
        self.extended = encoded.blob;
        self
    }

    /// Sets the data stream tag.
    #[must_use]
    pub const fn with_data_stream(mut self, tag: StreamTag) -> Self {
        self.data_stream = tag;
        self
    }

    /// The output path, until it is consumed.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Takes the output path, leaving the record consumed.
    pub fn take_output_path(&mut self) -> Option<PathBuf> {
        self.output_path.take()
    }

    /// Reports whether the output path was consumed.
    pub const fn is_consumed(&self) -> bool {
        self.output_path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_detection_uses_type_bits_only() {
        let socket = StatRecord {
            mode: S_IFSOCK | 0o755,
            ..StatRecord::default()
        };
        let fifo = StatRecord {
            mode: 0o010_644,
            ..StatRecord::default()
        };
        assert!(socket.is_socket());
        assert!(!fifo.is_socket());
    }

    #[test]
    fn output_path_is_taken_once() {
        let mut attrs = RestoreAttributes::new(FileKind::Regular, "/restore/a");
        assert_eq!(attrs.output_path(), Some(Path::new("/restore/a")));
        assert_eq!(attrs.take_output_path(), Some(PathBuf::from("/restore/a")));
        assert!(attrs.is_consumed());
        assert_eq!(attrs.take_output_path(), None);
    }

    #[test]
    fn extended_blob_carries_its_stream() {
        let encoded = EncodedAttributes {
            stream: AttributeStream::UnixAttributesEx,
            blob: "A A A A A A".to_owned(),
        };
        let attrs = RestoreAttributes::new(FileKind::Regular, "x").with_extended(encoded);
        assert!(attrs.attribute_stream.is_extended());
        assert_eq!(attrs.extended, "A A A A A A");
    }

    #[cfg(unix)]
    #[test]
    fn from_metadata_reads_mode_and_size() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("file");
        std::fs::write(&path, b"12345").expect("write");

        let stat = StatRecord::from_metadata(&std::fs::metadata(&path).expect("metadata"));
        assert_eq!(stat.size, 5);
        assert_eq!(stat.mode & S_IFMT, 0o100_000);
    }
}
