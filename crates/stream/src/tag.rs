//! Wire stream type tags.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/// Stream type sent ahead of a file's data bytes.
///
/// The numeric codes are part of the backup format and never change.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum StreamTag {
    /// No data stream. Also returned when selection hits an unmapped tag.
    #[default]
    None,
    /// Plain portable file data.
    FileData,
    /// Portable file data compressed with the legacy gzip framing.
    ///
    /// Named `compressed-gzip-file-data` rather than `gzip-file-data`: the
    /// name predates the other gzip tags and is what job logs and catalog
    /// tooling already match on, so it is kept unchanged.
    #[cfg_attr(feature = "serde", serde(rename = "compressed-gzip-file-data"))]
    GzipFileData,
    /// Sparse-map encoded data.
    SparseData,
    /// Sparse-map encoded data, legacy gzip framing.
    SparseGzipData,
    /// Platform-native backup data.
    NativeData,
    /// Platform-native backup data, legacy gzip framing.
    NativeGzipData,
    /// Resource fork contents.
    ResourceForkData,
    /// Encrypted plain file data.
    EncryptedFileData,
    /// Encrypted platform-native data.
    EncryptedNativeData,
    /// Encrypted gzip file data.
    EncryptedGzipFileData,
    /// Encrypted gzip platform-native data.
    EncryptedNativeGzipData,
    /// Encrypted resource fork contents.
    EncryptedResourceForkData,
    /// File data compressed with the configured algorithm.
    CompressedFileData,
    /// Sparse data compressed with the configured algorithm.
    SparseCompressedData,
    /// Platform-native data compressed with the configured algorithm.
    NativeCompressedData,
    /// Encrypted compressed file data.
    EncryptedCompressedFileData,
    /// Encrypted compressed platform-native data.
    EncryptedNativeCompressedData,
}

impl StreamTag {
    /// Every tag, in wire-code order.
    pub const ALL: [Self; 18] = [
        Self::None,
        Self::FileData,
        Self::GzipFileData,
        Self::SparseData,
        Self::SparseGzipData,
        Self::NativeData,
        Self::NativeGzipData,
        Self::ResourceForkData,
        Self::EncryptedFileData,
        Self::EncryptedNativeData,
        Self::EncryptedGzipFileData,
        Self::EncryptedNativeGzipData,
        Self::EncryptedResourceForkData,
        Self::CompressedFileData,
        Self::SparseCompressedData,
        Self::NativeCompressedData,
        Self::EncryptedCompressedFileData,
        Self::EncryptedNativeCompressedData,
    ];

    /// The numeric code written to the wire.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::None => 0,
            Self::FileData => 2,
            Self::GzipFileData => 4,
            Self::SparseData => 6,
            Self::SparseGzipData => 7,
            Self::NativeData => 11,
            Self::NativeGzipData => 12,
            Self::ResourceForkData => 13,
            Self::EncryptedFileData => 20,
            Self::EncryptedNativeData => 21,
            Self::EncryptedGzipFileData => 23,
            Self::EncryptedNativeGzipData => 24,
            Self::EncryptedResourceForkData => 25,
            Self::CompressedFileData => 29,
            Self::SparseCompressedData => 30,
            Self::NativeCompressedData => 31,
            Self::EncryptedCompressedFileData => 32,
            Self::EncryptedNativeCompressedData => 33,
        }
    }

    /// Looks a tag up by wire code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }

    /// The canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FileData => "file-data",
            Self::GzipFileData => "compressed-gzip-file-data",
            Self::SparseData => "sparse-data",
            Self::SparseGzipData => "sparse-gzip-data",
            Self::NativeData => "native-data",
            Self::NativeGzipData => "native-gzip-data",
            Self::ResourceForkData => "resource-fork-data",
            Self::EncryptedFileData => "encrypted-file-data",
            Self::EncryptedNativeData => "encrypted-native-data",
            Self::EncryptedGzipFileData => "encrypted-gzip-file-data",
            Self::EncryptedNativeGzipData => "encrypted-native-gzip-data",
            Self::EncryptedResourceForkData => "encrypted-resource-fork-data",
            Self::CompressedFileData => "compressed-file-data",
            Self::SparseCompressedData => "sparse-compressed-data",
            Self::NativeCompressedData => "native-compressed-data",
            Self::EncryptedCompressedFileData => "encrypted-compressed-file-data",
            Self::EncryptedNativeCompressedData => "encrypted-native-compressed-data",
        }
    }

    /// Reports whether the tag uses the legacy gzip framing.
    #[must_use]
    pub const fn is_gzip(self) -> bool {
        matches!(
            self,
            Self::GzipFileData
                | Self::SparseGzipData
                | Self::NativeGzipData
                | Self::EncryptedGzipFileData
                | Self::EncryptedNativeGzipData
        )
    }

    /// Reports whether the tag uses the generic compressed framing.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::CompressedFileData
                | Self::SparseCompressedData
                | Self::NativeCompressedData
                | Self::EncryptedCompressedFileData
                | Self::EncryptedNativeCompressedData
        )
    }

    /// Reports whether the payload is encrypted.
    #[must_use]
    pub const fn is_encrypted(self) -> bool {
        matches!(
            self,
            Self::EncryptedFileData
                | Self::EncryptedNativeData
                | Self::EncryptedGzipFileData
                | Self::EncryptedNativeGzipData
                | Self::EncryptedResourceForkData
                | Self::EncryptedCompressedFileData
                | Self::EncryptedNativeCompressedData
        )
    }

    /// Reports whether the payload is sparse-map encoded.
    #[must_use]
    pub const fn is_sparse(self) -> bool {
        matches!(
            self,
            Self::SparseData | Self::SparseGzipData | Self::SparseCompressedData
        )
    }

    /// Reports whether the payload was produced by a platform-native backup API.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(
            self,
            Self::NativeData
                | Self::NativeGzipData
                | Self::NativeCompressedData
                | Self::EncryptedNativeData
                | Self::EncryptedNativeGzipData
                | Self::EncryptedNativeCompressedData
        )
    }

    /// Reports whether the tag carries resource fork contents.
    #[must_use]
    pub const fn is_resource_fork(self) -> bool {
        matches!(
            self,
            Self::ResourceForkData | Self::EncryptedResourceForkData
        )
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Ok(code) = wanted.parse::<u32>() {
            return Self::from_code(code).ok_or_else(|| ParseError::new("stream tag", s));
        }
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == wanted)
            .ok_or_else(|| ParseError::new("stream tag", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_and_names_are_unique() {
        let codes: HashSet<u32> = StreamTag::ALL.iter().map(|tag| tag.code()).collect();
        let names: HashSet<&str> = StreamTag::ALL.iter().map(|tag| tag.name()).collect();
        assert_eq!(codes.len(), StreamTag::ALL.len());
        assert_eq!(names.len(), StreamTag::ALL.len());
    }

    #[test]
    fn codes_match_the_backup_format() {
        assert_eq!(StreamTag::None.code(), 0);
        assert_eq!(StreamTag::FileData.code(), 2);
        assert_eq!(StreamTag::GzipFileData.code(), 4);
        assert_eq!(StreamTag::SparseData.code(), 6);
        assert_eq!(StreamTag::ResourceForkData.code(), 13);
        assert_eq!(StreamTag::EncryptedNativeCompressedData.code(), 33);
        assert_eq!(StreamTag::from_code(29), Some(StreamTag::CompressedFileData));
        assert_eq!(StreamTag::from_code(1), None);
    }

    #[test]
    fn parse_accepts_names_and_codes() {
        assert_eq!(
            "compressed-gzip-file-data".parse::<StreamTag>().unwrap(),
            StreamTag::GzipFileData
        );
        assert_eq!(" 20 ".parse::<StreamTag>().unwrap(), StreamTag::EncryptedFileData);
        let err = "gzip".parse::<StreamTag>().expect_err("unknown");
        assert_eq!(err.input(), "gzip");
    }

    #[test]
    fn plain_gzip_keeps_established_name() {
        assert_eq!(StreamTag::GzipFileData.name(), "compressed-gzip-file-data");
        assert_eq!(StreamTag::SparseGzipData.name(), "sparse-gzip-data");
        assert_eq!(StreamTag::NativeGzipData.name(), "native-gzip-data");
    }

    #[test]
    fn gzip_and_compressed_are_disjoint() {
        for tag in StreamTag::ALL {
            assert!(!(tag.is_gzip() && tag.is_compressed()), "{tag}");
            assert_eq!(tag.is_gzip(), tag.name().contains("gzip"), "{tag}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_canonical_names() {
        for tag in StreamTag::ALL {
            let json = serde_json::to_string(&tag).expect("serialize");
            assert_eq!(json, format!("\"{}\"", tag.name()));
        }
    }
}
