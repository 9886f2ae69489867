//! Compression algorithms a backup job may request.

use core::fmt;
use core::str::FromStr;

/// Compression algorithms recognised by the selector.
///
/// Only [`CompressionAlgorithm::Gzip`] has a legacy stream form; every other
/// algorithm travels in the generic compressed streams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CompressionAlgorithm {
    /// Classic gzip/deflate compression.
    #[default]
    Gzip,
    /// LZO1X compression.
    Lzo,
    /// Fast LZ compression.
    Lzfast,
    /// LZ4 compression.
    Lz4,
    /// LZ4 high-compression mode.
    Lz4hc,
}

impl CompressionAlgorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Self; 5] = [Self::Gzip, Self::Lzo, Self::Lzfast, Self::Lz4, Self::Lz4hc];

    /// Returns the canonical display name used for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Lzo => "lzo",
            Self::Lzfast => "lzfast",
            Self::Lz4 => "lz4",
            Self::Lz4hc => "lz4hc",
        }
    }

    /// Reports whether the algorithm has a legacy gzip stream form.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Gzip)
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when attempting to parse an unsupported compression algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompressionAlgorithmParseError {
    input: String,
}

impl CompressionAlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CompressionAlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression algorithm: {}", self.input)
    }
}

impl std::error::Error for CompressionAlgorithmParseError {}

impl FromStr for CompressionAlgorithm {
    type Err = CompressionAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gzip" | "zlib" => Ok(Self::Gzip),
            "lzo" | "lzo1x" => Ok(Self::Lzo),
            "lzfast" => Ok(Self::Lzfast),
            "lz4" => Ok(Self::Lz4),
            "lz4hc" => Ok(Self::Lz4hc),
            other => Err(CompressionAlgorithmParseError::new(other)),
        }
    }
}
