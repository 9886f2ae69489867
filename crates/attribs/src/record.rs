//! crates/attribs/src/record.rs
//!
//! In-memory form of the extended attribute record.

use core::fmt;

/// Read-only file.
pub const FILE_ATTRIBUTE_READONLY: u32 = 0x0001;
/// Hidden file.
pub const FILE_ATTRIBUTE_HIDDEN: u32 = 0x0002;
/// Operating-system file.
pub const FILE_ATTRIBUTE_SYSTEM: u32 = 0x0004;
/// Directory entry.
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x0010;
/// Archive bit.
pub const FILE_ATTRIBUTE_ARCHIVE: u32 = 0x0020;
/// No other attributes set.
pub const FILE_ATTRIBUTE_NORMAL: u32 = 0x0080;
/// Temporary file.
pub const FILE_ATTRIBUTE_TEMPORARY: u32 = 0x0100;
/// Data is not immediately available.
pub const FILE_ATTRIBUTE_OFFLINE: u32 = 0x1000;
/// Excluded from content indexing.
pub const FILE_ATTRIBUTE_NOT_CONTENT_INDEXED: u32 = 0x2000;

/// Attribute bits that may be written back with a plain attribute update.
pub const SETTABLE_ATTRIBUTES: u32 = FILE_ATTRIBUTE_ARCHIVE
    | FILE_ATTRIBUTE_HIDDEN
    | FILE_ATTRIBUTE_NORMAL
    | FILE_ATTRIBUTE_NOT_CONTENT_INDEXED
    | FILE_ATTRIBUTE_OFFLINE
    | FILE_ATTRIBUTE_READONLY
    | FILE_ATTRIBUTE_SYSTEM
    | FILE_ATTRIBUTE_TEMPORARY;

/// Difference between the native file-time epoch (1601-01-01) and the Unix
/// epoch, in 100 ns ticks.
pub const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

/// Wire tag that accompanies the attribute record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AttributeStream {
    /// Portable attributes, optionally followed by non-native extra fields.
    #[default]
    UnixAttributes,
    /// Portable attributes followed by the native attribute record.
    UnixAttributesEx,
}

impl AttributeStream {
    /// Numeric stream identifier used on the wire.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::UnixAttributes => 1,
            Self::UnixAttributesEx => 5,
        }
    }

    /// Looks up a stream by its wire identifier.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::UnixAttributes),
            5 => Some(Self::UnixAttributesEx),
            _ => None,
        }
    }

    /// Reports whether this is the extended marker.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::UnixAttributesEx)
    }
}

impl fmt::Display for AttributeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnixAttributes => "unix-attributes",
            Self::UnixAttributesEx => "unix-attributes-ex",
        })
    }
}

/// Native attribute record as captured on hosts that keep one.
///
/// Times are expressed in 100 ns ticks since 1601-01-01.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeAttributes {
    /// Attribute bit set.
    pub attributes: u32,
    /// Creation time.
    pub creation_time: u64,
    /// Last-access time.
    pub last_access_time: u64,
    /// Last-write time.
    pub last_write_time: u64,
    /// High 32 bits of the file size.
    pub size_high: u32,
    /// Low 32 bits of the file size.
    pub size_low: u32,
}

impl NativeAttributes {
    /// Combined 64-bit file size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        ((self.size_high as u64) << 32) | self.size_low as u64
    }

    /// Stores a 64-bit size into the high/low halves.
    pub const fn set_size(&mut self, size: u64) {
        self.size_high = (size >> 32) as u32;
        self.size_low = size as u32;
    }

    /// The attribute bits that may be written back on restore.
    #[must_use]
    pub const fn settable_attributes(&self) -> u32 {
        self.attributes & SETTABLE_ATTRIBUTES
    }

    /// Reports whether the record describes a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.attributes & FILE_ATTRIBUTE_DIRECTORY != 0
    }
}

/// Converts a native file time to seconds and nanoseconds since the Unix
/// epoch. Times before 1970 yield negative seconds.
#[must_use]
pub const fn ticks_to_unix(ticks: u64) -> (i64, u32) {
    let relative = ticks as i128 - UNIX_EPOCH_TICKS as i128;
    let seconds = relative.div_euclid(10_000_000);
    let nanos = relative.rem_euclid(10_000_000) * 100;
    (seconds as i64, nanos as u32)
}

/// Converts Unix seconds and nanoseconds to a native file time, saturating
/// at the representable range.
#[must_use]
pub const fn unix_to_ticks(seconds: i64, nanos: u32) -> u64 {
    let ticks = seconds as i128 * 10_000_000 + (nanos / 100) as i128 + UNIX_EPOCH_TICKS as i128;
    if ticks < 0 {
        0
    } else if ticks > u64::MAX as i128 {
        u64::MAX
    } else {
        ticks as u64
    }
}

/// Extended attribute record for a single file.
///
/// Fields the source platform does not track stay `None`; a record with
/// every field absent is the "no extended attributes" case.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeRecord {
    /// Native attribute record, when the source kept one.
    pub native: Option<NativeAttributes>,
    /// Length of the resource fork, when the source had forked files.
    pub resource_fork_length: Option<u64>,
}

impl AttributeRecord {
    /// A record carrying only native attributes.
    #[must_use]
    pub const fn with_native(native: NativeAttributes) -> Self {
        Self {
            native: Some(native),
            resource_fork_length: None,
        }
    }

    /// A record carrying only a resource fork length.
    #[must_use]
    pub const fn with_resource_fork(length: u64) -> Self {
        Self {
            native: None,
            resource_fork_length: Some(length),
        }
    }

    /// Reports whether no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.native.is_none() && self.resource_fork_length.is_none()
    }
}
