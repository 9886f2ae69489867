//! Field layouts used by each platform family.

use core::fmt;

/// Order and count of the fields a platform family writes into the blob.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AttributeLayout {
    /// POSIX hosts: no extended fields at all.
    Portable,
    /// Hosts with a native attribute record: attribute bits, creation time,
    /// last-access time, last-write time, size-high, size-low.
    Native,
    /// Hosts with forked files: the resource fork length only.
    ResourceFork,
}

impl AttributeLayout {
    /// Number of fields a complete record occupies in this layout.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            Self::Portable => 0,
            Self::Native => 6,
            Self::ResourceFork => 1,
        }
    }

    /// Canonical lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Native => "native",
            Self::ResourceFork => "resource-fork",
        }
    }
}

impl fmt::Display for AttributeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
