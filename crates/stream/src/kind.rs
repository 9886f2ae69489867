//! File kinds that steer stream selection and attribute restore.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/// What kind of object a backup record describes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum FileKind {
    /// Regular file.
    #[default]
    Regular,
    /// Directory.
    Directory,
    /// Device node, FIFO or socket.
    Special,
    /// Symbolic link.
    Symlink,
    /// Placeholder for a file deleted since the previous backup.
    Deleted,
    /// Opaque object produced by a backup plugin.
    RestoreObject,
    /// Resource fork of a file on a forked filesystem.
    ResourceFork,
}

impl FileKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Regular,
        Self::Directory,
        Self::Special,
        Self::Symlink,
        Self::Deleted,
        Self::RestoreObject,
        Self::ResourceFork,
    ];

    /// The canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Directory => "directory",
            Self::Special => "special",
            Self::Symlink => "symlink",
            Self::Deleted => "deleted",
            Self::RestoreObject => "restore-object",
            Self::ResourceFork => "resource-fork",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseError::new("file kind", s))
    }
}
