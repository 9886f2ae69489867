//! crates/platform/src/capabilities.rs
//!
//! Capability set describing what a platform family can restore.

use attribs::AttributeLayout;

/// Platform families with distinct attribute handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlatformFamily {
    /// Linux and other POSIX systems without user-settable file flags.
    Posix,
    /// BSD systems with `chflags`.
    Bsd,
    /// Apple systems: `chflags` plus resource forks.
    Darwin,
    /// Windows: native attribute records and native backup data.
    Windows,
}

impl PlatformFamily {
    /// The family of the build target.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos"
        )) {
            Self::Darwin
        } else if cfg!(any(
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd",
            target_os = "dragonfly"
        )) {
            Self::Bsd
        } else {
            Self::Posix
        }
    }

    /// Capabilities every member of the family shares.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Posix => Capabilities::PORTABLE,
            Self::Bsd => Capabilities {
                file_flags: true,
                ..Capabilities::PORTABLE
            },
            Self::Darwin => Capabilities {
                file_flags: true,
                resource_fork: true,
                ..Capabilities::PORTABLE
            },
            Self::Windows => Capabilities {
                native_attributes: true,
                ..Capabilities::PORTABLE
            },
        }
    }
}

/// What a platform can capture and restore beyond the portable attributes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Capabilities {
    /// The platform keeps a native attribute record and native backup data.
    pub native_attributes: bool,
    /// The platform supports user-settable file flags.
    pub file_flags: bool,
    /// The platform supports resource forks.
    pub resource_fork: bool,
}

impl Capabilities {
    /// A platform with nothing beyond the portable attributes.
    pub const PORTABLE: Self = Self {
        native_attributes: false,
        file_flags: false,
        resource_fork: false,
    };

    /// Capabilities of the build target.
    #[must_use]
    pub const fn host() -> Self {
        PlatformFamily::host().capabilities()
    }

    /// The attribute blob layout this platform reads and writes.
    #[must_use]
    pub const fn attribute_layout(self) -> AttributeLayout {
        if self.native_attributes {
            AttributeLayout::Native
        } else if self.resource_fork {
            AttributeLayout::ResourceFork
        } else {
            AttributeLayout::Portable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_map_to_expected_layouts() {
        assert_eq!(
            PlatformFamily::Posix.capabilities().attribute_layout(),
            AttributeLayout::Portable
        );
        assert_eq!(
            PlatformFamily::Bsd.capabilities().attribute_layout(),
            AttributeLayout::Portable
        );
        assert_eq!(
            PlatformFamily::Darwin.capabilities().attribute_layout(),
            AttributeLayout::ResourceFork
        );
        assert_eq!(
            PlatformFamily::Windows.capabilities().attribute_layout(),
            AttributeLayout::Native
        );
    }

    #[test]
    fn only_bsd_and_darwin_have_flags() {
        assert!(!PlatformFamily::Posix.capabilities().file_flags);
        assert!(PlatformFamily::Bsd.capabilities().file_flags);
        assert!(PlatformFamily::Darwin.capabilities().file_flags);
        assert!(!PlatformFamily::Windows.capabilities().file_flags);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_host_is_portable() {
        assert_eq!(PlatformFamily::host(), PlatformFamily::Posix);
        assert_eq!(Capabilities::host(), Capabilities::PORTABLE);
    }
}
