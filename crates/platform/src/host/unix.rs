#![allow(unsafe_code)]

//! POSIX, BSD and Darwin hosts.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use filetime::{FileTime, set_file_times};
use nix::sys::stat::{Mode, umask};
use rustix::fs::{AtFlags, CWD, chownat};
use rustix::process::{RawGid, RawUid};

use crate::capabilities::{Capabilities, PlatformFamily};
use crate::ops::Platform;

const fn uid_from_raw(raw: RawUid) -> rustix::fs::Uid {
    rustix::fs::Uid::from_raw_unchecked(raw)
}

const fn gid_from_raw(raw: RawGid) -> rustix::fs::Gid {
    rustix::fs::Gid::from_raw_unchecked(raw)
}

/// Filesystem operations of the build target.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostPlatform;

impl HostPlatform {
    /// Creates the host platform handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The family of the build target.
    #[must_use]
    pub const fn family(&self) -> PlatformFamily {
        PlatformFamily::host()
    }
}

impl Platform for HostPlatform {
    fn capabilities(&self) -> Capabilities {
        Capabilities::host()
    }

    fn set_owner(
        &self,
        path: &Path,
        uid: u32,
        gid: u32,
        follow_symlinks: bool,
    ) -> io::Result<()> {
        let flags = if follow_symlinks {
            AtFlags::empty()
        } else {
            AtFlags::SYMLINK_NOFOLLOW
        };
        chownat(
            CWD,
            path,
            Some(uid_from_raw(uid as RawUid)),
            Some(gid_from_raw(gid as RawGid)),
            flags,
        )
        .map_err(io::Error::from)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
    }

    fn set_times(&self, path: &Path, atime: i64, mtime: i64) -> io::Result<()> {
        set_file_times(
            path,
            FileTime::from_unix_time(atime, 0),
            FileTime::from_unix_time(mtime, 0),
        )
    }

    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "tvos",
        target_os = "watchos",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    fn set_flags(&self, path: &Path, flags: u32) -> io::Result<()> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path contains an interior NUL byte",
            )
        })?;
        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let rc = unsafe { libc::chflags(c_path.as_ptr(), flags as _) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn swap_umask(&self, mask: u32) -> u32 {
        u32::from(umask(Mode::from_bits_truncate(mask as libc::mode_t)).bits())
    }

    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "tvos",
        target_os = "watchos"
    ))]
    fn resource_fork_len(&self, path: &Path) -> io::Result<Option<u64>> {
        match fs::metadata(path.join("..namedfork/rsrc")) {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Some(0)),
            Err(error) => Err(error),
        }
    }
}
