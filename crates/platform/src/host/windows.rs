#![allow(unsafe_code)]

//! Windows hosts.

use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::os::windows::fs::{FileTimesExt, MetadataExt, OpenOptionsExt};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use attribs::{FILE_ATTRIBUTE_NORMAL, NativeAttributes, ticks_to_unix};
use filetime::{FileTime, set_file_times};
use windows::Win32::Storage::FileSystem::{
    FILE_FLAG_BACKUP_SEMANTICS, FILE_FLAGS_AND_ATTRIBUTES, SetFileAttributesW,
};
use windows::core::HSTRING;

use crate::capabilities::{Capabilities, PlatformFamily};
use crate::error::MetadataError;
use crate::handle::OutputFile;
use crate::ops::{NativeOutcome, Platform, unsupported};

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

fn system_time(ticks: u64) -> SystemTime {
    let (seconds, nanos) = ticks_to_unix(ticks);
    let whole = Duration::from_secs(seconds.unsigned_abs());
    let base = if seconds >= 0 {
        UNIX_EPOCH.checked_add(whole)
    } else {
        UNIX_EPOCH.checked_sub(whole)
    };
    base.and_then(|time| time.checked_add(Duration::from_nanos(u64::from(nanos))))
        .unwrap_or(UNIX_EPOCH)
}

fn open_for_times(path: &Path, file: &mut OutputFile) -> io::Result<()> {
    let opened = OpenOptions::new()
        .write(true)
        .custom_flags(FILE_FLAG_BACKUP_SEMANTICS.0)
        .open(path)?;
    *file = OutputFile::from_file(opened);
    Ok(())
}

fn set_attributes(path: &Path, attributes: u32) -> io::Result<()> {
    let attributes = if attributes == 0 {
        FILE_ATTRIBUTE_NORMAL
    } else {
        attributes
    };
    let wide = HSTRING::from(path.as_os_str());
    // SAFETY: `wide` is a NUL-terminated wide string that outlives the call.
    unsafe { SetFileAttributesW(&wide, FILE_FLAGS_AND_ATTRIBUTES(attributes)) }
        .map_err(io::Error::from)
}

impl Platform for HostPlatform {
    fn capabilities(&self) -> Capabilities {
        Capabilities::host()
    }

    fn set_owner(
        &self,
        _path: &Path,
        _uid: u32,
        _gid: u32,
        _follow_symlinks: bool,
    ) -> io::Result<()> {
        Err(unsupported("changing numeric ownership"))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_readonly(mode & 0o222 == 0);
        fs::set_permissions(path, permissions)
    }

    fn set_times(&self, path: &Path, atime: i64, mtime: i64) -> io::Result<()> {
        set_file_times(
            path,
            FileTime::from_unix_time(atime, 0),
            FileTime::from_unix_time(mtime, 0),
        )
    }

    fn swap_umask(&self, _mask: u32) -> u32 {
        0
    }

    fn apply_native(
        &self,
        path: &Path,
        attrs: &NativeAttributes,
        file: &mut OutputFile,
    ) -> NativeOutcome {
        let mut errors = Vec::new();

        if !file.is_open() {
            if let Err(error) = open_for_times(path, file) {
                errors.push(MetadataError::new("open for attribute restore", path, error));
            }
        }

        if let Some(handle) = file.file() {
            let times = FileTimes::new()
                .set_accessed(system_time(attrs.last_access_time))
                .set_modified(system_time(attrs.last_write_time))
                .set_created(system_time(attrs.creation_time));
            if let Err(error) = handle.set_times(times) {
                errors.push(MetadataError::new("set file times", path, error));
            }
        }
        file.close();

        if !attrs.is_directory() {
            if let Err(error) = set_attributes(path, attrs.settable_attributes()) {
                errors.push(MetadataError::new("set file attributes", path, error));
            }
        }

        NativeOutcome::Applied(errors)
    }

    fn capture_native(&self, path: &Path) -> io::Result<Option<NativeAttributes>> {
        let metadata = fs::symlink_metadata(path)?;
        let mut attrs = NativeAttributes {
            attributes: metadata.file_attributes(),
            creation_time: metadata.creation_time(),
            last_access_time: metadata.last_access_time(),
            last_write_time: metadata.last_write_time(),
            ..NativeAttributes::default()
        };
        attrs.set_size(metadata.file_size());
        Ok(Some(attrs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attribs::unix_to_ticks;

    #[test]
    fn ticks_convert_to_system_time() {
        let ticks = unix_to_ticks(1_000, 500);
        let time = system_time(ticks);
        assert_eq!(
            time.duration_since(UNIX_EPOCH).expect("after epoch"),
            Duration::new(1_000, 500)
        );
    }

    #[test]
    fn native_record_round_trips_through_host() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("file");
        fs::write(&path, b"abc").expect("write");

        let mut captured = HostPlatform
            .capture_native(&path)
            .expect("capture")
            .expect("record");
        assert_eq!(captured.size(), 3);
        captured.last_write_time = unix_to_ticks(1_500_000_000, 0);

        let mut file = OutputFile::closed();
        match HostPlatform.apply_native(&path, &captured, &mut file) {
            NativeOutcome::Applied(errors) => assert!(errors.is_empty(), "{errors:?}"),
            NativeOutcome::Unavailable => panic!("windows hosts apply natively"),
        }
        assert!(!file.is_open());

        let modified = fs::metadata(&path).expect("metadata").last_write_time();
        assert_eq!(modified, captured.last_write_time);
    }
}
