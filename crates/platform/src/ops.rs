//! crates/platform/src/ops.rs
//!
//! The operations attribute capture and restore need from a platform.

use std::io;
use std::path::Path;

use attribs::NativeAttributes;

use crate::capabilities::Capabilities;
use crate::error::MetadataError;
use crate::handle::OutputFile;

/// Result of attempting to apply a native attribute record.
#[derive(Debug)]
pub enum NativeOutcome {
    /// The platform has no native attribute API; callers fall back to the
    /// portable path.
    Unavailable,
    /// The record was applied. Individual steps that failed are listed; the
    /// native path is still authoritative.
    Applied(Vec<MetadataError>),
}

pub(crate) fn unsupported(operation: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{operation} is not supported on this platform"),
    )
}

/// Filesystem and process operations used by attribute capture and restore.
///
/// One implementation exists per platform family; tests substitute a
/// recording implementation. Every call is a single synchronous attempt.
pub trait Platform {
    /// What this platform supports beyond the portable attributes.
    fn capabilities(&self) -> Capabilities;

    /// Changes owner and group. With `follow_symlinks` false, a symbolic link
    /// itself is changed rather than its target.
    fn set_owner(
        &self,
        path: &Path,
        uid: u32,
        gid: u32,
        follow_symlinks: bool,
    ) -> io::Result<()>;

    /// Sets permission bits.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Sets access and modification times, in seconds since the Unix epoch.
    fn set_times(&self, path: &Path, atime: i64, mtime: i64) -> io::Result<()>;

    /// Sets user-settable file flags.
    fn set_flags(&self, _path: &Path, _flags: u32) -> io::Result<()> {
        Err(unsupported("setting file flags"))
    }

    /// Replaces the process file-creation mask, returning the previous one.
    ///
    /// Callers go through [`UmaskGuard`](crate::UmaskGuard) rather than
    /// calling this directly.
    fn swap_umask(&self, mask: u32) -> u32;

    /// Applies a native attribute record, opening `file` if needed and
    /// leaving it closed.
    fn apply_native(
        &self,
        _path: &Path,
        _attrs: &NativeAttributes,
        _file: &mut OutputFile,
    ) -> NativeOutcome {
        NativeOutcome::Unavailable
    }

    /// Reads the native attribute record of `path`, if the platform has one.
    fn capture_native(&self, _path: &Path) -> io::Result<Option<NativeAttributes>> {
        Ok(None)
    }

    /// Length of the resource fork of `path`, if the platform has forks.
    fn resource_fork_len(&self, _path: &Path) -> io::Result<Option<u64>> {
        Ok(None)
    }
}
