//! Shared test utilities for the findattr workspace.
//!
//! [`RecordingPlatform`] stands in for the host filesystem: it records every
//! call, simulates any [`PlatformFamily`], and fails selected operations on
//! request. The scratch helpers wrap `tempfile`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use attribs::NativeAttributes;
use platform::{Capabilities, MetadataError, NativeOutcome, OutputFile, Platform, PlatformFamily};
use tempfile::TempDir;

/// Operations a [`RecordingPlatform`] can be told to fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// [`Platform::set_owner`].
    SetOwner,
    /// [`Platform::set_mode`].
    SetMode,
    /// [`Platform::set_times`].
    SetTimes,
    /// [`Platform::set_flags`].
    SetFlags,
    /// [`Platform::apply_native`]; fails one step inside native application.
    ApplyNative,
    /// [`Platform::capture_native`].
    CaptureNative,
    /// [`Platform::resource_fork_len`].
    ResourceForkLen,
}

/// One recorded platform call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    /// Owner change.
    SetOwner {
        /// Target.
        path: PathBuf,
        /// Requested uid.
        uid: u32,
        /// Requested gid.
        gid: u32,
        /// Whether symbolic links were followed.
        follow_symlinks: bool,
    },
    /// Mode change.
    SetMode {
        /// Target.
        path: PathBuf,
        /// Requested mode.
        mode: u32,
    },
    /// Time change.
    SetTimes {
        /// Target.
        path: PathBuf,
        /// Access time.
        atime: i64,
        /// Modification time.
        mtime: i64,
    },
    /// Flag change.
    SetFlags {
        /// Target.
        path: PathBuf,
        /// Requested flags.
        flags: u32,
    },
    /// Creation mask replacement.
    SwapUmask(u32),
    /// Native attribute application.
    ApplyNative {
        /// Target.
        path: PathBuf,
        /// Record applied.
        attrs: NativeAttributes,
    },
    /// Native attribute capture.
    CaptureNative(PathBuf),
    /// Resource fork measurement.
    ResourceForkLen(PathBuf),
}

impl Call {
    /// Reports whether the call changes file metadata.
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetOwner { .. }
                | Self::SetMode { .. }
                | Self::SetTimes { .. }
                | Self::SetFlags { .. }
                | Self::ApplyNative { .. }
        )
    }
}

/// A [`Platform`] that records calls instead of touching the filesystem.
#[derive(Debug)]
pub struct RecordingPlatform {
    capabilities: Capabilities,
    native_available: bool,
    captured_native: Option<NativeAttributes>,
    fork_len: Option<u64>,
    failures: HashMap<Operation, io::ErrorKind>,
    umask: Cell<u32>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingPlatform {
    /// Simulates a platform with `capabilities`.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            native_available: capabilities.native_attributes,
            captured_native: None,
            fork_len: None,
            failures: HashMap::new(),
            umask: Cell::new(0o022),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Simulates a member of `family`.
    pub fn family(family: PlatformFamily) -> Self {
        Self::new(family.capabilities())
    }

    /// Linux-like host.
    pub fn posix() -> Self {
        Self::family(PlatformFamily::Posix)
    }

    /// BSD host.
    pub fn bsd() -> Self {
        Self::family(PlatformFamily::Bsd)
    }

    /// Darwin host.
    pub fn darwin() -> Self {
        Self::family(PlatformFamily::Darwin)
    }

    /// Windows host.
    pub fn windows() -> Self {
        Self::family(PlatformFamily::Windows)
    }

    /// Makes `operation` fail with `kind`.
    #[must_use]
    pub fn failing(mut self, operation: Operation, kind: io::ErrorKind) -> Self {
        self.failures.insert(operation, kind);
        self
    }

    /// Reports the native attribute API as missing at run time.
    #[must_use]
    pub const fn native_unavailable(mut self) -> Self {
        self.native_available = false;
        self
    }

    /// Record returned by [`Platform::capture_native`].
    #[must_use]
    pub const fn with_native_record(mut self, attrs: NativeAttributes) -> Self {
        self.captured_native = Some(attrs);
        self
    }

    /// Length returned by [`Platform::resource_fork_len`].
    #[must_use]
    pub const fn with_fork_len(mut self, length: u64) -> Self {
        self.fork_len = Some(length);
        self
    }

    /// Initial creation mask.
    #[must_use]
    pub fn with_umask(self, mask: u32) -> Self {
        self.umask.set(mask);
        self
    }

    /// Every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that change file metadata.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Current creation mask.
    pub fn umask(&self) -> u32 {
        self.umask.get()
    }

    /// Masks installed, in order.
    pub fn umask_swaps(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SwapUmask(mask) => Some(*mask),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn outcome(&self, operation: Operation) -> io::Result<()> {
        match self.failures.get(&operation) {
            Some(kind) => Err(io::Error::from(*kind)),
            None => Ok(()),
        }
    }
}

impl Platform for RecordingPlatform {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn set_owner(
        &self,
        path: &Path,
        uid: u32,
        gid: u32,
        follow_symlinks: bool,
    ) -> io::Result<()> {
        self.record(Call::SetOwner {
            path: path.to_path_buf(),
            uid,
            gid,
            follow_symlinks,
        });
        self.outcome(Operation::SetOwner)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.record(Call::SetMode {
            path: path.to_path_buf(),
            mode,
        });
        self.outcome(Operation::SetMode)
    }

    fn set_times(&self, path: &Path, atime: i64, mtime: i64) -> io::Result<()> {
        self.record(Call::SetTimes {
            path: path.to_path_buf(),
            atime,
            mtime,
        });
        self.outcome(Operation::SetTimes)
    }

    fn set_flags(&self, path: &Path, flags: u32) -> io::Result<()> {
        self.record(Call::SetFlags {
            path: path.to_path_buf(),
            flags,
        });
        self.outcome(Operation::SetFlags)
    }

    fn swap_umask(&self, mask: u32) -> u32 {
        self.record(Call::SwapUmask(mask));
        self.umask.replace(mask)
    }

    fn apply_native(
        &self,
        path: &Path,
        attrs: &NativeAttributes,
        file: &mut OutputFile,
    ) -> NativeOutcome {
        if !self.native_available {
            return NativeOutcome::Unavailable;
        }
        self.record(Call::ApplyNative {
            path: path.to_path_buf(),
            attrs: *attrs,
        });
        file.close();
        let errors = self
            .outcome(Operation::ApplyNative)
            .err()
            .map(|error| MetadataError::new("set file attributes", path, error))
            .into_iter()
            .collect();
        NativeOutcome::Applied(errors)
    }

    fn capture_native(&self, path: &Path) -> io::Result<Option<NativeAttributes>> {
        self.record(Call::CaptureNative(path.to_path_buf()));
        self.outcome(Operation::CaptureNative)?;
        Ok(self.captured_native.filter(|_| self.capabilities.native_attributes))
    }

    fn resource_fork_len(&self, path: &Path) -> io::Result<Option<u64>> {
        self.record(Call::ResourceForkLen(path.to_path_buf()));
        self.outcome(Operation::ResourceForkLen)?;
        Ok(self.fork_len.filter(|_| self.capabilities.resource_fork))
    }
}

/// Creates a scratch directory removed on drop.
pub fn scratch_dir() -> TempDir {
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => panic!("failed to create scratch directory: {error}"),
    }
}

/// Writes `contents` to `name` under `dir` and returns the full path.
pub fn scratch_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Err(error) = fs::write(&path, contents) {
        panic!("failed to write {}: {error}", path.display());
    }
    path
}
