//! crates/platform/src/handle.rs
//!
//! Handle to the file being restored.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

/// Output handle left open by the data-writing stage of a restore.
///
/// Attribute application measures and closes it before touching metadata.
#[derive(Debug, Default)]
pub struct OutputFile {
    file: Option<File>,
}

impl OutputFile {
    /// A handle with no open file.
    #[must_use]
    pub const fn closed() -> Self {
        Self { file: None }
    }

    /// Wraps an already open file.
    #[must_use]
    pub const fn from_file(file: File) -> Self {
        Self { file: Some(file) }
    }

    /// Opens `path` for writing, replacing any file currently held.
    pub fn open_for_write(&mut self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().write(true).open(path)?;
        self.file = Some(file);
        Ok(())
    }

    /// Reports whether a file is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Borrows the open file, if any.
    #[must_use]
    pub const fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Seeks to the end of the open file and returns its length.
    pub fn seek_end(&mut self) -> io::Result<u64> {
        match self.file.as_mut() {
            Some(file) => file.seek(SeekFrom::End(0)),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "output file is not open",
            )),
        }
    }

    /// Closes the file. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.file.take().is_some()
    }
}
