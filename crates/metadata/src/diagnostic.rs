//! Diagnostics produced while restoring attributes.

use std::io;
use std::path::PathBuf;

use attribs::DecodeError;
use logging::targets;
use platform::MetadataError;
use thiserror::Error;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Reported; the restore is still considered successful.
    Warning,
    /// Reported as an error.
    Error,
}

/// One problem found while restoring a file's attributes.
#[derive(Debug, Error)]
pub enum Diagnostic {
    /// The record carried no output path.
    #[error("no output path to restore attributes onto")]
    NoTarget,
    /// An ownership, mode, time or flag change failed.
    #[error(transparent)]
    Operation(MetadataError),
    /// A step of native attribute application failed.
    #[error("native attribute restore: {0}")]
    Native(MetadataError),
    /// The restored file size differs from the recorded size.
    #[error(
        "File size of restored file {} not correct. Original {original}, restored {restored}.",
        .path.display()
    )]
    SizeMismatch {
        /// Restored file.
        path: PathBuf,
        /// Size recorded at backup.
        original: u64,
        /// Size after restore.
        restored: u64,
    },
    /// The restored resource fork length differs from the recorded length.
    #[error(
        "Resource fork of restored file {} not correct. Original {original}, restored {restored}.",
        .path.display()
    )]
    ForkLengthMismatch {
        /// Restored file.
        path: PathBuf,
        /// Length recorded at backup.
        original: u64,
        /// Length after restore.
        restored: u64,
    },
    /// The extended attributes were captured with a different field layout.
    #[error("extended attributes of {} do not match this platform: {source}", .path.display())]
    FieldCount {
        /// Restored file.
        path: PathBuf,
        /// Decoder failure.
        source: DecodeError,
    },
    /// The extended attributes could not be decoded.
    #[error("malformed extended attributes for {}: {source}", .path.display())]
    Malformed {
        /// Restored file.
        path: PathBuf,
        /// Decoder failure.
        source: DecodeError,
    },
    /// The output handle could not be measured; the size check was skipped.
    #[error("unable to measure restored file {}: {source}", .path.display())]
    Measure {
        /// Restored file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

impl Diagnostic {
    /// The severity of this diagnostic.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::SizeMismatch { .. }
            | Self::ForkLengthMismatch { .. }
            | Self::FieldCount { .. }
            | Self::Malformed { .. }
            | Self::Measure { .. } => Severity::Warning,
            Self::NoTarget | Self::Operation(_) | Self::Native(_) => Severity::Error,
        }
    }

    /// Reports whether this is a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.severity(), Severity::Warning)
    }
}

/// Outcome of one attribute restore.
#[derive(Debug)]
pub struct ApplyReport {
    success: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ApplyReport {
    pub(crate) const fn new() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    /// Records a diagnostic that does not affect success.
    pub(crate) fn note(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => tracing::warn!(target: targets::RESTORE, "{diagnostic}"),
            Severity::Error => tracing::error!(target: targets::RESTORE, "{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Records a diagnostic and marks the restore as failed.
    pub(crate) fn fail(&mut self, diagnostic: Diagnostic) {
        self.success = false;
        self.note(diagnostic);
    }

    /// Reports whether every attempted step succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Diagnostics in the order they were produced.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_warning())
    }

    /// Consumes the report, returning the diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Converts into a `Result`: diagnostics on success, an [`ApplyError`]
    /// otherwise.
    pub fn into_result(self) -> Result<Vec<Diagnostic>, ApplyError> {
        if self.success {
            Ok(self.diagnostics)
        } else {
            Err(ApplyError {
                diagnostics: self.diagnostics,
            })
        }
    }
}

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity() == Severity::Error)
        .count()
}

/// A restore in which at least one attempted step failed.
#[derive(Debug, Error)]
#[error("attribute restore failed ({} error(s))", error_count(.diagnostics))]
pub struct ApplyError {
    diagnostics: Vec<Diagnostic>,
}

impl ApplyError {
    /// Every diagnostic of the failed restore.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
