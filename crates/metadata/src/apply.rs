use std::io;
use std::path::Path;

use attribs::{AttributeLayout, AttributeRecord, NativeAttributes};
use logging::trace_restore;
use platform::{Identity, MetadataError, NativeOutcome, OutputFile, Platform, UmaskGuard};
use stream::FileKind;

use crate::diagnostic::{ApplyReport, Diagnostic};
use crate::options::{ApplyOptions, PrivilegePolicy};
use crate::record::RestoreAttributes;

/// Restores recorded attributes onto restored files.
///
/// The applicator borrows a [`Platform`] and carries the identity of the
/// restoring process, so the same logic runs against the host or a test
/// double.
#[derive(Debug)]
pub struct AttributeApplicator<'a, P: Platform + ?Sized> {
    platform: &'a P,
    identity: Identity,
    options: ApplyOptions,
}

impl<'a, P: Platform + ?Sized> AttributeApplicator<'a, P> {
    /// Creates an applicator with default [`ApplyOptions`].
    pub const fn new(platform: &'a P, identity: Identity) -> Self {
        Self {
            platform,
            identity,
            options: ApplyOptions::new(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub const fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the configured options.
    pub const fn options(&self) -> &ApplyOptions {
        &self.options
    }

    /// Restores the attributes of one file.
    ///
    /// `file` is the handle left by the data-writing stage, if any; it is
    /// closed before metadata is touched. The output path of `attrs` is
    /// consumed on every exit path. Failures never abort the remaining
    /// steps; they are collected in the returned report.
    pub fn apply(&self, attrs: &mut RestoreAttributes, file: &mut OutputFile) -> ApplyReport {
        let mut report = ApplyReport::new();
        let Some(path) = attrs.take_output_path() else {
            file.close();
            report.fail(Diagnostic::NoTarget);
            return report;
        };

        let capabilities = self.platform.capabilities();
        let record = self.decode_record(
            &path,
            &std::mem::take(&mut attrs.extended),
            capabilities.attribute_layout(),
            &mut report,
        );

        if capabilities.native_attributes {
            if attrs.attribute_stream.is_extended()
                && self.apply_native(&path, record.native.as_ref(), file, &mut report)
            {
                return report;
            }
            if attrs.data_stream.is_native() {
                file.close();
                trace_restore!(
                    "{} restored by native writer ({})",
                    path.display(),
                    attrs.data_stream
                );
                return report;
            }
        }

        let _mask = UmaskGuard::zeroed(self.platform);

        if file.is_open() {
            self.measure(&path, attrs, file, &mut report);
        }

        if capabilities.resource_fork && self.options.verifies_fork_length() {
            self.check_fork_length(&path, attrs.kind, record.resource_fork_length, &mut report);
        }

        if attrs.kind == FileKind::Special && attrs.stat.is_socket() {
            trace_restore!("skipping socket {}", path.display());
            return report;
        }

        if !self.identity.is_privileged()
            && self.options.policy() == PrivilegePolicy::SkipWhenUnprivileged
        {
            trace_restore!(
                uid = self.identity.uid(),
                "skipping owner, mode and times of {}: not privileged",
                path.display()
            );
            return report;
        }

        let stat = attrs.stat;
        if attrs.kind == FileKind::Symlink {
            let result = self.platform.set_owner(&path, stat.uid, stat.gid, false);
            self.step(&path, "set file owner", result, &mut report);
        } else {
            let result = self.platform.set_owner(&path, stat.uid, stat.gid, true);
            self.step(&path, "set file owner", result, &mut report);
            let result = self.platform.set_mode(&path, stat.mode);
            self.step(&path, "set file modes", result, &mut report);
            let result = self.platform.set_times(&path, stat.atime, stat.mtime);
            self.step(&path, "set file times", result, &mut report);
            // Flags go last: an immutable flag would block the time update.
            if capabilities.file_flags {
                let result = self.platform.set_flags(&path, stat.flags);
                self.step(&path, "set file flags", result, &mut report);
            }
        }

        report
    }

    fn decode_record(
        &self,
        path: &Path,
        blob: &str,
        layout: AttributeLayout,
        report: &mut ApplyReport,
    ) -> AttributeRecord {
        match attribs::decode_lenient(blob, layout) {
            Ok(decoded) => {
                if let Some(source) = decoded.mismatch {
                    report.note(Diagnostic::FieldCount {
                        path: path.to_path_buf(),
                        source,
                    });
                }
                decoded.record
            }
            Err(source) => {
                report.note(Diagnostic::Malformed {
                    path: path.to_path_buf(),
                    source,
                });
                AttributeRecord::default()
            }
        }
    }

    /// Returns true when native application took over the file.
    fn apply_native(
        &self,
        path: &Path,
        native: Option<&NativeAttributes>,
        file: &mut OutputFile,
        report: &mut ApplyReport,
    ) -> bool {
        let Some(native) = native else {
            trace_restore!("attributes missing for {}", path.display());
            file.close();
            return false;
        };

        match self.platform.apply_native(path, native, file) {
            NativeOutcome::Applied(errors) => {
                file.close();
                for error in errors {
                    report.note(Diagnostic::Native(error));
                }
                trace_restore!("native attributes applied to {}", path.display());
                true
            }
            NativeOutcome::Unavailable => {
                trace_restore!("native attributes unavailable for {}", path.display());
                false
            }
        }
    }

    /// Measures and closes the open handle. An unmeasurable handle only
    /// skips the size comparison.
    fn measure(
        &self,
        path: &Path,
        attrs: &RestoreAttributes,
        file: &mut OutputFile,
        report: &mut ApplyReport,
    ) {
        let measured = file.seek_end();
        file.close();

        match measured {
            Ok(restored) => {
                let original = attrs.stat.size;
                if self.options.verifies_size()
                    && attrs.kind == FileKind::Regular
                    && restored > 0
                    && original > 0
                    && restored != original
                {
                    report.note(Diagnostic::SizeMismatch {
                        path: path.to_path_buf(),
                        original,
                        restored,
                    });
                }
            }
            Err(source) => {
                report.note(Diagnostic::Measure {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    fn check_fork_length(
        &self,
        path: &Path,
        kind: FileKind,
        recorded: Option<u64>,
        report: &mut ApplyReport,
    ) {
        let Some(original) = recorded else {
            return;
        };
        if kind != FileKind::Regular {
            return;
        }

        match self.platform.resource_fork_len(path) {
            Ok(Some(restored)) if restored != original => {
                report.note(Diagnostic::ForkLengthMismatch {
                    path: path.to_path_buf(),
                    original,
                    restored,
                });
            }
            Ok(_) => {}
            Err(error) => {
                trace_restore!(
                    "unable to measure resource fork of {}: {error}",
                    path.display()
                );
            }
        }
    }

    fn step(
        &self,
        path: &Path,
        context: &'static str,
        result: io::Result<()>,
        report: &mut ApplyReport,
    ) {
        match result {
            Ok(()) => trace_restore!("{context} {}", path.display()),
            Err(error) if error.kind() == io::ErrorKind::Unsupported => {
                trace_restore!("cannot {context} {}: {error}", path.display());
            }
            Err(error) if self.identity.is_privileged() => {
                report.fail(Diagnostic::Operation(MetadataError::new(
                    context, path, error,
                )));
            }
            Err(error) => {
                trace_restore!("ignoring failure to {context} {}: {error}", path.display());
            }
        }
    }
}
