#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # Overview
//!
//! `metadata` captures a file's extended attributes at backup time and
//! replays the recorded attributes onto the restored file.
//!
//! # Design
//!
//! - [`capture_attributes`] asks the [`platform::Platform`] for whatever the
//!   host records beyond POSIX attributes and encodes it with [`attribs`].
//! - [`AttributeApplicator::apply`] closes the output handle left by the data
//!   writer, checks the restored size, then changes owner, mode, times and
//!   flags. A native attribute record, when the host understands it, replaces
//!   the generic steps entirely.
//! - The restoring [`platform::Identity`] is passed in explicitly. With the
//!   default [`PrivilegePolicy`] an unprivileged identity attempts no
//!   ownership, mode, time or flag change.
//!
//! # Errors
//!
//! Nothing here aborts a restore. Every problem becomes a [`Diagnostic`] in
//! the [`ApplyReport`] and is mirrored to the `findattr::restore` tracing
//! target. The report is unsuccessful only when an attempted step failed.
//!
//! # Examples
//!
//! ```
//! use metadata::{AttributeApplicator, RestoreAttributes, StatRecord};
//! use platform::{Identity, OutputFile, Platform};
//! use stream::FileKind;
//!
//! # fn restore(platform: &impl Platform) {
//! let mut attrs = RestoreAttributes::new(FileKind::Regular, "/restore/etc/hosts")
//!     .with_stat(StatRecord { mode: 0o100_644, ..StatRecord::default() });
//! let report = AttributeApplicator::new(platform, Identity::current())
//!     .apply(&mut attrs, &mut OutputFile::closed());
//! assert!(attrs.is_consumed());
//! # let _ = report;
//! # }
//! ```

mod apply;
mod capture;
mod diagnostic;
mod options;
mod record;

pub use apply::AttributeApplicator;
pub use capture::capture_attributes;
pub use diagnostic::{ApplyError, ApplyReport, Diagnostic, Severity};
pub use options::{ApplyOptions, PrivilegePolicy};
pub use record::{RestoreAttributes, S_IFMT, S_IFSOCK, StatRecord};
