#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # Overview
//!
//! `platform` is the seam between attribute restore logic and the host
//! filesystem. It defines the [`Platform`] trait with the handful of
//! operations capture and restore need, the [`Capabilities`] a platform
//! family offers, and a [`HostPlatform`] implementation for the build target.
//!
//! # Design
//!
//! - [`Platform`] methods are single synchronous attempts returning
//!   [`std::io::Result`]. Callers decide whether a failure matters.
//! - [`OutputFile`] carries the handle left open by the data-writing stage.
//! - [`UmaskGuard`] replaces the process creation mask for a scope and
//!   restores it on every exit path, including unwinding.
//! - [`Identity`] is computed once by the caller and passed explicitly.
//!
//! # Errors
//!
//! Operations surface [`std::io::Error`]. Restore code wraps them in
//! [`MetadataError`] together with the path and the attempted operation.
//!
//! # Examples
//!
//! ```
//! use platform::{Capabilities, PlatformFamily};
//!
//! let caps = PlatformFamily::Windows.capabilities();
//! assert!(caps.native_attributes);
//! assert!(!Capabilities::PORTABLE.file_flags);
//! ```

mod capabilities;
mod error;
mod handle;
mod host;
mod identity;
mod ops;
mod umask;

pub use capabilities::{Capabilities, PlatformFamily};
pub use error::MetadataError;
pub use handle::OutputFile;
pub use host::HostPlatform;
pub use identity::Identity;
pub use ops::{NativeOutcome, Platform};
pub use umask::UmaskGuard;
