#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the tracing conventions shared by the findattr workspace:
//! one target per subsystem, convenience macros that emit on those targets,
//! and the subscriber setup used by the `findattr` binary.
//!
//! # Design
//!
//! Library crates emit plain [`tracing`] events. Routine progress goes
//! through the `trace_*` macros; warnings and errors use `tracing::warn!` or
//! `tracing::error!` with a target from [`targets`] so that operators can
//! filter a single subsystem. [`VerbosityConfig`] maps a `-v` count onto
//! per-target levels and [`init_tracing`] installs the fmt subscriber.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert!(config.directives().contains("findattr::restore=debug"));
//! ```

mod config;
mod tracing_bridge;
mod tracing_macros;

pub use config::{Level, VerbosityConfig};
pub use tracing_bridge::{env_filter, init_tracing};

/// Tracing targets used across the workspace.
pub mod targets {
    /// Stream selection.
    pub const STREAM: &str = "findattr::stream";
    /// Attribute codec.
    pub const ATTRIBS: &str = "findattr::attribs";
    /// Attribute restore.
    pub const RESTORE: &str = "findattr::restore";
    /// Backup-side attribute capture.
    pub const CAPTURE: &str = "findattr::capture";
}
