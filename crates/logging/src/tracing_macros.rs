//! crates/logging/src/tracing_macros.rs
//! Convenience macros for findattr-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for each subsystem. Warnings and errors are
//! emitted with the plain `tracing` macros and an explicit target from
//! [`crate::targets`].

/// Emit a stream selection trace.
///
/// # Example
/// ```ignore
/// trace_stream!("selected {} for {}", tag, kind);
/// ```
#[macro_export]
macro_rules! trace_stream {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "findattr::stream", $($arg)*);
    };
}

/// Emit an attribute codec trace.
///
/// # Example
/// ```ignore
/// trace_attribs!("decoded {} fields", count);
/// ```
#[macro_export]
macro_rules! trace_attribs {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "findattr::attribs", $($arg)*);
    };
}

/// Emit an attribute restore trace.
///
/// # Example
/// ```ignore
/// trace_restore!("chmod {:o} {}", mode, path.display());
/// ```
#[macro_export]
macro_rules! trace_restore {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "findattr::restore", $($arg)*);
    };
}

/// Emit a backup-side attribute capture trace.
///
/// # Example
/// ```ignore
/// trace_capture!("captured fork length {}", length);
/// ```
#[macro_export]
macro_rules! trace_capture {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "findattr::capture", $($arg)*);
    };
}
