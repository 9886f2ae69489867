//! crates/logging/src/config.rs
//! Verbosity configuration mapped onto tracing filter directives.

use crate::targets;

/// Severity threshold applied to one subsystem target.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Only errors.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational events.
    Info,
    /// Debug events.
    Debug,
    /// Everything.
    Trace,
}

impl Level {
    /// Directive spelling accepted by `EnvFilter`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Per-subsystem verbosity configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Level for events outside the findattr targets.
    pub default: Level,
    /// Stream selection.
    pub stream: Level,
    /// Attribute codec.
    pub attribs: Level,
    /// Attribute restore.
    pub restore: Level,
    /// Backup-side capture.
    pub capture: Level,
}

impl VerbosityConfig {
    /// Create a configuration from a count of `-v` flags (0-3).
    ///
    /// Level 0 reports warnings only, 1 adds stream and restore progress, 2 adds debug
    /// output for every subsystem, and 3 or more enables tracing everywhere.
    #[must_use]
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.restore = Level::Debug;
                config.stream = Level::Debug;
            }
            2 => {
                config.stream = Level::Debug;
                config.attribs = Level::Debug;
                config.restore = Level::Debug;
                config.capture = Level::Debug;
            }
            _ => {
                config.default = Level::Info;
                config.stream = Level::Trace;
                config.attribs = Level::Trace;
                config.restore = Level::Trace;
                config.capture = Level::Trace;
            }
        }

        config
    }

    /// Renders the configuration as `EnvFilter` directives.
    #[must_use]
    pub fn directives(&self) -> String {
        format!(
            "{},{}={},{}={},{}={},{}={}",
            self.default.as_str(),
            targets::STREAM,
            self.stream.as_str(),
            targets::ATTRIBS,
            self.attribs.as_str(),
            targets::RESTORE,
            self.restore.as_str(),
            targets::CAPTURE,
            self.capture.as_str(),
        )
    }
}
