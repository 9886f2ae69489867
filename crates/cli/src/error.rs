//! Errors reported by the command-line front-end.

use std::io;
use std::path::PathBuf;

use attribs::DecodeError;
use metadata::ApplyError;
use stream::ConsistencyError;
use thiserror::Error;

/// A failed subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// A path given on the command line could not be inspected.
    #[error("unable to stat '{}': {source}", .path.display())]
    Stat {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The attribute blob could not be decoded.
    #[error("invalid attribute blob: {0}")]
    Decode(#[from] DecodeError),
    /// Stream selection reached an unmapped combination.
    #[error("internal stream selection error: {0}")]
    Selection(#[from] ConsistencyError),
    /// The restore reported failures.
    #[error(transparent)]
    Restore(#[from] ApplyError),
    /// Output could not be written.
    #[error("unable to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Exit code for command-line usage errors.
    pub const USAGE: i32 = 2;

    /// Exit code for operational failures.
    pub const FAILURE: i32 = 1;

    /// The exit code the process should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Decode(_) => Self::USAGE,
            Self::Stat { .. } | Self::Selection(_) | Self::Restore(_) | Self::Output(_) => {
                Self::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_usage_errors() {
        let error = CliError::from(DecodeError::EmptyField);
        assert_eq!(error.exit_code(), CliError::USAGE);
        assert!(error.to_string().starts_with("invalid attribute blob"));
    }

    #[test]
    fn stat_errors_name_the_path() {
        let error = CliError::Stat {
            path: PathBuf::from("/missing"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(error.exit_code(), CliError::FAILURE);
        assert!(error.to_string().contains("'/missing'"));
    }
}
