#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of the `findattr` binary. It
//! exposes the workspace operations as subcommands so that stream selection,
//! attribute capture and attribute restore can be exercised from a shell:
//!
//! - `select` runs the stream selector for one file kind and option set;
//! - `encode` captures the extended attributes of a path;
//! - `decode` prints the fields carried by an attribute blob;
//! - `apply` restores the attributes of one file onto another.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error and returns the process exit code, so the binary
//! stays a thin wrapper and tests can drive the parser in-process. Parsing is
//! performed by a [`clap`](https://docs.rs/clap/) command built in code.
//!
//! # Invariants
//!
//! - `run` never panics; I/O failures surface as non-zero exit codes.
//! - Help and version output go to standard output with exit code `0`.
//! - Usage errors exit with `2`; operational failures exit with `1`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(
//!     ["findattr", "select", "--compress", "--compatible"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! let output = String::from_utf8(stdout).unwrap();
//! assert!(output.starts_with("stream: compressed-gzip-file-data"));
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use logging::VerbosityConfig;

mod actions;
mod command;
mod error;

pub use error::CliError;

/// Highest exit code the binary reports.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The first argument is the program name. The returned value is the exit
/// code the caller should terminate with.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let matches = match command::clap_command().try_get_matches_from(arguments) {
        Ok(matches) => matches,
        Err(error) => return render_clap_error(&error, stdout, stderr),
    };

    // A subscriber may already be installed when the CLI runs embedded.
    let _ = logging::init_tracing(&VerbosityConfig::from_verbose_level(
        matches.get_count("verbose"),
    ));

    match actions::dispatch(&matches, stdout, stderr) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "findattr: {error}");
            error.exit_code()
        }
    }
}

fn render_clap_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(stdout, "{}", error.render()).is_err() {
                return 1;
            }
            0
        }
        _ => {
            let _ = write!(stderr, "{}", error.render());
            CliError::USAGE
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
