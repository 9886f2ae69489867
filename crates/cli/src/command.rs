//! Command-line definition.

use attribs::AttributeLayout;
use clap::builder::{PathBufValueParser, PossibleValuesParser, TypedValueParser};
use clap::{Arg, ArgAction, Command};
use stream::{CompressionAlgorithm, CompressionAlgorithmParseError, FileKind, ParseError};

pub(crate) fn clap_command() -> Command {
    Command::new("findattr")
        .about("Select data streams and capture or restore file attributes")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity; repeat for more detail")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(select_command())
        .subcommand(encode_command())
        .subcommand(decode_command())
        .subcommand(apply_command())
}

fn select_command() -> Command {
    Command::new("select")
        .about("Choose the stream type for one file")
        .arg(kind_arg().default_value("regular"))
        .arg(switch("sparse", "Request sparse data"))
        .arg(switch("offsets", "Request offset-encoded data"))
        .arg(switch("compress", "Request compressed data"))
        .arg(switch("encrypt", "Request encrypted data"))
        .arg(switch("native", "Data is written by the platform-native backup API"))
        .arg(switch("compatible", "Use legacy gzip stream names"))
        .arg(switch("no-encryption", "Treat encryption as unavailable"))
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .value_name("NAME")
                .help("Compression algorithm requested by the job")
                .default_value("gzip")
                .value_parser(parse_algorithm),
        )
}

fn encode_command() -> Command {
    Command::new("encode")
        .about("Capture the extended attributes of a path")
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_name("KIND")
                .help("Override the file kind detected from the path")
                .value_parser(parse_kind),
        )
        .arg(switch("plugin", "The file is produced by a plugin"))
        .arg(path_arg("path", "PATH", "File to inspect"))
}

fn decode_command() -> Command {
    Command::new("decode")
        .about("Print the fields of an attribute blob")
        .arg(
            Arg::new("layout")
                .long("layout")
                .value_name("LAYOUT")
                .help("Blob layout; defaults to the layout of this platform")
                .value_parser(
                    PossibleValuesParser::new(["portable", "native", "resource-fork"])
                        .map(|name| parse_layout(&name)),
                ),
        )
        .arg(
            Arg::new("blob")
                .value_name("BLOB")
                .help("Encoded attributes; an empty string decodes to nothing")
                .required(true)
                .allow_hyphen_values(true),
        )
}

fn apply_command() -> Command {
    Command::new("apply")
        .about("Restore the attributes of one file onto another")
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("SOURCE")
                .help("File whose attributes are restored")
                .required(true)
                .value_parser(PathBufValueParser::new()),
        )
        .arg(switch(
            "attempt-quietly",
            "Attempt owner, mode and time changes even when unprivileged",
        ))
        .arg(path_arg("dest", "DEST", "File receiving the attributes"))
}

fn switch(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .value_name("KIND")
        .help("File kind: regular, directory, special, symlink, deleted, restore-object or resource-fork")
        .value_parser(parse_kind)
}

fn path_arg(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name(value_name)
        .help(help)
        .required(true)
        .value_parser(PathBufValueParser::new())
}

fn parse_kind(value: &str) -> Result<FileKind, ParseError> {
    value.parse()
}

fn parse_algorithm(value: &str) -> Result<CompressionAlgorithm, CompressionAlgorithmParseError> {
    value.parse()
}

fn parse_layout(name: &str) -> AttributeLayout {
    match name {
        "native" => AttributeLayout::Native,
        "resource-fork" => AttributeLayout::ResourceFork,
        _ => AttributeLayout::Portable,
    }
}
