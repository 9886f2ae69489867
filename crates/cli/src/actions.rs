//! Subcommand execution.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use attribs::{AttributeLayout, ticks_to_unix};
use clap::ArgMatches;
use metadata::{
    AttributeApplicator, ApplyOptions, PrivilegePolicy, RestoreAttributes, Severity, StatRecord,
    capture_attributes,
};
use platform::{Capabilities, HostPlatform, Identity, OutputFile};
use stream::{CompressionAlgorithm, DataBackend, FileKind, OptionFlags, StreamSelector};

use crate::error::CliError;

pub(crate) fn dispatch<Out: Write, Err: Write>(
    matches: &ArgMatches,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("select", sub)) => select(sub, stdout),
        Some(("encode", sub)) => encode(sub, stdout),
        Some(("decode", sub)) => decode(sub, stdout),
        Some(("apply", sub)) => apply(sub, stdout, stderr),
        // subcommand_required rejects everything else during parsing
        _ => Ok(()),
    }
}

fn select<Out: Write>(matches: &ArgMatches, stdout: &mut Out) -> Result<(), CliError> {
    let kind = matches
        .get_one::<FileKind>("kind")
        .copied()
        .unwrap_or_default();
    let algorithm = matches
        .get_one::<CompressionAlgorithm>("algorithm")
        .copied()
        .unwrap_or_default();
    let backend = if matches.get_flag("native") {
        DataBackend::Native
    } else {
        DataBackend::Portable
    };
    let mut flags = OptionFlags {
        sparse: matches.get_flag("sparse"),
        offsets: matches.get_flag("offsets"),
        compress: matches.get_flag("compress"),
        encrypt: matches.get_flag("encrypt"),
    };

    let selection = StreamSelector::new()
        .compatible(matches.get_flag("compatible"))
        .algorithm(algorithm)
        .encryption_supported(!matches.get_flag("no-encryption"))
        .select(kind, backend, &mut flags);
    let tag = selection.into_result()?;

    writeln!(stdout, "stream: {tag} ({})", tag.code())?;
    writeln!(stdout, "options: {flags}")?;
    writeln!(stdout, "dropped: {}", selection.dropped())?;
    Ok(())
}

fn encode<Out: Write>(matches: &ArgMatches, stdout: &mut Out) -> Result<(), CliError> {
    let path = required_path(matches, "path");
    let kind = match matches.get_one::<FileKind>("kind") {
        Some(kind) => *kind,
        None => kind_of(&stat(path)?),
    };

    let encoded = capture_attributes(&HostPlatform::new(), kind, matches.get_flag("plugin"), path);
    writeln!(stdout, "stream: {} ({})", encoded.stream, encoded.stream.code())?;
    writeln!(stdout, "blob: {}", encoded.blob)?;
    Ok(())
}

fn decode<Out: Write>(matches: &ArgMatches, stdout: &mut Out) -> Result<(), CliError> {
    let blob = matches.get_one::<String>("blob").map_or("", String::as_str);
    let layout = matches
        .get_one::<AttributeLayout>("layout")
        .copied()
        .unwrap_or_else(|| Capabilities::host().attribute_layout());

    let record = attribs::decode(blob, layout)?;
    writeln!(stdout, "layout: {}", layout.name())?;
    if record.is_empty() {
        writeln!(stdout, "no extended attributes")?;
    }
    if let Some(native) = record.native {
        writeln!(stdout, "attributes: {:#06x}", native.attributes)?;
        for (label, ticks) in [
            ("creation time", native.creation_time),
            ("last access time", native.last_access_time),
            ("last write time", native.last_write_time),
        ] {
            writeln!(stdout, "{label}: {} ({ticks} ticks)", ticks_to_unix(ticks).0)?;
        }
        writeln!(stdout, "size: {}", native.size())?;
    }
    if let Some(length) = record.resource_fork_length {
        writeln!(stdout, "resource fork length: {length}")?;
    }
    Ok(())
}

fn apply<Out: Write, Err: Write>(
    matches: &ArgMatches,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError> {
    let source = required_path(matches, "from");
    let dest = required_path(matches, "dest");
    let source_metadata = stat(source)?;
    stat(dest)?;

    let host = HostPlatform::new();
    let kind = kind_of(&source_metadata);
    let mut attrs = RestoreAttributes::new(kind, dest)
        .with_stat(stat_record(&source_metadata))
        .with_extended(capture_attributes(&host, kind, false, source));

    let policy = if matches.get_flag("attempt-quietly") {
        PrivilegePolicy::AttemptQuietly
    } else {
        PrivilegePolicy::SkipWhenUnprivileged
    };
    let report = AttributeApplicator::new(&host, Identity::current())
        .with_options(ApplyOptions::new().privilege_policy(policy))
        .apply(&mut attrs, &mut OutputFile::closed());

    for diagnostic in report.diagnostics() {
        let label = match diagnostic.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        writeln!(stderr, "{label}: {diagnostic}")?;
    }
    report.into_result()?;

    writeln!(stdout, "restored attributes of {}", dest.display())?;
    Ok(())
}

fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> &'a Path {
    matches
        .get_one::<PathBuf>(id)
        .map_or_else(|| Path::new(""), PathBuf::as_path)
}

fn stat(path: &Path) -> Result<fs::Metadata, CliError> {
    fs::symlink_metadata(path).map_err(|source| CliError::Stat {
        path: path.to_path_buf(),
        source,
    })
}

fn kind_of(metadata: &fs::Metadata) -> FileKind {
    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        FileKind::Symlink
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::Regular
    } else {
        FileKind::Special
    }
}

#[cfg(unix)]
fn stat_record(metadata: &fs::Metadata) -> StatRecord {
    StatRecord::from_metadata(metadata)
}

#[cfg(not(unix))]
fn stat_record(metadata: &fs::Metadata) -> StatRecord {
    use filetime::FileTime;

    let permissions = if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    };
    let file_type = if metadata.is_dir() { 0o040_000 } else { 0o100_000 };
    StatRecord {
        mode: file_type | permissions,
        atime: FileTime::from_last_access_time(metadata).unix_seconds(),
        mtime: FileTime::from_last_modification_time(metadata).unix_seconds(),
        size: metadata.len(),
        ..StatRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_file_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, b"data").expect("write");

        assert_eq!(kind_of(&stat(&file).expect("stat")), FileKind::Regular);
        assert_eq!(kind_of(&stat(dir.path()).expect("stat")), FileKind::Directory);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("missing", &link).expect("symlink");

        assert_eq!(kind_of(&stat(&link).expect("stat")), FileKind::Symlink);
    }

    #[test]
    fn missing_paths_report_stat_errors() {
        let error = stat(Path::new("/definitely/not/here")).expect_err("missing");
        assert!(matches!(error, CliError::Stat { .. }));
    }
}
