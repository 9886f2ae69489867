use std::io::{self, Write};
use std::path::PathBuf;

use attribs::{AttributeLayout, AttributeRecord, NativeAttributes, encode};
use metadata::{
    ApplyOptions, AttributeApplicator, Diagnostic, PrivilegePolicy, RestoreAttributes, S_IFSOCK,
    StatRecord,
};
use platform::{Identity, OutputFile};
use stream::{FileKind, StreamTag};
use test_support::{Call, Operation, RecordingPlatform, scratch_dir, scratch_file};

const TARGET: &str = "/restore/data/file";

fn stat() -> StatRecord {
    StatRecord {
        mode: 0o100_640,
        uid: 1000,
        gid: 100,
        atime: 1_600_000_000,
        mtime: 1_650_000_000,
        size: 0,
        flags: 0x20,
    }
}

fn regular() -> RestoreAttributes {
    RestoreAttributes::new(FileKind::Regular, TARGET).with_stat(stat())
}

fn native_record() -> NativeAttributes {
    let mut attrs = NativeAttributes {
        attributes: 0x21,
        creation_time: 132_000_000_000_000_000,
        last_access_time: 132_000_000_100_000_000,
        last_write_time: 132_000_000_200_000_000,
        ..NativeAttributes::default()
    };
    attrs.set_size(4096);
    attrs
}

fn generic_calls(follow_symlinks: bool) -> Vec<Call> {
    vec![
        Call::SetOwner {
            path: PathBuf::from(TARGET),
            uid: 1000,
            gid: 100,
            follow_symlinks,
        },
        Call::SetMode {
            path: PathBuf::from(TARGET),
            mode: 0o100_640,
        },
        Call::SetTimes {
            path: PathBuf::from(TARGET),
            atime: 1_600_000_000,
            mtime: 1_650_000_000,
        },
    ]
}

#[test]
fn privileged_restore_sets_owner_mode_then_times() {
    let platform = RecordingPlatform::posix();
    let mut attrs = regular();

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(report.diagnostics().is_empty());
    assert_eq!(platform.mutations(), generic_calls(true));
    assert!(attrs.is_consumed());
}

#[test]
fn flags_follow_times_on_flag_capable_hosts() {
    let platform = RecordingPlatform::bsd();
    let mut attrs = regular();

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    let mut expected = generic_calls(true);
    expected.push(Call::SetFlags {
        path: PathBuf::from(TARGET),
        flags: 0x20,
    });
    assert!(report.is_success());
    assert_eq!(platform.mutations(), expected);
}

#[test]
fn symlinks_only_change_link_owner() {
    let platform = RecordingPlatform::bsd();
    let mut attrs = RestoreAttributes::new(FileKind::Symlink, TARGET).with_stat(stat());

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert_eq!(platform.mutations(), generic_calls(false)[..1].to_vec());
}

#[test]
fn sockets_are_skipped() {
    let platform = RecordingPlatform::posix();
    let mut attrs = RestoreAttributes::new(FileKind::Special, TARGET).with_stat(StatRecord {
        mode: S_IFSOCK | 0o755,
        ..stat()
    });

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(platform.mutations().is_empty());
    assert!(attrs.is_consumed());
    assert_eq!(platform.umask(), 0o022);
}

#[test]
fn unprivileged_identity_attempts_nothing() {
    let platform = RecordingPlatform::bsd();
    let mut attrs = regular();

    let report = AttributeApplicator::new(&platform, Identity::new(1000, 100))
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(report.diagnostics().is_empty());
    assert!(platform.mutations().is_empty());
    assert!(attrs.is_consumed());
}

#[test]
fn attempt_quietly_ignores_unprivileged_failures() {
    let platform = RecordingPlatform::posix()
        .failing(Operation::SetOwner, io::ErrorKind::PermissionDenied)
        .failing(Operation::SetMode, io::ErrorKind::PermissionDenied);
    let mut attrs = regular();

    let report = AttributeApplicator::new(&platform, Identity::new(1000, 100))
        .with_options(ApplyOptions::new().privilege_policy(PrivilegePolicy::AttemptQuietly))
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(report.diagnostics().is_empty());
    assert_eq!(platform.mutations(), generic_calls(true));
}

#[test]
fn privileged_failures_are_reported_and_later_steps_still_run() {
    let platform = RecordingPlatform::posix()
        .failing(Operation::SetMode, io::ErrorKind::PermissionDenied);
    let mut attrs = regular();

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(!report.is_success());
    assert_eq!(platform.mutations(), generic_calls(true));
    match report.diagnostics() {
        [Diagnostic::Operation(error)] => {
            assert_eq!(error.context(), "set file modes");
            assert!(error.is_permission_denied());
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert!(attrs.is_consumed());
    assert_eq!(platform.umask(), 0o022);
}

#[test]
fn creation_mask_is_zeroed_then_restored() {
    let platform = RecordingPlatform::posix().with_umask(0o077);
    let mut attrs = regular();

    AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert_eq!(platform.umask_swaps(), vec![0, 0o077]);
    assert_eq!(platform.umask(), 0o077);
    assert_eq!(platform.calls().first(), Some(&Call::SwapUmask(0)));
    assert_eq!(platform.calls().last(), Some(&Call::SwapUmask(0o077)));
}

#[test]
fn missing_output_path_fails_without_side_effects() {
    let platform = RecordingPlatform::posix();
    let mut attrs = regular();
    attrs.take_output_path();

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(!report.is_success());
    assert!(matches!(report.diagnostics(), [Diagnostic::NoTarget]));
    assert!(platform.calls().is_empty());
}

#[test]
fn size_mismatch_is_a_warning() {
    let dir = scratch_dir();
    let path = scratch_file(dir.path(), "short", b"");
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .open(&path)
        .expect("open");
    file.write_all(b"abc").expect("write");
    let mut handle = OutputFile::from_file(file);

    let platform = RecordingPlatform::posix();
    let mut attrs = RestoreAttributes::new(FileKind::Regular, &path).with_stat(StatRecord {
        size: 10,
        ..stat()
    });

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut handle);

    assert!(report.is_success());
    assert!(!handle.is_open());
    match report.diagnostics() {
        [Diagnostic::SizeMismatch {
            original, restored, ..
        }] => {
            assert_eq!(*original, 10);
            assert_eq!(*restored, 3);
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert_eq!(platform.mutations().len(), 3);
}

#[test]
fn size_check_ignores_directories_and_unknown_sizes() {
    let dir = scratch_dir();
    let path = scratch_file(dir.path(), "file", b"abc");
    let platform = RecordingPlatform::posix();

    for (kind, size) in [(FileKind::Directory, 10), (FileKind::Regular, 0)] {
        let handle_file = std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .expect("open");
        let mut handle = OutputFile::from_file(handle_file);
        let mut attrs =
            RestoreAttributes::new(kind, &path).with_stat(StatRecord { size, ..stat() });

        let report = AttributeApplicator::new(&platform, Identity::superuser())
            .apply(&mut attrs, &mut handle);
        assert!(report.diagnostics().is_empty(), "{kind}");
    }
}

#[test]
fn fork_only_record_is_a_no_op_on_forkless_hosts() {
    let fork = encode(&AttributeRecord::with_resource_fork(512), AttributeLayout::ResourceFork);
    let platform = RecordingPlatform::posix();
    let mut attrs = regular().with_extended(fork);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(report.diagnostics().is_empty());
    assert_eq!(platform.mutations(), generic_calls(true));
    assert!(attrs.extended.is_empty());
}

#[test]
fn fork_length_mismatch_is_a_warning_on_fork_hosts() {
    let fork = encode(&AttributeRecord::with_resource_fork(512), AttributeLayout::ResourceFork);
    let platform = RecordingPlatform::darwin().with_fork_len(100);
    let mut attrs = regular().with_extended(fork);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(matches!(
        report.diagnostics(),
        [Diagnostic::ForkLengthMismatch {
            original: 512,
            restored: 100,
            ..
        }]
    ));
}

#[test]
fn native_record_short_circuits_generic_path() {
    let encoded = encode(&AttributeRecord::with_native(native_record()), AttributeLayout::Native);
    let platform = RecordingPlatform::windows();
    let mut attrs = regular().with_extended(encoded);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert_eq!(
        platform.calls(),
        vec![Call::ApplyNative {
            path: PathBuf::from(TARGET),
            attrs: native_record(),
        }]
    );
    assert!(attrs.is_consumed());
}

#[test]
fn native_step_failures_are_reported_but_authoritative() {
    let encoded = encode(&AttributeRecord::with_native(native_record()), AttributeLayout::Native);
    let platform = RecordingPlatform::windows()
        .failing(Operation::ApplyNative, io::ErrorKind::PermissionDenied);
    let mut attrs = regular().with_extended(encoded);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(matches!(report.diagnostics(), [Diagnostic::Native(_)]));
    assert_eq!(platform.mutations().len(), 1);
}

#[test]
fn unavailable_native_api_falls_back_to_generic() {
    let encoded = encode(&AttributeRecord::with_native(native_record()), AttributeLayout::Native);
    let platform = RecordingPlatform::windows().native_unavailable();
    let mut attrs = regular().with_extended(encoded);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert_eq!(platform.mutations(), generic_calls(true));
}

#[test]
fn empty_native_blob_falls_back_to_generic() {
    let platform = RecordingPlatform::windows();
    let mut attrs = regular();
    attrs.attribute_stream = attribs::AttributeStream::UnixAttributesEx;

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert_eq!(platform.mutations(), generic_calls(true));
}

#[test]
fn wrong_field_count_warns_and_continues() {
    let fork = encode(&AttributeRecord::with_resource_fork(512), AttributeLayout::ResourceFork);
    let platform = RecordingPlatform::windows();
    let mut attrs = regular().with_extended(fork);
    attrs.attribute_stream = attribs::AttributeStream::UnixAttributesEx;

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    assert!(matches!(report.diagnostics(), [Diagnostic::FieldCount { .. }]));
    assert_eq!(platform.mutations(), generic_calls(true));
}

#[test]
fn native_data_streams_need_no_attribute_restore() {
    for tag in [
        StreamTag::NativeData,
        StreamTag::NativeGzipData,
        StreamTag::NativeCompressedData,
        StreamTag::EncryptedNativeData,
    ] {
        let platform = RecordingPlatform::windows();
        let mut attrs = regular().with_data_stream(tag);

        let report = AttributeApplicator::new(&platform, Identity::superuser())
            .apply(&mut attrs, &mut OutputFile::closed());

        assert!(report.is_success(), "{tag}");
        assert!(platform.calls().is_empty(), "{tag}");
        assert!(attrs.is_consumed(), "{tag}");
    }
}

#[test]
fn native_data_streams_on_portable_hosts_use_generic_path() {
    let platform = RecordingPlatform::posix();
    let mut attrs = regular().with_data_stream(StreamTag::NativeData);

    AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert_eq!(platform.mutations(), generic_calls(true));
}

#[cfg(unix)]
#[test]
fn unseekable_handle_skips_only_the_size_check() {
    use std::os::fd::OwnedFd;

    let (_reader, writer) = std::io::pipe().expect("pipe");
    let mut handle = OutputFile::from_file(std::fs::File::from(OwnedFd::from(writer)));
    let platform = RecordingPlatform::posix();
    let fifo = StatRecord {
        mode: 0o010_640,
        ..stat()
    };
    let mut attrs = RestoreAttributes::new(FileKind::Special, TARGET).with_stat(fifo);

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut handle);

    assert!(report.is_success(), "{:?}", report.diagnostics());
    assert!(!handle.is_open());
    match report.diagnostics() {
        [diagnostic @ Diagnostic::Measure { .. }] => assert!(diagnostic.is_warning()),
        other => panic!("unexpected diagnostics: {other:?}"),
    }

    let mut expected = generic_calls(true);
    expected[1] = Call::SetMode {
        path: PathBuf::from(TARGET),
        mode: 0o010_640,
    };
    assert_eq!(platform.mutations(), expected);
}

#[test]
fn unsupported_owner_change_does_not_fail_generic_fallback() {
    let platform = RecordingPlatform::windows()
        .native_unavailable()
        .failing(Operation::SetOwner, io::ErrorKind::Unsupported);
    let mut attrs = regular().with_extended(encode(
        &AttributeRecord::with_native(native_record()),
        AttributeLayout::Native,
    ));

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success(), "{:?}", report.diagnostics());
    assert!(report.diagnostics().is_empty());
    assert_eq!(platform.mutations(), generic_calls(true));
}

#[test]
fn surplus_fields_still_supply_the_fork_length() {
    let platform = RecordingPlatform::darwin().with_fork_len(100);
    let mut attrs = regular();
    attrs.extended = "BAA B".to_owned();

    let report = AttributeApplicator::new(&platform, Identity::superuser())
        .apply(&mut attrs, &mut OutputFile::closed());

    assert!(report.is_success());
    match report.diagnostics() {
        [
            Diagnostic::FieldCount { .. },
            Diagnostic::ForkLengthMismatch {
                original, restored, ..
            },
        ] => {
            assert_eq!(*original, 4096);
            assert_eq!(*restored, 100);
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
    assert!(
        platform
            .calls()
            .contains(&Call::ResourceForkLen(PathBuf::from(TARGET)))
    );
}
