use stream::{
    CompressionAlgorithm, DataBackend, FileKind, OptionFlags, StreamSelector, StreamTag,
    select_stream,
};

fn every_flag_combination() -> Vec<OptionFlags> {
    let mut all = Vec::new();
    for bits in 0u8..16 {
        all.push(OptionFlags {
            sparse: bits & 1 != 0,
            offsets: bits & 2 != 0,
            compress: bits & 4 != 0,
            encrypt: bits & 8 != 0,
        });
    }
    all
}

fn selectors() -> Vec<StreamSelector> {
    let mut all = Vec::new();
    for compatible in [false, true] {
        for algorithm in CompressionAlgorithm::ALL {
            all.push(
                StreamSelector::new()
                    .compatible(compatible)
                    .algorithm(algorithm),
            );
        }
    }
    all
}

#[test]
fn legacy_gzip_in_compatible_mode_selects_gzip_file_data() {
    let mut flags = OptionFlags::NONE.with_compress();
    let selection = select_stream(
        FileKind::Regular,
        &mut flags,
        DataBackend::Portable,
        true,
        CompressionAlgorithm::Gzip,
    );

    assert_eq!(selection.tag(), StreamTag::GzipFileData);
    assert_eq!(selection.tag().name(), "compressed-gzip-file-data");
    assert!(!flags.sparse);
    assert!(!flags.encrypt);
    assert!(flags.compress);
    assert!(selection.dropped().is_empty());
}

#[cfg(feature = "crypto")]
#[test]
fn sparse_and_encrypt_yield_encrypted_file_data() {
    let mut flags = OptionFlags::NONE.with_sparse().with_encrypt();
    let selection = select_stream(
        FileKind::Regular,
        &mut flags,
        DataBackend::Portable,
        false,
        CompressionAlgorithm::Gzip,
    );

    assert_eq!(selection.tag(), StreamTag::EncryptedFileData);
    assert_eq!(flags, OptionFlags::NONE.with_encrypt());
    assert_eq!(selection.dropped(), OptionFlags::NONE.with_sparse());
}

#[test]
fn encryption_always_clears_sparse() {
    for selector in selectors() {
        for kind in FileKind::ALL {
            if kind == FileKind::RestoreObject {
                continue;
            }
            for backend in [DataBackend::Portable, DataBackend::Native] {
                let mut flags = OptionFlags::NONE.with_sparse().with_encrypt();
                let selection = selector.select(kind, backend, &mut flags);
                assert!(!flags.sparse, "{kind} {backend:?}");
                assert!(!selection.tag().is_sparse(), "{kind} {backend:?}");
            }
        }
    }
}

#[test]
fn selection_is_idempotent() {
    for selector in selectors() {
        for kind in FileKind::ALL {
            for backend in [DataBackend::Portable, DataBackend::Native] {
                for requested in every_flag_combination() {
                    let mut first_flags = requested;
                    let mut second_flags = requested;
                    let first = selector.select(kind, backend, &mut first_flags);
                    let second = selector.select(kind, backend, &mut second_flags);
                    assert_eq!(first, second);
                    assert_eq!(first_flags, second_flags);
                }
            }
        }
    }
}

#[test]
fn selection_never_reenables_options() {
    for selector in selectors() {
        for kind in FileKind::ALL {
            for backend in [DataBackend::Portable, DataBackend::Native] {
                for requested in every_flag_combination() {
                    let mut flags = requested;
                    let selection = selector.select(kind, backend, &mut flags);
                    assert!(flags.difference(requested).is_empty());
                    assert_eq!(selection.dropped(), requested.difference(flags));
                    assert!(selection.fault().is_none(), "{kind} {requested}");
                }
            }
        }
    }
}

#[test]
fn compression_naming_follows_mode_and_algorithm() {
    for selector in selectors() {
        for kind in [FileKind::Regular, FileKind::Special, FileKind::Directory] {
            for backend in [DataBackend::Portable, DataBackend::Native] {
                for requested in every_flag_combination() {
                    let mut flags = requested;
                    let tag = selector.select(kind, backend, &mut flags).tag();
                    if !flags.compress {
                        assert!(!tag.is_gzip() && !tag.is_compressed(), "{tag}");
                        continue;
                    }
                    let legacy = selector.is_compatible()
                        && selector.compression_algorithm() == CompressionAlgorithm::Gzip;
                    assert_eq!(tag.name().contains("gzip"), legacy, "{tag}");
                    assert_eq!(tag.is_compressed(), !legacy, "{tag}");
                }
            }
        }
    }
}

#[test]
fn restore_objects_clear_everything() {
    let mut flags = OptionFlags::NONE
        .with_sparse()
        .with_offsets()
        .with_compress()
        .with_encrypt();
    let selection =
        StreamSelector::new().select(FileKind::RestoreObject, DataBackend::Native, &mut flags);

    assert_eq!(selection.tag(), StreamTag::FileData);
    assert!(flags.is_empty());
}

#[test]
fn native_backend_drops_sparse() {
    let mut flags = OptionFlags::NONE.with_sparse().with_compress();
    let selection = StreamSelector::new().select(FileKind::Regular, DataBackend::Native, &mut flags);

    assert_eq!(selection.tag(), StreamTag::NativeCompressedData);
    assert_eq!(selection.dropped(), OptionFlags::NONE.with_sparse());
}

#[test]
fn offsets_force_sparse_and_block_encryption() {
    let mut flags = OptionFlags::NONE.with_offsets().with_encrypt();
    let selection = StreamSelector::new().select(FileKind::Regular, DataBackend::Native, &mut flags);

    assert_eq!(selection.tag(), StreamTag::SparseData);
    assert!(flags.offsets);
    assert!(!flags.encrypt);
}

#[test]
fn resource_forks_are_never_compressed() {
    let mut flags = OptionFlags::NONE.with_compress().with_sparse();
    let selection = StreamSelector::new()
        .compatible(true)
        .select(FileKind::ResourceFork, DataBackend::Portable, &mut flags);

    assert_eq!(selection.tag(), StreamTag::ResourceForkData);
    assert!(flags.is_empty());
}

#[cfg(feature = "crypto")]
#[test]
fn encrypted_compressed_native_data() {
    let mut flags = OptionFlags::NONE.with_compress().with_encrypt();
    let selection = StreamSelector::new()
        .algorithm(CompressionAlgorithm::Lz4)
        .select(FileKind::Regular, DataBackend::Native, &mut flags);

    assert_eq!(selection.tag(), StreamTag::EncryptedNativeCompressedData);
}

#[test]
fn disabled_encryption_drops_the_request() {
    let mut flags = OptionFlags::NONE.with_encrypt();
    let selection = StreamSelector::new()
        .encryption_supported(false)
        .select(FileKind::Regular, DataBackend::Portable, &mut flags);

    assert_eq!(selection.tag(), StreamTag::FileData);
    assert_eq!(selection.dropped(), OptionFlags::NONE.with_encrypt());
}
