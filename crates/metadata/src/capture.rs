//! Backup-side capture of extended attributes.

use std::path::Path;

use attribs::{AttributeLayout, AttributeRecord, EncodedAttributes, encode};
use logging::{targets, trace_capture};
use platform::Platform;
use stream::FileKind;

/// Captures and encodes the extended attributes of `path` in the layout of
/// `platform`.
///
/// Plugin-produced files and deleted placeholders carry no extended
/// attributes. A failed capture is logged and degrades to the empty record.
pub fn capture_attributes<P: Platform + ?Sized>(
    platform: &P,
    kind: FileKind,
    from_plugin: bool,
    path: &Path,
) -> EncodedAttributes {
    if from_plugin || kind == FileKind::Deleted {
        return EncodedAttributes::empty();
    }

    let layout = platform.capabilities().attribute_layout();
    let captured = match layout {
        AttributeLayout::Native => platform
            .capture_native(path)
            .map(|native| native.map(AttributeRecord::with_native)),
        AttributeLayout::ResourceFork if kind == FileKind::Regular => platform
            .resource_fork_len(path)
            .map(|length| length.map(AttributeRecord::with_resource_fork)),
        AttributeLayout::ResourceFork | AttributeLayout::Portable => Ok(None),
    };

    let record = match captured {
        Ok(record) => record.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(
                target: targets::CAPTURE,
                "unable to read extended attributes of {}: {error}",
                path.display()
            );
            return EncodedAttributes::empty();
        }
    };

    let encoded = encode(&record, layout);
    trace_capture!(
        stream = %encoded.stream,
        blob = %encoded.blob,
        "captured attributes of {}",
        path.display()
    );
    encoded
}
