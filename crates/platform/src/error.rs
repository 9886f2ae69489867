use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error produced when a metadata operation on the filesystem fails.
#[derive(Debug)]
pub struct MetadataError {
    context: &'static str,
    path: PathBuf,
    source: io::Error,
}

impl MetadataError {
    /// Creates a new [`MetadataError`] from the supplied context, path, and source error.
    pub fn new(context: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the operation being performed when the error occurred.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the path involved in the failing operation.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying [`io::Error`] that triggered this failure.
    #[must_use]
    pub fn source_error(&self) -> &io::Error {
        &self.source
    }

    /// Reports whether the failure was a permission problem.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.source.kind() == io::ErrorKind::PermissionDenied
    }

    /// Consumes the error and returns its constituent parts.
    #[must_use]
    pub fn into_parts(self) -> (&'static str, PathBuf, io::Error) {
        (self.context, self.path, self.source)
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to {} '{}': {}",
            self.context,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_operation_path_and_cause() {
        let err = MetadataError::new(
            "set file owner",
            Path::new("/restore/a.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "unable to set file owner '/restore/a.txt': denied"
        );
        assert!(err.is_permission_denied());
        assert!(err.source().is_some());
    }

    #[test]
    fn into_parts_returns_components() {
        let err = MetadataError::new(
            "set file modes",
            Path::new("x"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        let (context, path, source) = err.into_parts();
        assert_eq!(context, "set file modes");
        assert_eq!(path, PathBuf::from("x"));
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }
}
