//! Per-file option toggles requested by the backup job.

use core::fmt;

/// Options requested for one file.
///
/// Selection clears options that cannot apply to the file; whatever is still
/// set afterwards is what the data producer must honour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionFlags {
    /// Encode only non-hole ranges.
    pub sparse: bool,
    /// Prefix each block with its file offset.
    pub offsets: bool,
    /// Compress the data.
    pub compress: bool,
    /// Encrypt the data.
    pub encrypt: bool,
}

impl OptionFlags {
    /// No options.
    pub const NONE: Self = Self {
        sparse: false,
        offsets: false,
        compress: false,
        encrypt: false,
    };

    /// Requests sparse encoding.
    #[must_use]
    pub const fn with_sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    /// Requests offset encoding.
    #[must_use]
    pub const fn with_offsets(mut self) -> Self {
        self.offsets = true;
        self
    }

    /// Requests compression.
    #[must_use]
    pub const fn with_compress(mut self) -> Self {
        self.compress = true;
        self
    }

    /// Requests encryption.
    #[must_use]
    pub const fn with_encrypt(mut self) -> Self {
        self.encrypt = true;
        self
    }

    /// Options set in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            sparse: self.sparse && !other.sparse,
            offsets: self.offsets && !other.offsets,
            compress: self.compress && !other.compress,
            encrypt: self.encrypt && !other.encrypt,
        }
    }

    /// Reports whether no option is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.sparse || self.offsets || self.compress || self.encrypt)
    }
}

impl fmt::Display for OptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names = [
            (self.sparse, "sparse"),
            (self.offsets, "offsets"),
            (self.compress, "compress"),
            (self.encrypt, "encrypt"),
        ];
        let mut first = true;
        for (_, name) in names.iter().filter(|(set, _)| *set) {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
