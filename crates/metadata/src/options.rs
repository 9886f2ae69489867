/// How ownership, mode, time and flag changes are attempted when the restoring
/// identity is not privileged.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum PrivilegePolicy {
    /// Do not attempt the calls at all.
    #[default]
    SkipWhenUnprivileged,
    /// Attempt every call and ignore failures.
    AttemptQuietly,
}

/// Options that control attribute restore.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ApplyOptions {
    privilege_policy: PrivilegePolicy,
    verify_size: bool,
    verify_fork_length: bool,
}

impl ApplyOptions {
    /// Creates a new [`ApplyOptions`] value with defaults applied.
    ///
    /// By default unprivileged restores skip ownership and mode changes and
    /// both size checks are enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            privilege_policy: PrivilegePolicy::SkipWhenUnprivileged,
            verify_size: true,
            verify_fork_length: true,
        }
    }

    /// Selects how unprivileged restores treat ownership, mode and time changes.
    #[must_use]
    pub const fn privilege_policy(mut self, policy: PrivilegePolicy) -> Self {
        self.privilege_policy = policy;
        self
    }

    /// Requests a warning when the restored size differs from the recorded one.
    #[must_use]
    pub const fn verify_size(mut self, verify: bool) -> Self {
        self.verify_size = verify;
        self
    }

    /// Requests a warning when the restored resource fork length differs from
    /// the recorded one.
    #[must_use]
    pub const fn verify_fork_length(mut self, verify: bool) -> Self {
        self.verify_fork_length = verify;
        self
    }

    /// Returns the configured privilege policy.
    #[must_use]
    pub const fn policy(&self) -> PrivilegePolicy {
        self.privilege_policy
    }

    /// Reports whether restored sizes are checked.
    #[must_use]
    pub const fn verifies_size(&self) -> bool {
        self.verify_size
    }

    /// Reports whether restored resource fork lengths are checked.
    #[must_use]
    pub const fn verifies_fork_length(&self) -> bool {
        self.verify_fork_length
    }
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_unprivileged_and_verify() {
        let options = ApplyOptions::default();
        assert_eq!(options.policy(), PrivilegePolicy::SkipWhenUnprivileged);
        assert!(options.verifies_size());
        assert!(options.verifies_fork_length());
    }

    #[test]
    fn builder_overrides_each_setting() {
        let options = ApplyOptions::new()
            .privilege_policy(PrivilegePolicy::AttemptQuietly)
            .verify_size(false)
            .verify_fork_length(false);
        assert_eq!(options.policy(), PrivilegePolicy::AttemptQuietly);
        assert!(!options.verifies_size());
        assert!(!options.verifies_fork_length());
    }
}
