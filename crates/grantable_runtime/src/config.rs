//! Configuration for descriptor loading and the in-memory backends.

/// What the loader does with a token that fails to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and keep going with the next token.
    #[default]
    Skip,
    /// Stop at the first failure and report it.
    Abort,
}

/// Configuration for [`RewardLoader`](crate::RewardLoader).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Handling of bad tokens.
    pub policy: FailurePolicy,

    /// Whether an empty descriptor is acceptable.
    pub allow_empty: bool,

    /// Emit a `warn!` event for every skipped token.
    pub log_failures: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

impl LoaderConfig {
    /// Skips bad tokens and logs them.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            policy: FailurePolicy::Skip,
            allow_empty: true,
            log_failures: true,
        }
    }

    /// Aborts on the first bad token and rejects empty descriptors.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            policy: FailurePolicy::Abort,
            allow_empty: false,
            log_failures: true,
        }
    }

    /// Builder method to set the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder method to allow or reject empty descriptors.
    #[must_use]
    pub fn with_allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Builder method to enable/disable failure logging.
    #[must_use]
    pub fn with_log_failures(mut self, log: bool) -> Self {
        self.log_failures = log;
        self
    }
}

/// Configuration for the in-memory inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Number of slots per recipient.
    pub slots: usize,

    /// Largest amount a single slot holds.
    pub max_stack: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slots: 36,
            max_stack: 64,
        }
    }
}

impl InventoryConfig {
    /// Builder method to set the slot count.
    #[must_use]
    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    /// Builder method to set the stack limit. Zero is treated as one.
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }
}
