//! Session state for the REPL.
//!
//! The session owns the registry, an in-memory backend, the current
//! recipient, and the rewards queued from loaded files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use grantable_foundation::{Error, ErrorKind, Result};
use grantable_language::{
    Capabilities, Grant, Grantable, GrantableRegistry, KindInfo, Recipient, parse_with,
};

use crate::config::LoaderConfig;
use crate::loader::{LoadReport, RewardLoader, join_lines};
use crate::memory::MemoryBackend;
use crate::rewards::{GrantOutcome, RewardManager};

/// Which capability call to make against the recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// [`Grant::grant`]
    Grant,
    /// [`Grant::take`]
    Take,
    /// [`Grant::has`]
    Has,
}

/// Session state for an interactive REPL session.
pub struct Session {
    registry: GrantableRegistry,
    backend: Arc<MemoryBackend>,
    capabilities: Capabilities,
    recipient: Recipient,
    rewards: RewardManager,
    loader_config: LoaderConfig,
}

impl Session {
    /// Creates a session over the standard catalog, acting as `player`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Creates a session over the given backend.
    #[must_use]
    pub fn with_backend(backend: Arc<MemoryBackend>) -> Self {
        Self {
            registry: GrantableRegistry::default(),
            capabilities: backend.capabilities(),
            backend,
            recipient: Recipient::new("player"),
            rewards: RewardManager::new(),
            loader_config: LoaderConfig::default(),
        }
    }

    /// Builder method to set the loader configuration.
    #[must_use]
    pub fn with_loader_config(mut self, config: LoaderConfig) -> Self {
        self.loader_config = config;
        self
    }

    /// The registry descriptors are parsed against.
    #[must_use]
    pub fn registry(&self) -> &GrantableRegistry {
        &self.registry
    }

    /// The in-memory backend.
    #[must_use]
    pub fn backend(&self) -> &MemoryBackend {
        &self.backend
    }

    /// The current recipient.
    #[must_use]
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Switches the current recipient.
    pub fn set_recipient(&mut self, name: &str) {
        self.recipient = Recipient::new(name);
    }

    /// Parses a descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer or dispatch error.
    pub fn parse(&self, descriptor: &str) -> Result<Vec<Grantable>> {
        parse_with(&self.registry, descriptor)
    }

    /// Parses a token as the named kind.
    ///
    /// # Errors
    ///
    /// See [`GrantableRegistry::parse_as`].
    pub fn parse_as(&self, kind: &str, token: &str) -> Result<Grantable> {
        self.registry.parse_as(kind, token)
    }

    /// Parses a descriptor and runs `action` on every grantable against the
    /// current recipient.
    ///
    /// # Errors
    ///
    /// Returns the first parse error; nothing is executed in that case.
    pub fn execute(&self, action: Action, descriptor: &str) -> Result<Vec<(Grantable, bool)>> {
        let grantables = self.parse(descriptor)?;
        Ok(grantables
            .into_iter()
            .map(|g| {
                let ok = match action {
                    Action::Grant => g.grant(&self.capabilities, &self.recipient),
                    Action::Take => g.take(&self.capabilities, &self.recipient),
                    Action::Has => g.has(&self.capabilities, &self.recipient),
                };
                (g, ok)
            })
            .collect())
    }

    /// Every registered kind.
    #[must_use]
    pub fn kinds(&self) -> Vec<KindInfo> {
        self.registry.kinds()
    }

    /// Loads a reward file and queues its rewards for the current recipient.
    ///
    /// Each non-blank line is one descriptor fragment; the lines are joined
    /// into a single descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the loader rejects it.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Internal(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        })?;
        let lines: Vec<&str> = text.lines().collect();
        self.load_descriptor(&path.display().to_string(), &join_lines(&lines))
    }

    /// Loads a descriptor and queues its rewards for the current recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the loader rejects the descriptor.
    pub fn load_descriptor(&mut self, source: &str, descriptor: &str) -> Result<LoadReport> {
        let loader = RewardLoader::with_registry(&self.registry, self.loader_config.clone());
        let report = loader.load(source, descriptor)?;
        for grantable in &report.grantables {
            self.rewards.add_reward(&self.recipient, grantable.clone());
        }
        Ok(report)
    }

    /// Rewards queued for the current recipient.
    #[must_use]
    pub fn pending_rewards(&self) -> &[Grantable] {
        self.rewards.rewards_for(&self.recipient)
    }

    /// Grants queued rewards to the current recipient.
    pub fn claim_rewards(&mut self) -> GrantOutcome {
        self.rewards.grant_rewards(&self.capabilities, &self.recipient)
    }

    /// Forgets every queued reward.
    pub fn reset_rewards(&mut self) {
        self.rewards.reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
