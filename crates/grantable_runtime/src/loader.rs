//! Loading reward descriptors out of configuration text.
//!
//! The grammar itself never logs and never recovers. The loader is where a
//! bad token is either skipped (and reported through `tracing`) or turned
//! into a failure for the whole descriptor, depending on [`LoaderConfig`].

use grantable_foundation::{Error, Result};
use grantable_language::{
    GrantableRegistry, Grantable, Item, ItemStack, Token, Tokenizer, global,
};
use tracing::{debug, warn};

use crate::config::{FailurePolicy, LoaderConfig};

/// A token the loader skipped.
#[derive(Debug)]
pub struct LoadFailure {
    /// The offending token text.
    pub token: String,
    /// Why it failed.
    pub error: Error,
}

/// Everything loaded from one descriptor.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Parsed grantables, in descriptor order.
    pub grantables: Vec<Grantable>,
    /// Tokens that were skipped.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Returns true if every token loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses descriptors according to a [`LoaderConfig`].
#[derive(Debug)]
pub struct RewardLoader<'r> {
    registry: &'r GrantableRegistry,
    config: LoaderConfig,
}

impl RewardLoader<'static> {
    /// Creates a loader over the global registry.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_registry(global(), config)
    }
}

impl<'r> RewardLoader<'r> {
    /// Creates a loader over the given registry.
    #[must_use]
    pub fn with_registry(registry: &'r GrantableRegistry, config: LoaderConfig) -> Self {
        Self { registry, config }
    }

    /// The loader's configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads every grantable in `descriptor`.
    ///
    /// `source` names where the descriptor came from (a config key or file)
    /// and is only used in log events and errors.
    ///
    /// # Errors
    ///
    /// Returns tokenizer errors, an `EmptyInput` error for an empty
    /// descriptor when empty ones are not allowed, and under
    /// [`FailurePolicy::Abort`] the first token error.
    pub fn load(&self, source: &str, descriptor: &str) -> Result<LoadReport> {
        let tokens = self.tokenize(source, descriptor)?;
        let mut report = LoadReport::default();

        for token in &tokens {
            match self.registry.dispatch_token(token) {
                Ok(grantable) => {
                    debug!(source, reward = %grantable, "loaded reward");
                    report.grantables.push(grantable);
                }
                Err(error) => self.reject(source, token, error, &mut report.failures)?,
            }
        }
        Ok(report)
    }

    /// Loads every token of `descriptor` as an item and converts it to a
    /// native stack.
    ///
    /// Failures follow the same policy as [`RewardLoader::load`]; skipped
    /// tokens are logged and dropped.
    ///
    /// # Errors
    ///
    /// See [`RewardLoader::load`].
    pub fn load_item_stacks(&self, source: &str, descriptor: &str) -> Result<Vec<ItemStack>> {
        let tokens = self.tokenize(source, descriptor)?;
        let mut stacks = Vec::with_capacity(tokens.len());
        let mut failures = Vec::new();

        for token in &tokens {
            match Item::parse(token.as_str(), self.registry.catalog()) {
                Ok(item) => stacks.push(item.to_stack()),
                Err(error) => {
                    self.reject(source, token, error.in_token(token.as_str()), &mut failures)?;
                }
            }
        }
        Ok(stacks)
    }

    fn tokenize(&self, source: &str, descriptor: &str) -> Result<Vec<Token>> {
        let tokens = Tokenizer::tokenize(descriptor).inspect_err(|error| {
            warn!(source, %error, "unreadable reward descriptor");
        })?;
        if tokens.is_empty() && !self.config.allow_empty {
            return Err(Error::empty_input(format!("rewards for {source}")));
        }
        Ok(tokens)
    }

    fn reject(
        &self,
        source: &str,
        token: &Token,
        error: Error,
        failures: &mut Vec<LoadFailure>,
    ) -> Result<()> {
        if self.config.policy == FailurePolicy::Abort {
            return Err(error);
        }
        if self.config.log_failures {
            warn!(source, token = token.as_str(), %error, "skipping bad reward");
        }
        failures.push(LoadFailure {
            token: token.to_string(),
            error,
        });
        Ok(())
    }
}

/// Renders stacks back into one descriptor, skipping empty stacks.
#[must_use]
pub fn describe_stacks<'a>(stacks: impl IntoIterator<Item = &'a ItemStack>) -> String {
    stacks
        .into_iter()
        .filter(|stack| stack.material.id != 0)
        .filter_map(|stack| Item::from_stack(stack).ok())
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Joins configuration lines into one descriptor, dropping blank lines.
#[must_use]
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
