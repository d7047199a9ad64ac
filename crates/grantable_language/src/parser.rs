//! Descriptor parser: tokenizes a descriptor once, then hands out grantables
//! one token at a time.

use std::collections::VecDeque;

use grantable_foundation::{Error, Result};

use crate::currency::Currency;
use crate::effect::Effect;
use crate::grantable::Grantable;
use crate::item::Item;
use crate::permission::Permission;
use crate::registry::{self, GrantableRegistry};
use crate::tokenizer::{Token, Tokenizer};

/// Pulls grantables out of a descriptor string.
///
/// ```
/// use grantable_language::GrantableParser;
///
/// let mut parser = GrantableParser::new("$5, diamond:2").unwrap();
/// assert_eq!(parser.next_currency().unwrap().value(), 5.0);
/// assert_eq!(parser.next_item().unwrap().amount(), 2);
/// assert!(!parser.has_next());
/// ```
#[derive(Debug)]
pub struct GrantableParser<'r> {
    registry: &'r GrantableRegistry,
    tokens: VecDeque<Token>,
}

impl GrantableParser<'static> {
    /// Tokenizes `input` against the global registry.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedGroup` error for unbalanced parentheses.
    pub fn new(input: &str) -> Result<Self> {
        Self::with_registry(registry::global(), input)
    }
}

impl<'r> GrantableParser<'r> {
    /// Tokenizes `input` against the given registry.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedGroup` error for unbalanced parentheses.
    pub fn with_registry(registry: &'r GrantableRegistry, input: &str) -> Result<Self> {
        Ok(Self {
            registry,
            tokens: Tokenizer::tokenize(input)?.into(),
        })
    }

    /// Returns true while tokens remain.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Number of tokens remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Dispatches the next token.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when no tokens remain, otherwise the dispatch
    /// error for the token. The token is consumed either way.
    pub fn next_grantable(&mut self) -> Result<Grantable> {
        let token = self.pop()?;
        self.registry.dispatch_token(&token)
    }

    /// Parses the next token as an item.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when no tokens remain, otherwise the item error.
    pub fn next_item(&mut self) -> Result<Item> {
        let token = self.pop()?;
        Item::parse(token.as_str(), self.registry.catalog()).map_err(|e| e.in_token(token.as_str()))
    }

    /// Parses the next token as currency; the prefix is optional.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when no tokens remain, otherwise the currency error.
    pub fn next_currency(&mut self) -> Result<Currency> {
        let token = self.pop()?;
        Currency::parse(token.as_str()).map_err(|e| e.in_token(token.as_str()))
    }

    /// Parses the next token as a permission; the prefix is optional.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when no tokens remain, otherwise the permission error.
    pub fn next_permission(&mut self) -> Result<Permission> {
        let token = self.pop()?;
        Permission::parse(token.as_str()).map_err(|e| e.in_token(token.as_str()))
    }

    /// Parses the next token as an effect; the prefix is optional.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when no tokens remain, otherwise the effect error.
    pub fn next_effect(&mut self) -> Result<Effect> {
        let token = self.pop()?;
        Effect::parse(token.as_str(), self.registry.catalog())
            .map_err(|e| e.in_token(token.as_str()))
    }

    /// Parses the next token as the named kind.
    ///
    /// # Errors
    ///
    /// See [`GrantableRegistry::parse_as`].
    pub fn next_as(&mut self, kind: &str) -> Result<Grantable> {
        let token = self.pop()?;
        self.registry.parse_as(kind, token.as_str())
    }

    fn pop(&mut self) -> Result<Token> {
        self.tokens
            .pop_front()
            .ok_or_else(|| Error::empty_input("descriptor"))
    }
}

impl Iterator for GrantableParser<'_> {
    type Item = Result<Grantable>;

    fn next(&mut self) -> Option<Self::Item> {
        self.has_next().then(|| self.next_grantable())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tokens.len(), Some(self.tokens.len()))
    }
}

/// Parses every token of a descriptor against the global registry.
///
/// # Errors
///
/// Returns the first tokenizer or dispatch error.
pub fn parse(input: &str) -> Result<Vec<Grantable>> {
    parse_with(registry::global(), input)
}

/// Parses every token of a descriptor against `registry`.
///
/// # Errors
///
/// Returns the first tokenizer or dispatch error.
pub fn parse_with(registry: &GrantableRegistry, input: &str) -> Result<Vec<Grantable>> {
    GrantableParser::with_registry(registry, input)?.collect()
}
