//! Group composite: `(a, b, ...)`.

use std::fmt;

use grantable_foundation::Result;

use crate::capability::{Capabilities, Recipient};
use crate::grantable::{Grant, Grantable};
use crate::registry::GrantableRegistry;
use crate::tokenizer::Tokenizer;

/// An ordered list of grantables handled as one.
///
/// `grant` and `take` visit every element even after a failure, and succeed
/// only if every element did. `has` stops at the first element missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    elements: Vec<Grantable>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a group token. The outer parentheses are optional.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer and dispatch errors from the inner text.
    pub fn parse(token: &str, registry: &GrantableRegistry) -> Result<Self> {
        let inner = token.trim();
        let inner = inner.strip_prefix('(').unwrap_or(inner);
        let inner = inner.strip_suffix(')').unwrap_or(inner);

        let elements = Tokenizer::tokenize(inner)?
            .iter()
            .map(|token| registry.dispatch_token(token))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    /// Appends an element.
    pub fn push(&mut self, grantable: impl Into<Grantable>) {
        self.elements.push(grantable.into());
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grantable> {
        self.elements.iter()
    }

    /// The elements.
    #[must_use]
    pub fn elements(&self) -> &[Grantable] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the group has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Grantable> for Group {
    fn from_iter<I: IntoIterator<Item = Grantable>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Grantable;
    type IntoIter = std::slice::Iter<'a, Grantable>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl Grant for Group {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.elements
            .iter()
            .fold(true, |ok, g| g.grant(caps, recipient) & ok)
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.elements
            .iter()
            .fold(true, |ok, g| g.take(caps, recipient) & ok)
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.elements.iter().all(|g| g.has(caps, recipient))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str(")")
    }
}
