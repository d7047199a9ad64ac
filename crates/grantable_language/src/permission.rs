//! Permission grammar: `#<node>`, `p:<node>`, `perm:<node>`, `permission:<node>`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use grantable_foundation::{Error, Result};

use crate::capability::{Capabilities, Recipient};
use crate::grantable::Grant;
use crate::pattern::{CompiledPattern, PatternSpec};

/// Registration metadata for the permission kind.
#[must_use]
pub fn pattern_spec() -> PatternSpec {
    PatternSpec::new().with_symbol('#').with_prefix("p(erm(ission))")
}

pub(crate) static PATTERN: LazyLock<CompiledPattern> = LazyLock::new(|| {
    pattern_spec()
        .compile("permission")
        .expect("permission pattern is valid")
});

/// A permission node, stored verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permission {
    node: String,
}

impl Permission {
    /// Creates a permission.
    #[must_use]
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    /// The permission node.
    #[must_use]
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Parses a permission token, with or without its prefix.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if nothing follows the prefix.
    pub fn parse(token: &str) -> Result<Self> {
        Self::parse_body(PATTERN.trim(token.trim()))
    }

    /// Parses a permission body (prefix already stripped).
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty body.
    pub fn parse_body(body: &str) -> Result<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::empty_input("permission"));
        }
        Ok(Self::new(body))
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Grant for Permission {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.permissions()
            .is_some_and(|perms| perms.add(recipient, &self.node))
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.permissions()
            .is_some_and(|perms| perms.remove(recipient, &self.node))
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.permissions()
            .is_some_and(|perms| perms.has(recipient, &self.node))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.node)
    }
}
