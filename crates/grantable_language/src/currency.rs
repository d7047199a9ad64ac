//! Currency grammar: `$<amount>`, `eco:<amount>`, `economy:<amount>`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use grantable_foundation::{Error, Result};

use crate::capability::{Capabilities, Recipient};
use crate::grantable::Grant;
use crate::pattern::{CompiledPattern, PatternSpec};

/// Registration metadata for the currency kind.
#[must_use]
pub fn pattern_spec() -> PatternSpec {
    PatternSpec::new().with_symbol('$').with_prefix("eco(nomy)")
}

pub(crate) static PATTERN: LazyLock<CompiledPattern> = LazyLock::new(|| {
    pattern_spec()
        .compile("currency")
        .expect("currency pattern is valid")
});

/// An amount of economy money.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Currency {
    amount: f64,
}

impl Currency {
    /// Creates a currency value.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// The amount.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.amount
    }

    /// Parses a currency token, with or without its `$`/`eco:` prefix.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty amount and `InvalidValue` for
    /// anything that is not a finite decimal number.
    pub fn parse(token: &str) -> Result<Self> {
        Self::parse_body(PATTERN.trim(token.trim()))
    }

    /// Parses a currency body (prefix already stripped).
    ///
    /// # Errors
    ///
    /// See [`Currency::parse`].
    pub fn parse_body(body: &str) -> Result<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::empty_input("currency value"));
        }
        let amount: f64 = body
            .parse()
            .map_err(|_| Error::invalid_value("currency", body, "not a decimal number"))?;
        if !amount.is_finite() {
            return Err(Error::invalid_value("currency", body, "not a finite number"));
        }
        Ok(Self::new(amount))
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Grant for Currency {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.economy()
            .is_some_and(|eco| eco.deposit(recipient, self.amount))
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.economy()
            .is_some_and(|eco| eco.withdraw(recipient, self.amount))
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.economy()
            .is_some_and(|eco| eco.has(recipient, self.amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.amount)
    }
}
