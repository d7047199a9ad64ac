//! Kind prefix patterns.
//!
//! A kind is recognized by a one-character shorthand symbol (`$5`) and/or a
//! keyword prefix followed by a colon (`eco:5`). Keyword prefixes are written
//! as expressions with optional parts in parentheses: `p(erm(ission))`
//! matches `p`, `perm`, and `permission`.

use regex::Regex;

use grantable_foundation::{RegistrationError, SymbolClass};

/// Registration metadata for a kind: its symbol and keyword expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSpec {
    /// Shorthand symbol written directly before the body.
    pub symbol: Option<char>,
    /// Keyword expression written before a colon.
    pub prefix: Option<String>,
}

impl PatternSpec {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shorthand symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Sets the keyword expression.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Checks the symbol and keyword expression.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a missing pattern, a reserved symbol,
    /// an unbalanced or otherwise invalid keyword expression.
    pub fn validate(&self, kind: &str) -> Result<(), RegistrationError> {
        if self.symbol.is_none() && self.prefix.is_none() {
            return Err(RegistrationError::MissingPattern {
                kind: kind.to_string(),
            });
        }
        if let Some(symbol) = self.symbol {
            if let Some(class) = SymbolClass::of(symbol) {
                return Err(RegistrationError::ReservedSymbol { symbol, class });
            }
        }
        if let Some(prefix) = &self.prefix {
            validate_prefix(prefix)?;
        }
        Ok(())
    }

    /// Validates and compiles this spec.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if validation fails.
    pub fn compile(&self, kind: &str) -> Result<CompiledPattern, RegistrationError> {
        self.validate(kind)?;

        let mut alternatives = Vec::new();
        if let Some(symbol) = self.symbol {
            alternatives.push(format!("{}:?", regex::escape(&symbol.to_string())));
        }
        if let Some(prefix) = &self.prefix {
            alternatives.push(format!("(?:{}):", prefix_to_regex(prefix)));
        }
        let source = format!("^(?:{})(?s)(.*)$", alternatives.join("|"));

        let regex =
            Regex::new(&source).map_err(|e| RegistrationError::InvalidPattern(e.to_string()))?;
        Ok(CompiledPattern { regex })
    }
}

/// A compiled prefix pattern: `(symbol | keyword ':') body`.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Returns true if the token starts with this kind's prefix.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.regex.is_match(token)
    }

    /// Strips this kind's prefix, returning the trimmed body.
    ///
    /// Returns `None` if the token does not start with the prefix.
    #[must_use]
    pub fn strip<'a>(&self, token: &'a str) -> Option<&'a str> {
        self.regex
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|body| body.as_str().trim())
    }

    /// Strips the prefix if present, otherwise returns the token unchanged.
    #[must_use]
    pub fn trim<'a>(&self, token: &'a str) -> &'a str {
        self.strip(token).unwrap_or(token)
    }

    /// The regular expression this pattern compiled to.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn validate_prefix(prefix: &str) -> Result<(), RegistrationError> {
    let mut open = Vec::new();
    for (i, c) in prefix.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => {
                if open.pop().is_none() {
                    return Err(RegistrationError::UnbalancedPrefix {
                        prefix: prefix.to_string(),
                        position: i,
                        open: false,
                    });
                }
            }
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') => {}
            ch => {
                return Err(RegistrationError::InvalidPrefixChar {
                    prefix: prefix.to_string(),
                    ch,
                });
            }
        }
    }
    if let Some(&position) = open.last() {
        return Err(RegistrationError::UnbalancedPrefix {
            prefix: prefix.to_string(),
            position,
            open: true,
        });
    }
    if prefix.is_empty() || prefix.starts_with('(') {
        return Err(RegistrationError::OptionalOnlyPrefix {
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}

/// Rewrites `p(erm(ission))` as `p(?:erm(?:ission)?)?`.
fn prefix_to_regex(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() * 2);
    for c in prefix.chars() {
        match c {
            '(' => out.push_str("(?:"),
            ')' => out.push_str(")?"),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out
}
