//! Error types for grantable descriptors.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for descriptor parsing and kind registration.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the token being parsed when the error occurred.
    ///
    /// The innermost token wins; tokens recorded later (by enclosing groups)
    /// are pushed as frames instead.
    #[must_use]
    pub fn in_token(mut self, token: &str) -> Self {
        match &mut self.context {
            Some(ctx) if ctx.token.is_some() => ctx.stack.push(format!("group {token}")),
            Some(ctx) => ctx.token = Some(token.to_string()),
            None => self.context = Some(ErrorContext::new().with_token(token)),
        }
        self
    }

    /// Creates a malformed group error (unmatched or misplaced parenthesis).
    #[must_use]
    pub fn malformed_group(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self::new(ErrorKind::MalformedGroup {
            message: message.into(),
            position,
            input: input.to_string(),
        })
    }

    /// Creates an unknown kind error.
    #[must_use]
    pub fn unknown_kind(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownKind {
            token: token.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid value error for one field of a value grammar.
    #[must_use]
    pub fn invalid_value(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidValue {
            field,
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyInput { what: what.into() })
    }

    /// Returns true if this is a registration error.
    #[must_use]
    pub fn is_registration(&self) -> bool {
        matches!(self.kind, ErrorKind::Registration(_))
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Self::new(ErrorKind::Registration(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Unmatched or misplaced parenthesis in a descriptor.
    #[error("malformed group at {position}: {message}")]
    MalformedGroup {
        /// Description of the problem.
        message: String,
        /// Byte offset into the (trimmed) input.
        position: usize,
        /// The input that was being tokenized.
        input: String,
    },

    /// No registered kind matched and the default item grammar failed too.
    #[error("unknown grantable '{token}': {reason}")]
    UnknownKind {
        /// The offending token.
        token: String,
        /// Why the fallback item grammar rejected it.
        reason: String,
    },

    /// A token body failed its kind's grammar.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidValue {
        /// Which part of the grammar rejected the value (e.g. `amount`).
        field: &'static str,
        /// The rejected text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An empty token or body where a value is required.
    #[error("empty {what}")]
    EmptyInput {
        /// What was expected.
        what: String,
    },

    /// Invalid kind metadata at registration time.
    #[error("registration failed: {0}")]
    Registration(RegistrationError),

    /// Internal error (terminal or line-editor failures).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Reasons a kind registration is rejected.
///
/// Registration is atomic: when any of these is returned, nothing was installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The kind name was empty.
    #[error("kind name cannot be empty")]
    EmptyName,

    /// Neither a symbol nor a keyword prefix was given.
    #[error("kind '{kind}' needs a symbol or a prefix")]
    MissingPattern {
        /// The kind being registered.
        kind: String,
    },

    /// The keyword prefix has an unmatched parenthesis.
    #[error("unmatched {} parenthesis in prefix '{prefix}' at {position}", paren_side(.open))]
    UnbalancedPrefix {
        /// The keyword prefix expression.
        prefix: String,
        /// Byte offset of the offending parenthesis.
        position: usize,
        /// True for an unclosed `(`, false for a stray `)`.
        open: bool,
    },

    /// The keyword prefix contains a character outside the supported set.
    #[error("invalid character '{ch}' in prefix '{prefix}'")]
    InvalidPrefixChar {
        /// The keyword prefix expression.
        prefix: String,
        /// The offending character.
        ch: char,
    },

    /// The keyword prefix could match the empty string.
    #[error("prefix '{prefix}' must start with a required character")]
    OptionalOnlyPrefix {
        /// The keyword prefix expression.
        prefix: String,
    },

    /// The shorthand symbol is a reserved grammar character.
    #[error("{class} are invalid parser symbols: {symbol:?}")]
    ReservedSymbol {
        /// The rejected symbol.
        symbol: char,
        /// Which reserved class it belongs to.
        class: SymbolClass,
    },

    /// The compiled pattern was rejected by the regex engine.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

fn paren_side(open: &bool) -> &'static str {
    if *open { "open" } else { "close" }
}

/// Classes of characters that cannot serve as shorthand symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// Letters and digits.
    Alphanumeric,
    /// Quotes and ticks.
    Quote,
    /// Parentheses, brackets, and braces.
    Bracket,
    /// Slashes and pipes.
    Slash,
    /// Commas, colons, semicolons, whitespace, and control characters.
    Delimiter,
}

impl SymbolClass {
    /// Classifies a candidate symbol, returning `None` if it is allowed.
    #[must_use]
    pub fn of(symbol: char) -> Option<Self> {
        match symbol {
            c if c.is_alphanumeric() => Some(Self::Alphanumeric),
            '\'' | '"' | '`' | '\u{b4}' => Some(Self::Quote),
            '(' | ')' | '[' | ']' | '{' | '}' => Some(Self::Bracket),
            '/' | '\\' | '|' => Some(Self::Slash),
            ',' | ':' | ';' => Some(Self::Delimiter),
            c if c.is_whitespace() || c.is_control() => Some(Self::Delimiter),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alphanumeric => "alphanumeric symbols",
            Self::Quote => "quotes and ticks",
            Self::Bracket => "parentheses, brackets, and braces",
            Self::Slash => "slashes and pipes",
            Self::Delimiter => "delimiters and whitespace",
        };
        f.write_str(name)
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The token that failed to parse.
    pub token: Option<String>,
    /// Enclosing groups, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offending token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            write!(f, "in '{token}'")?;
        }
        for frame in &self.stack {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}
