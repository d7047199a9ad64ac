//! Descriptor tokenization.
//!
//! Splits a raw descriptor into top-level tokens on commas. A parenthesized
//! group is kept whole, commas and nested groups included.

use std::fmt;

use grantable_foundation::{Error, Result};

/// Deepest group nesting a descriptor may use.
pub const MAX_GROUP_DEPTH: usize = 64;

/// A top-level token of a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A trimmed token with no enclosing parentheses.
    Plain(String),
    /// A group token, including its outer `(` and `)`.
    Group(String),
}

impl Token {
    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Group(s) => s,
        }
    }

    /// Returns true for a group token.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokenizes descriptor strings.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes a descriptor into its top-level tokens.
    ///
    /// - Tokens are trimmed; empty tokens are dropped
    /// - A token starting with `(` runs to its balancing `)`
    /// - Only whitespace may follow a group before the next comma
    /// - Groups nest at most [`MAX_GROUP_DEPTH`] levels
    ///
    /// # Errors
    ///
    /// Returns a `MalformedGroup` error for unbalanced parentheses, for
    /// text trailing a group, or for nesting past [`MAX_GROUP_DEPTH`].
    pub fn tokenize(input: &str) -> Result<Vec<Token>> {
        let input = input.trim();
        Self::check_depth(input)?;
        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] == b'(' {
                let close = Self::matching_close(input, pos)?;
                tokens.push(Token::Group(input[pos..=close].to_string()));

                // Only whitespace may sit between the group and the comma
                let next = skip_whitespace(bytes, close + 1);
                if next < bytes.len() && bytes[next] != b',' {
                    return Err(Error::malformed_group(
                        "unexpected text after group",
                        next,
                        input,
                    ));
                }
                pos = next + 1;
            } else {
                let end = Self::plain_end(input, pos)?;
                let token = input[pos..end].trim();
                if !token.is_empty() {
                    tokens.push(Token::Plain(token.to_string()));
                }
                pos = end + 1;
            }

            pos = skip_whitespace(bytes, pos);
        }

        Ok(tokens)
    }

    /// Rejects input whose groups nest past [`MAX_GROUP_DEPTH`].
    fn check_depth(input: &str) -> Result<()> {
        let mut depth = 0usize;
        for (i, b) in input.bytes().enumerate() {
            match b {
                b'(' => {
                    depth += 1;
                    if depth > MAX_GROUP_DEPTH {
                        return Err(Error::malformed_group(
                            format!("groups nested deeper than {MAX_GROUP_DEPTH}"),
                            i,
                            input,
                        ));
                    }
                }
                b')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Ok(())
    }

    /// Finds the `)` that balances the `(` at `open`.
    fn matching_close(input: &str, open: usize) -> Result<usize> {
        let mut depth = 0usize;
        for (i, b) in input.bytes().enumerate().skip(open) {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        Err(Error::malformed_group(
            "unmatched open parenthesis",
            open,
            input,
        ))
    }

    /// Finds the end of a plain token: the next top-level comma or end of input.
    fn plain_end(input: &str, start: usize) -> Result<usize> {
        let mut depth = 0usize;
        let mut open_at = start;
        for (i, b) in input.bytes().enumerate().skip(start) {
            match b {
                b'(' => {
                    if depth == 0 {
                        open_at = i;
                    }
                    depth += 1;
                }
                b')' if depth == 0 => {
                    return Err(Error::malformed_group(
                        "unmatched close parenthesis",
                        i,
                        input,
                    ));
                }
                b')' => depth -= 1,
                b',' if depth == 0 => return Ok(i),
                _ => {}
            }
        }
        if depth > 0 {
            return Err(Error::malformed_group(
                "unmatched open parenthesis",
                open_at,
                input,
            ));
        }
        Ok(input.len())
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
