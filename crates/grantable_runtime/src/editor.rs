//! Terminal line editing for the REPL.
//!
//! [`LineEditor`] is the seam the REPL reads through. [`RustylineEditor`]
//! backs it with rustyline: descriptor-aware completion, kind-colored
//! highlighting, and multi-line input while a group is open.

use std::borrow::Cow;

use grantable_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

const HISTORY_SIZE: usize = 500;

/// One read from the terminal.
#[derive(Debug)]
pub enum ReadResult {
    /// The text the user entered.
    Line(String),
    /// Ctrl+C.
    Interrupted,
    /// Ctrl+D, or the input ran out.
    Eof,
}

/// Where the REPL gets its input.
pub trait LineEditor {
    /// Shows `prompt` and reads one line.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error when the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Records an evaluated input.
    fn add_history(&mut self, line: &str);

    /// Replaces the completion vocabulary.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct DescriptorHelper {
    #[rustyline(Completer)]
    completer: WordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: GroupValidator,
}

impl Highlighter for DescriptorHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') || !line.contains(['$', '#', '@', '(']) {
            return Cow::Borrowed(line);
        }
        Cow::Owned(colorize(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;33m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{hint}\x1b[0m"))
    }

    fn highlight_char(&self, line: &str, _pos: usize, kind: CmdKind) -> bool {
        !matches!(kind, CmdKind::MoveCursor) && line.contains(['$', '#', '@', '('])
    }
}

/// Colors kind symbols and group parentheses.
fn colorize(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    for c in line.chars() {
        let color = match c {
            '$' => Some("32"),
            '#' => Some("35"),
            '@' => Some("36"),
            '(' | ')' => Some("1"),
            _ => None,
        };
        match color {
            Some(code) => {
                out.push_str("\x1b[");
                out.push_str(code);
                out.push('m');
                out.push(c);
                out.push_str("\x1b[0m");
            }
            None => out.push(c),
        }
    }
    out
}

/// Completes the word under the cursor from a fixed vocabulary.
///
/// Words start after whitespace, a comma, or an open parenthesis, so group
/// members complete the same as top-level tokens.
#[derive(Default)]
struct WordCompleter {
    words: Vec<String>,
}

impl Completer for WordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before
            .rfind(|c: char| c.is_whitespace() || matches!(c, ',' | '('))
            .map_or(0, |i| i + 1);
        let prefix = &before[start..];
        if prefix.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let matches = self
            .words
            .iter()
            .filter(|word| word.starts_with(prefix))
            .map(|word| Pair {
                display: word.clone(),
                replacement: word.clone(),
            })
            .collect();
        Ok((start, matches))
    }
}

/// Holds the line open while a group is unclosed.
struct GroupValidator;

impl Validator for GroupValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        Ok(if open_groups(ctx.input()) > 0 {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Valid(None)
        })
    }
}

/// Net number of unclosed `(` in `input`.
pub(crate) fn open_groups(input: &str) -> i64 {
    input.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

fn terminal_error(err: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::Internal(format!("terminal: {err}")))
}

/// Rustyline-backed [`LineEditor`].
pub struct RustylineEditor {
    editor: Editor<DescriptorHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Opens the terminal editor.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if the terminal cannot be set up.
    ///
    /// # Panics
    ///
    /// Never in practice; the history size is a non-zero constant.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(HISTORY_SIZE)
            .expect("history size is non-zero")
            .build();

        let mut editor = Editor::with_config(config).map_err(terminal_error)?;
        editor.set_helper(Some(DescriptorHelper {
            completer: WordCompleter::default(),
            hinter: HistoryHinter::new(),
            validator: GroupValidator,
        }));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(err) => Err(terminal_error(err)),
        }
    }

    fn add_history(&mut self, line: &str) {
        // A rejected duplicate is not worth reporting.
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.words = keywords;
        }
    }
}
