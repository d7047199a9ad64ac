//! Read-eval-print loop over a [`Session`].
//!
//! A plain line is parsed as a descriptor and echoed back in canonical form.
//! Lines starting with `:` are commands that execute grantables against the
//! session's in-memory recipient.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

use grantable_foundation::Result;
use grantable_language::Grantable;

use crate::editor::{LineEditor, ReadResult, RustylineEditor, open_groups};
use crate::loader::{LoadReport, describe_stacks};
use crate::rewards::GrantOutcome;
use crate::session::{Action, Session};

const COMMANDS: &[&str] = &[
    ":grant", ":take", ":has", ":inv", ":kinds", ":as", ":who", ":load", ":claim", ":reset",
    ":help", ":quit",
];

const HELP: &str = "\
<descriptor>          Parse and print canonical forms
:grant <descriptor>   Grant to the current recipient
:take <descriptor>    Take from the current recipient
:has <descriptor>     Check the current recipient
:inv                  Show balance, permissions, effects, and items
:kinds                List registered kinds in dispatch order
:as <kind> <token>    Parse a token as a specific kind
:who [name]           Show or switch the current recipient
:load <file>          Queue rewards from a file
:claim                Grant queued rewards (once per recipient)
:reset                Forget queued rewards
:help                 Show this help
:quit                 Exit";

/// What the REPL should do after evaluating a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text (nothing if empty) and keep going.
    Text(String),
    /// Leave the loop.
    Quit,
}

/// Reads descriptors and commands, evaluates them against a [`Session`].
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
    /// Shown while a group is still open.
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL reading from `editor`, with a fresh session.
    pub fn with_editor(mut editor: E) -> Self {
        let session = Session::new();
        editor.set_keywords(completion_words(&session));
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "grant> ".to_string(),
            continuation_prompt: "  ...> ".to_string(),
        }
    }

    /// Replaces the session, refreshing completion words.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.editor.set_keywords(completion_words(&session));
        self.session = session;
        self
    }

    /// Skips the banner on [`Repl::run`].
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Overrides the `grant> ` prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The session commands run against.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Loops until `:quit` or end of input, printing replies and errors.
    ///
    /// # Errors
    ///
    /// Returns an error only when the editor fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while let Some(input) = self.read_input()? {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(&input);

            match self.eval(trimmed) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) if text.is_empty() => {}
                Ok(Reply::Text(text)) => println!("{text}"),
                Err(e) => eprintln!("\x1b[31mError: {e}\x1b[0m"),
            }
        }

        println!();
        Ok(())
    }

    /// Reads a line, continuing while a group is left open.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push(' ');
                    }
                    input.push_str(&line);
                    if open_groups(&input) <= 0 {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("^C");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof if first_line => return Ok(None),
                // Hand the unclosed input to the parser so it reports the group
                ReadResult::Eof => return Ok(Some(input)),
            }
        }
    }

    /// Evaluates one line of input.
    ///
    /// # Errors
    ///
    /// Returns parse errors and command usage errors.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let input = input.trim();
        let Some(command) = input.strip_prefix(':') else {
            let grantables = self.session.parse(input)?;
            return Ok(Reply::Text(describe(&grantables)));
        };
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));

        let text = match name {
            "grant" => self.execute(Action::Grant, rest, "granted", "failed")?,
            "take" => self.execute(Action::Take, rest, "taken", "failed")?,
            "has" => self.execute(Action::Has, rest, "yes", "no")?,
            "inv" | "inventory" => self.inventory(),
            "kinds" => self.kinds(),
            "as" => {
                let Some((kind, token)) = rest.split_once(char::is_whitespace) else {
                    return Ok(Reply::Text("usage: :as <kind> <token>".to_string()));
                };
                let grantable = self.session.parse_as(kind, token)?;
                describe(std::slice::from_ref(&grantable))
            }
            "who" if rest.is_empty() => self.session.recipient().to_string(),
            "who" => {
                self.session.set_recipient(rest);
                format!("now acting as {rest}")
            }
            "load" if rest.is_empty() => "usage: :load <file>".to_string(),
            "load" => {
                let report = self.session.load_file(Path::new(rest))?;
                describe_report(&report)
            }
            "claim" => match self.session.claim_rewards() {
                GrantOutcome::AlreadyRewarded => "already rewarded".to_string(),
                GrantOutcome::NothingPending => "nothing to claim".to_string(),
                GrantOutcome::Granted { granted, failed } => {
                    format!("granted {granted}, failed {failed}")
                }
            },
            "reset" => {
                self.session.reset_rewards();
                String::new()
            }
            "help" | "h" | "?" => HELP.to_string(),
            "quit" | "q" | "exit" => return Ok(Reply::Quit),
            other => format!("unknown command :{other} (try :help)"),
        };
        Ok(Reply::Text(text))
    }

    fn execute(&self, action: Action, descriptor: &str, yes: &str, no: &str) -> Result<String> {
        let results = self.session.execute(action, descriptor)?;
        Ok(results
            .iter()
            .map(|(grantable, ok)| format!("{} {grantable}", if *ok { yes } else { no }))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn inventory(&self) -> String {
        let backend = self.session.backend();
        let recipient = self.session.recipient();
        let effects: Vec<_> = backend
            .active_effects(recipient)
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "recipient:   {recipient}");
        let _ = writeln!(out, "balance:     {}", backend.balance(recipient));
        let _ = writeln!(out, "permissions: {}", backend.permission_nodes(recipient).join(", "));
        let _ = writeln!(out, "effects:     {}", effects.join(", "));
        let _ = write!(out, "items:       {}", describe_stacks(&backend.stacks(recipient)));
        out
    }

    fn kinds(&self) -> String {
        self.session
            .kinds()
            .iter()
            .map(|kind| {
                let pattern = kind.pattern.as_ref().map_or(String::new(), |p| {
                    let symbol = p.symbol.map(String::from).unwrap_or_default();
                    let prefix = p.prefix.as_deref().map(|k| format!("{k}:")).unwrap_or_default();
                    format!("{symbol:<2} {prefix}")
                });
                let origin = if kind.builtin { "" } else { " (custom)" };
                format!("{:<12}{pattern}{origin}", kind.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mgrantable\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type a reward descriptor to parse it, or :help for commands. Ctrl+D exits.\n");

        let _ = io::stdout().flush();
    }
}

fn completion_words(session: &Session) -> Vec<String> {
    let mut words: Vec<String> = COMMANDS.iter().map(ToString::to_string).collect();
    words.extend(session.kinds().into_iter().map(|kind| kind.name));
    words
}

fn describe(grantables: &[Grantable]) -> String {
    grantables
        .iter()
        .map(|g| format!("{:<11}{g}", g.kind_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_report(report: &LoadReport) -> String {
    let mut out = format!("queued {} reward(s)", report.grantables.len());
    for failure in &report.failures {
        let _ = write!(out, "\nskipped {}: {}", failure.token, failure.error);
    }
    out
}
