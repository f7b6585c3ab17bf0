//! Yes/no confirmation prompts
//!
//! Accepting a new size snapshot needs a human decision. [`TerminalPrompter`]
//! asks on the terminal and answers on its own in CI, where nobody can
//! respond; [`FixedPrompter`] answers programmatically for tests and
//! embedding.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};

/// Answer to a confirmation question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The user accepted
    Yes,
    /// The user declined
    No,
    /// Nobody could be asked (CI or closed input); treated as a decline
    NonInteractive,
}

impl Answer {
    /// Whether the answer permits the change
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

/// Something that can answer a yes/no question
pub trait Prompter {
    /// Ask `question` and return the answer
    fn confirm(&self, question: &str) -> Result<Answer>;
}

/// Asks on stdin/stdout unless running in CI
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    ci: bool,
}

impl TerminalPrompter {
    /// Prompter that detects CI from the environment
    pub fn from_env() -> Self {
        Self { ci: is_ci() }
    }

    /// Prompter with an explicit CI flag
    pub fn new(ci: bool) -> Self {
        Self { ci }
    }

    fn ask<R: BufRead, W: Write>(&self, question: &str, input: R, output: W) -> io::Result<Answer> {
        if self.ci {
            log::info!("CI environment detected, declining: {}", question);
            return Ok(Answer::NonInteractive);
        }
        read_answer(question, input, output)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> Result<Answer> {
        let stdin = io::stdin();
        self.ask(question, stdin.lock(), io::stdout())
            .context("Failed to read confirmation from the terminal")
    }
}

fn read_answer<R: BufRead, W: Write>(question: &str, mut input: R, mut output: W) -> io::Result<Answer> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        log::debug!("Input closed before an answer was given");
        return Ok(Answer::NonInteractive);
    }

    let reply = line.trim();
    if reply.eq_ignore_ascii_case("y") || reply.eq_ignore_ascii_case("yes") {
        Ok(Answer::Yes)
    } else {
        Ok(Answer::No)
    }
}

/// Answers every question the same way and remembers what was asked
#[derive(Debug)]
pub struct FixedPrompter {
    answer: Answer,
    asked: Mutex<Vec<String>>,
}

impl FixedPrompter {
    /// Prompter that always gives `answer`
    pub fn new(answer: Answer) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, oldest first
    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

impl Prompter for FixedPrompter {
    fn confirm(&self, question: &str) -> Result<Answer> {
        self.asked.lock().push(question.to_string());
        Ok(self.answer)
    }
}

/// Whether the process runs under a CI system.
///
/// `CI` counts when set to anything but an empty string, `0` or `false`;
/// `GITHUB_ACTIONS` counts whenever it is set.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key).ok())
}

fn is_ci_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    let ci = lookup("CI").is_some_and(|value| {
        let value = value.trim();
        !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
    });
    ci || lookup("GITHUB_ACTIONS").is_some()
}
