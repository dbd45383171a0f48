//! Scripted port for running prompts without a terminal.
//!
//! `ScriptedPort` feeds pre-defined lines to a session and records every
//! prompt it is asked to write. Once the lines run out it reports end of
//! input, or an interrupted read if configured to.
//!
//! # Example
//!
//! ```rust
//! use simple_prompt::{Prompt, Question, ScriptedPort};
//!
//! let mut port = ScriptedPort::new().with_line("Alice");
//! let answers = Prompt::new([Question::new("First Name")])
//!     .run(&mut port)
//!     .unwrap();
//!
//! assert_eq!(answers.get_string("FirstName").unwrap(), "Alice");
//! assert_eq!(port.prompts(), ["First Name: "]);
//! ```

use std::collections::VecDeque;
use std::io;

use crate::{ReadOutcome, TerminalPort};

/// A port that answers from a fixed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPort {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    messages: Vec<String>,
    color: bool,
    interrupt: bool,
    closed: bool,
}

impl ScriptedPort {
    /// Create a port with no input; every read reports end of input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one line of input. A trailing newline is not needed.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push_back(line.into());
        self
    }

    /// Queue several lines of input.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Report color support so labels carry escape sequences.
    pub fn with_color(mut self) -> Self {
        self.color = true;
        self
    }

    /// Fail the first read past the script as if the user pressed Ctrl+C.
    pub fn interrupt_when_exhausted(mut self) -> Self {
        self.interrupt = true;
        self
    }

    /// Every prompt written so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every prelude/epilogue line written so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TerminalPort for ScriptedPort {
    fn write_prompt(&mut self, text: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!self.closed, "write to closed port");
        self.prompts.push(text.to_string());
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!self.closed, "write to closed port");
        self.messages.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<ReadOutcome> {
        anyhow::ensure!(!self.closed, "read from closed port");
        match self.lines.pop_front() {
            Some(line) => Ok(ReadOutcome::Line(line)),
            None if self.interrupt => {
                Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted").into())
            }
            None => Ok(ReadOutcome::EndOfInput),
        }
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.closed = true;
        Ok(())
    }
}
