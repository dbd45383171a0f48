//! Console implementation of the `TerminalPort` trait.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::console::{self, Key, Term};
use simple_prompt::{ReadOutcome, TerminalPort};
use thiserror::Error;

/// Error type for the console port.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// User pressed Ctrl+C while an answer was being read.
    #[error("Read cancelled by user")]
    Cancelled(#[source] io::Error),

    /// The port was used after the session closed it.
    #[error("Console port is closed")]
    Closed,

    /// An I/O error occurred while prompting or reading.
    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Helper to check if an I/O error is a cancellation (Ctrl+C)
fn is_cancelled(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Interrupted
}

/// Where answers come from.
enum Input {
    /// Key by key from the terminal in raw mode, so Ctrl+C is seen as a key.
    Keys,
    /// Line by line from a reader (piped stdin or a test buffer).
    Reader(Box<dyn BufRead + Send>),
}

/// Terminal port backed by the console.
///
/// Prompts go to a `console::Term`. When both the term and stdin are
/// interactive, answers are read key by key so Ctrl+C cancels the session
/// instead of killing the process; otherwise they are read line by line.
pub struct ConsolePort {
    term: Term,
    input: Input,
    colors: bool,
    closed: bool,
}

impl ConsolePort {
    /// Prompt on stdout, read from stdin.
    pub fn stdout() -> Self {
        Self::new(Term::stdout(), console::colors_enabled())
    }

    /// Prompt on stderr, read from stdin. Keeps stdout free for program output.
    pub fn stderr() -> Self {
        Self::new(Term::stderr(), console::colors_enabled_stderr())
    }

    fn new(term: Term, colors: bool) -> Self {
        let input = if term.is_term() && io::stdin().is_terminal() {
            Input::Keys
        } else {
            Input::Reader(Box::new(io::BufReader::new(io::stdin())))
        };

        Self {
            term,
            input,
            colors,
            closed: false,
        }
    }

    /// Read answers from `input` instead of the terminal.
    pub fn with_input(mut self, input: impl BufRead + Send + 'static) -> Self {
        self.input = Input::Reader(Box::new(input));
        self
    }

    /// Force color on or off, overriding detection.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn ensure_open(&self) -> Result<(), ConsoleError> {
        if self.closed {
            Err(ConsoleError::Closed)
        } else {
            Ok(())
        }
    }

    fn read(&mut self) -> Result<ReadOutcome, ConsoleError> {
        self.ensure_open()?;

        match &mut self.input {
            Input::Keys => read_keys(&self.term),
            Input::Reader(reader) => read_buffered(reader.as_mut()),
        }
    }
}

/// Line editing on a raw terminal: printable characters, backspace, enter.
fn read_keys(term: &Term) -> Result<ReadOutcome, ConsoleError> {
    let mut line = String::new();

    loop {
        match term.read_key() {
            Ok(Key::Enter) => {
                term.write_line("")?;
                return Ok(ReadOutcome::Line(line));
            }
            Ok(Key::Backspace) => {
                if line.pop().is_some() {
                    term.clear_chars(1)?;
                }
            }
            // Ctrl+D on an empty line
            Ok(Key::Char('\u{4}')) if line.is_empty() => {
                term.write_line("")?;
                return Ok(ReadOutcome::EndOfInput);
            }
            Ok(Key::Char(c)) if !c.is_control() => {
                line.push(c);
                term.write_str(c.encode_utf8(&mut [0; 4]))?;
            }
            Ok(_) => {}
            Err(err) if is_cancelled(&err) => return Err(ConsoleError::Cancelled(err)),
            Err(err) => return Err(ConsoleError::Io(err)),
        }
    }
}

/// Read one line without `BufRead::read_line`, which silently retries
/// interrupted reads.
fn read_buffered(reader: &mut dyn BufRead) -> Result<ReadOutcome, ConsoleError> {
    let mut bytes = Vec::new();

    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(err) if is_cancelled(&err) => return Err(ConsoleError::Cancelled(err)),
            Err(err) => return Err(ConsoleError::Io(err)),
        };
        if available.is_empty() {
            break;
        }

        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(newline) => (newline + 1, true),
            None => (available.len(), false),
        };
        bytes.extend_from_slice(&available[..used]);
        reader.consume(used);
        if done {
            break;
        }
    }

    if bytes.is_empty() {
        return Ok(ReadOutcome::EndOfInput);
    }

    let mut line =
        String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    Ok(ReadOutcome::Line(line))
}

impl TerminalPort for ConsolePort {
    fn write_prompt(&mut self, text: &str) -> anyhow::Result<()> {
        self.ensure_open()?;
        self.term.write_str(text).map_err(ConsoleError::from)?;
        self.term.flush().map_err(ConsoleError::from)?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        self.ensure_open()?;
        self.term.write_line(text).map_err(ConsoleError::from)?;
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<ReadOutcome> {
        Ok(self.read()?)
    }

    fn supports_color(&self) -> bool {
        self.colors
    }

    /// Drops the input reader; the port rejects any further use.
    fn close(&mut self) -> anyhow::Result<()> {
        self.ensure_open()?;
        self.closed = true;
        self.input = Input::Reader(Box::new(io::empty()));
        self.term.flush().map_err(ConsoleError::from)?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsolePort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input = match self.input {
            Input::Keys => "keys",
            Input::Reader(_) => "reader",
        };
        f.debug_struct("ConsolePort")
            .field("term", &self.term)
            .field("input", &input)
            .field("colors", &self.colors)
            .field("closed", &self.closed)
            .finish()
    }
}
