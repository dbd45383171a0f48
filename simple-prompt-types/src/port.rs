/// Result of reading one line from a [`TerminalPort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, without its line terminator.
    Line(String),
    /// The input stream is exhausted.
    EndOfInput,
}

/// Trait for the terminal a prompt session talks to.
///
/// A port writes prompts and reads whole lines. It knows nothing about
/// questions, retries or answers; the sequencer drives it one attempt at a
/// time and never has more than one read outstanding.
pub trait TerminalPort {
    /// Write a prompt without a trailing newline.
    fn write_prompt(&mut self, text: &str) -> anyhow::Result<()>;

    /// Write a whole line (used for prelude and epilogue messages).
    fn write_line(&mut self, text: &str) -> anyhow::Result<()>;

    /// Block until one line of input is available.
    ///
    /// An `Err` whose root cause is an `std::io::Error` of kind
    /// `Interrupted` is treated as user cancellation.
    fn read_line(&mut self) -> anyhow::Result<ReadOutcome>;

    /// Whether labels should carry color escape sequences.
    fn supports_color(&self) -> bool {
        true
    }

    /// Release the input device. Called once when the session ends.
    fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<P: TerminalPort + ?Sized> TerminalPort for &mut P {
    fn write_prompt(&mut self, text: &str) -> anyhow::Result<()> {
        (**self).write_prompt(text)
    }

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        (**self).write_line(text)
    }

    fn read_line(&mut self) -> anyhow::Result<ReadOutcome> {
        (**self).read_line()
    }

    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }

    fn close(&mut self) -> anyhow::Result<()> {
        (**self).close()
    }
}
