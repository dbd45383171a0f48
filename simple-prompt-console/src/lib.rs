//! # simple-prompt-console
//!
//! Console terminal port for simple-prompt.
//!
//! This crate provides a `TerminalPort` that writes prompts to the console
//! (stdout or stderr) and reads answers line by line from stdin. Color support
//! follows the console's own detection, so labels are plain when output is
//! piped or `NO_COLOR` is set.
//!
//! ## Example
//!
//! ```rust,ignore
//! use simple_prompt::{Prompt, Question};
//! use simple_prompt_console::ConsolePort;
//!
//! fn main() -> anyhow::Result<()> {
//!     let answers = Prompt::new([
//!         Question::new("What is your name?").id("name").required(),
//!         Question::new("Favourite color").id("color").default("blue"),
//!     ])
//!     .run(ConsolePort::stdout())?;
//!     println!("{answers:?}");
//!     Ok(())
//! }
//! ```

mod port;

pub use port::{ConsoleError, ConsolePort};
