//! # simple-prompt
//!
//! Ask a list of questions on the terminal, one at a time.
//!
//! Each question can be required, carry a default, validate and transform
//! its answer, and be shown in a color. Missing or invalid answers are asked
//! again with the reason appended to the label, as often as it takes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simple_prompt::{AnswerValue, Prompt, Question};
//! use simple_prompt_console::ConsolePort;
//!
//! let answers = Prompt::new([
//!     Question::new("Name").required().color("lightBlue"),
//!     Question::new("Age").filter(|a| Ok(AnswerValue::Int(a.as_str().unwrap_or("0").parse()?))),
//!     Question::new("Favourite color").id("color").default("blue"),
//! ])
//! .run(ConsolePort::stdout())?;
//! ```
//!
//! ## Ports
//!
//! Sessions talk to a `TerminalPort`:
//! - `ScriptedPort` (this crate) - canned input for tests
//! - `simple-prompt-console` - the real terminal

// Re-export all types from simple-prompt-types
pub use simple_prompt_types::*;

mod label;
pub use label::{Color, render_label, style_code};

mod sequencer;
pub use sequencer::Prompt;

// Scripted port for running prompts without user interaction
mod scripted_port;
pub use scripted_port::ScriptedPort;
