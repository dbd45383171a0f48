//! The question sequencer: asks each question in turn until all are answered.

use std::collections::VecDeque;
use std::fmt;
use std::mem;

use simple_prompt_types::{
    AnswerKey, AnswerValue, Answers, NormalizedQuestion, PromptError, Question, ReadOutcome,
    RetryTag, Snapshot, TerminalPort,
};
use tracing::{debug, info, warn};

use crate::label::render_label;

type CompleteHandler = Box<dyn FnOnce(&Answers)>;
type ErrorHandler = Box<dyn FnOnce(&PromptError)>;
type SettledHandler = Box<dyn FnOnce(Result<&Answers, &PromptError>)>;

/// An interactive prompt session over an ordered list of questions.
///
/// # Example
///
/// ```
/// use simple_prompt::{Prompt, Question, ScriptedPort};
///
/// let prompt = Prompt::new(vec![
///     Question::new("Name").required(),
///     Question::new("Color").default("blue"),
/// ]);
///
/// let mut port = ScriptedPort::new().with_lines(["", "Alice", ""]);
/// let answers = prompt.run(&mut port).unwrap();
///
/// assert_eq!(answers.get_string("Name").unwrap(), "Alice");
/// assert_eq!(answers.get_string("Color").unwrap(), "blue");
/// assert_eq!(port.prompts(), ["Name: ", "Name (required): ", "Color: "]);
/// ```
pub struct Prompt {
    questions: VecDeque<Question>,
    prelude: Option<String>,
    epilogue: Option<String>,
    colored: bool,
    on_complete: Option<CompleteHandler>,
    on_error: Option<ErrorHandler>,
    on_settled: Option<SettledHandler>,
}

impl Prompt {
    /// Create a new prompt with the given questions, asked in order.
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: questions.into_iter().collect(),
            prelude: None,
            epilogue: None,
            colored: true,
            on_complete: None,
            on_error: None,
            on_settled: None,
        }
    }

    /// Set a message written once before the first question.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set a message written once after the last answer is accepted.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Never emit color escape sequences, even if the port supports them.
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Append a question to the end of the queue.
    pub fn push(&mut self, question: Question) {
        self.questions.push_back(question);
    }

    /// The questions not yet asked.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Register a handler called with the answers when the session completes.
    pub fn on_complete(mut self, handler: impl FnOnce(&Answers) + 'static) -> Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    /// Register a handler called when the session fails.
    pub fn on_error(mut self, handler: impl FnOnce(&PromptError) + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Register one handler for either outcome.
    ///
    /// Runs after `on_complete` / `on_error`.
    pub fn then(mut self, handler: impl FnOnce(Result<&Answers, &PromptError>) + 'static) -> Self {
        self.on_settled = Some(Box::new(handler));
        self
    }

    /// Ask every question on `port` and return the collected answers.
    ///
    /// Blocks on the port between prompts. The port is closed before this
    /// returns, whatever the outcome.
    pub fn run<P: TerminalPort>(mut self, mut port: P) -> Result<Answers, PromptError> {
        let colored = self.colored && port.supports_color();
        let mut session = Session {
            queue: mem::take(&mut self.questions),
            answers: Answers::new(),
            colored,
        };

        let outcome = session
            .write_message(&mut port, self.prelude.as_deref())
            .and_then(|()| session.drive(&mut port))
            .and_then(|()| session.write_message(&mut port, self.epilogue.as_deref()));

        let outcome = match (outcome, port.close()) {
            (Ok(()), Ok(())) => Ok(session.answers),
            (Ok(()), Err(err)) => Err(PromptError::terminal(err, session.answers)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "failed to close terminal port");
                Err(err)
            }
        };

        match &outcome {
            Ok(answers) => {
                info!(answers = answers.len(), "prompt session complete");
                if let Some(handler) = self.on_complete.take() {
                    handler(answers);
                }
            }
            Err(err) => {
                warn!(error = %err, answered = err.partial().len(), "prompt session failed");
                if let Some(handler) = self.on_error.take() {
                    handler(err);
                }
            }
        }
        if let Some(handler) = self.on_settled.take() {
            handler(outcome.as_ref());
        }

        outcome
    }
}

impl FromIterator<Question> for Prompt {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prompt")
            .field("questions", &self.questions)
            .field("prelude", &self.prelude)
            .field("epilogue", &self.epilogue)
            .field("colored", &self.colored)
            .finish_non_exhaustive()
    }
}

/// Mutable state of one run: what is left to ask and what has been accepted.
struct Session {
    queue: VecDeque<Question>,
    answers: Answers,
    colored: bool,
}

/// A question being asked, possibly for the second time or later.
struct Attempt {
    question: NormalizedQuestion,
    retry: Option<Retry>,
    number: u32,
}

struct Retry {
    tag: RetryTag,
    pristine: Snapshot,
}

enum State {
    Dequeue,
    Prompt(Attempt),
    Evaluate {
        attempt: Attempt,
        answer: AnswerValue,
        input_ended: bool,
    },
    Done,
}

enum Verdict {
    Accept(Attempt, AnswerValue),
    Retry(Attempt),
}

impl Attempt {
    fn new(question: NormalizedQuestion) -> Self {
        Self {
            question,
            retry: None,
            number: 1,
        }
    }

    fn key(&self) -> AnswerKey {
        match &self.retry {
            Some(retry) => retry.pristine.key(),
            None => self.question.key(),
        }
    }

    fn default_value(&self) -> Option<&str> {
        match &self.retry {
            Some(retry) => retry.pristine.default.as_deref(),
            None => self.question.default_value(),
        }
    }

    fn label(&self, colored: bool) -> String {
        render_label(
            self.question.text(),
            self.question.color(),
            self.retry.as_ref().map(|retry| retry.tag),
            colored,
        )
    }

    fn evaluate(mut self, mut answer: AnswerValue) -> Verdict {
        if answer.is_empty()
            && let Some(default) = self.default_value()
        {
            answer = AnswerValue::from(default);
        }

        let tag = if self.question.is_required() && answer.is_empty() {
            RetryTag::Required
        } else if !self.question.accepts(&answer) {
            RetryTag::Invalid
        } else {
            return Verdict::Accept(self, answer);
        };

        // The snapshot is taken on the first failure only.
        let pristine = match self.retry.take() {
            Some(retry) => retry.pristine,
            None => self.question.snapshot(),
        };
        self.retry = Some(Retry { tag, pristine });
        self.number += 1;
        Verdict::Retry(self)
    }
}

impl Session {
    fn write_message<P: TerminalPort>(
        &mut self,
        port: &mut P,
        message: Option<&str>,
    ) -> Result<(), PromptError> {
        match message {
            Some(message) => port
                .write_line(message)
                .map_err(|err| PromptError::terminal(err, mem::take(&mut self.answers))),
            None => Ok(()),
        }
    }

    /// Run the state machine until the queue is drained or the session fails.
    fn drive<P: TerminalPort>(&mut self, port: &mut P) -> Result<(), PromptError> {
        let mut state = State::Dequeue;

        loop {
            state = match state {
                State::Dequeue => match self.queue.pop_front() {
                    Some(question) => State::Prompt(Attempt::new(question.normalize())),
                    None => State::Done,
                },

                State::Prompt(attempt) => {
                    debug!(key = %attempt.key(), attempt = attempt.number, "asking question");
                    let text = format!("{}: ", attempt.label(self.colored));
                    port.write_prompt(&text).map_err(|err| self.terminal(err))?;

                    match port.read_line() {
                        Ok(ReadOutcome::Line(line)) => State::Evaluate {
                            attempt,
                            answer: AnswerValue::from_line(&line),
                            input_ended: false,
                        },
                        Ok(ReadOutcome::EndOfInput) => State::Evaluate {
                            attempt,
                            answer: AnswerValue::Empty,
                            input_ended: true,
                        },
                        Err(err) if is_cancelled(&err) => {
                            return Err(PromptError::Cancelled {
                                partial: mem::take(&mut self.answers),
                            });
                        }
                        Err(err) => return Err(self.terminal(err)),
                    }
                }

                State::Evaluate {
                    attempt,
                    answer,
                    input_ended,
                } => match attempt.evaluate(answer) {
                    Verdict::Retry(attempt) if input_ended => {
                        return Err(PromptError::InputClosed {
                            pending: attempt.key(),
                            partial: mem::take(&mut self.answers),
                        });
                    }
                    Verdict::Retry(attempt) => {
                        if let Some(retry) = &attempt.retry {
                            debug!(key = %attempt.key(), tag = %retry.tag, "answer rejected");
                        }
                        State::Prompt(attempt)
                    }
                    Verdict::Accept(attempt, answer) => {
                        let key = attempt.key();
                        let value = match attempt.question.apply_filter(answer) {
                            Ok(value) => value,
                            Err(source) => {
                                return Err(PromptError::Filter {
                                    key,
                                    partial: mem::take(&mut self.answers),
                                    source,
                                });
                            }
                        };
                        debug!(key = %key, value = value.type_name(), "answer accepted");
                        self.answers.insert(key, value);
                        State::Dequeue
                    }
                },

                State::Done => return Ok(()),
            };
        }
    }

    fn terminal(&mut self, err: anyhow::Error) -> PromptError {
        PromptError::terminal(err, mem::take(&mut self.answers))
    }
}

/// Ctrl+C surfaces as an interrupted read.
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::Interrupted)
    })
}
