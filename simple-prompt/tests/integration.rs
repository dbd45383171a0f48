//! Integration tests for simple-prompt

use std::cell::RefCell;
use std::rc::Rc;

use simple_prompt::{
    AnswerValue, Prompt, PromptError, Question, ReadOutcome, ScriptedPort, TerminalPort,
};

/// Wraps a scripted port and fails on request.
struct FlakyPort {
    inner: ScriptedPort,
    fail_prompt: Option<usize>,
    fail_close: bool,
}

impl FlakyPort {
    fn new(inner: ScriptedPort) -> Self {
        Self {
            inner,
            fail_prompt: None,
            fail_close: false,
        }
    }
}

impl TerminalPort for FlakyPort {
    fn write_prompt(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail_prompt == Some(self.inner.prompts().len()) {
            anyhow::bail!("terminal went away");
        }
        self.inner.write_prompt(text)
    }

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        self.inner.write_line(text)
    }

    fn read_line(&mut self) -> anyhow::Result<ReadOutcome> {
        self.inner.read_line()
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.inner.close()?;
        if self.fail_close {
            anyhow::bail!("close failed");
        }
        Ok(())
    }
}

fn to_int(answer: AnswerValue) -> anyhow::Result<AnswerValue> {
    let text = answer.as_str().unwrap_or_default();
    Ok(AnswerValue::Int(text.parse()?))
}

#[test]
fn test_end_to_end_scenario() {
    let mut port = ScriptedPort::new().with_lines(["", "Alice", ""]);
    let answers = Prompt::new([
        Question::new("Name").required(),
        Question::new("Color").default("blue"),
    ])
    .run(&mut port)
    .unwrap();

    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get_string("Name").unwrap(), "Alice");
    assert_eq!(answers.get_string("Color").unwrap(), "blue");
    assert_eq!(port.prompts(), ["Name: ", "Name (required): ", "Color: "]);
    assert_eq!(port.remaining(), 0);
    assert!(port.is_closed());
}

#[test]
fn test_one_key_per_question_regardless_of_retries() {
    let mut port = ScriptedPort::new().with_lines(["", "", "x", "", "abc", "7", "ok"]);
    let answers = Prompt::new([
        Question::new("First").required(),
        Question::new("Second")
            .required()
            .validate(|a| a.as_str().is_some_and(|s| s.parse::<u32>().is_ok())),
        Question::new("Third"),
    ])
    .run(&mut port)
    .unwrap();

    let keys: Vec<&str> = answers.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["First", "Second", "Third"]);
    assert_eq!(answers.get_string("Second").unwrap(), "7");
    assert_eq!(port.prompts().len(), 7);
}

#[test]
fn test_required_retries_then_accepts() {
    let mut port = ScriptedPort::new().with_lines(["   ", "Bob"]);
    let answers = Prompt::new([Question::new("Name").required()])
        .run(&mut port)
        .unwrap();

    assert_eq!(answers.get_string("Name").unwrap(), "Bob");
    assert_eq!(port.prompts(), ["Name: ", "Name (required): "]);
}

#[test]
fn test_default_accepted_without_retry() {
    let mut port = ScriptedPort::new().with_line("");
    let answers = Prompt::new([Question::new("Shell").required().default("bash")])
        .run(&mut port)
        .unwrap();

    assert_eq!(answers.get_string("Shell").unwrap(), "bash");
    assert_eq!(port.prompts(), ["Shell: "]);
}

#[test]
fn test_default_used_at_end_of_input() {
    let mut port = ScriptedPort::new();
    let answers = Prompt::new([Question::new("Editor").default("vim")])
        .run(&mut port)
        .unwrap();

    assert_eq!(answers.get_string("Editor").unwrap(), "vim");
}

#[test]
fn test_always_invalid_keeps_retrying() {
    let attempts = 5;
    let mut port = ScriptedPort::new().with_lines(vec!["nope"; attempts]);
    let err = Prompt::new([
        Question::new("Before"),
        Question::new("Never").validate(|_| false),
    ])
    .run(&mut port)
    .unwrap_err();

    // "Before" consumes the first line; the rest go to "Never", then input ends.
    let prompts = port.prompts();
    assert_eq!(prompts.len(), attempts + 1);
    assert_eq!(prompts[1], "Never: ");
    assert!(prompts[2..].iter().all(|p| p == "Never (invalid): "));

    match err {
        PromptError::InputClosed { pending, partial } => {
            assert_eq!(pending.as_str(), "Never");
            assert!(partial.contains("Before"));
            assert!(!partial.contains("Never"));
        }
        other => panic!("expected InputClosed, got {other:?}"),
    }
}

#[test]
fn test_filter_transforms_stored_value() {
    let mut port = ScriptedPort::new().with_line("42");
    let answers = Prompt::new([Question::new("Age").filter(to_int)])
        .run(&mut port)
        .unwrap();

    assert_eq!(answers.get("Age"), Some(&AnswerValue::Int(42)));
    assert_eq!(answers.get_int("Age").unwrap(), 42);
}

#[test]
fn test_filter_runs_after_validation() {
    let mut port = ScriptedPort::new().with_lines(["old", "17"]);
    let answers = Prompt::new([Question::new("Age")
        .validate(|a| a.as_str().is_some_and(|s| s.chars().all(|c| c.is_ascii_digit())))
        .filter(to_int)])
    .run(&mut port)
    .unwrap();

    assert_eq!(answers.get_int("Age").unwrap(), 17);
    assert_eq!(port.prompts(), ["Age: ", "Age (invalid): "]);
}

#[test]
fn test_failing_filter_is_fatal() {
    let mut port = ScriptedPort::new().with_lines(["Alice", "forty"]);
    let err = Prompt::new([Question::new("Name"), Question::new("Age").filter(to_int)])
        .run(&mut port)
        .unwrap_err();

    match &err {
        PromptError::Filter { key, partial, .. } => {
            assert_eq!(key.as_str(), "Age");
            assert_eq!(partial.get_string("Name").unwrap(), "Alice");
            assert!(!partial.contains("Age"));
        }
        other => panic!("expected Filter, got {other:?}"),
    }
    assert!(port.is_closed());
}

#[test]
fn test_key_derivation() {
    let mut port = ScriptedPort::new().with_lines(["Ada", "Lovelace"]);
    let answers = Prompt::new([
        Question::new("First Name"),
        Question::new("Last Name").id("lname"),
    ])
    .run(&mut port)
    .unwrap();

    assert_eq!(answers.get_string("FirstName").unwrap(), "Ada");
    assert_eq!(answers.get_string("lname").unwrap(), "Lovelace");
    assert!(!answers.contains("Last Name"));
}

#[test]
fn test_optional_question_stores_empty() {
    let mut port = ScriptedPort::new().with_line("");
    let answers = Prompt::new([Question::new("Nickname")])
        .run(&mut port)
        .unwrap();

    assert_eq!(answers.get("Nickname"), Some(&AnswerValue::Empty));
    assert!(!answers.has_value("Nickname"));
}

#[test]
fn test_required_at_end_of_input_fails() {
    let mut port = ScriptedPort::new().with_line("Alice");
    let err = Prompt::new([Question::new("Name"), Question::new("Email").required()])
        .run(&mut port)
        .unwrap_err();

    assert!(matches!(err, PromptError::InputClosed { .. }));
    assert_eq!(err.partial().len(), 1);
    assert_eq!(port.prompts(), ["Name: ", "Email: "]);
    assert!(port.is_closed());
}

#[test]
fn test_colored_labels() {
    let mut port = ScriptedPort::new().with_color().with_lines(["", "x"]);
    Prompt::new([Question::new("Name").required().color("green")])
        .run(&mut port)
        .unwrap();

    assert_eq!(
        port.prompts(),
        ["\x1b[0;32mName\x1b[0m: ", "\x1b[0;32mName\x1b[0m (required): "]
    );
}

#[test]
fn test_plain_prompt_ignores_color() {
    let mut port = ScriptedPort::new().with_color().with_line("x");
    Prompt::new([Question::new("Name").color("green")])
        .plain()
        .run(&mut port)
        .unwrap();

    assert_eq!(port.prompts(), ["Name: "]);
}

#[test]
fn test_prelude_and_epilogue() {
    let mut port = ScriptedPort::new().with_line("x");
    Prompt::new([Question::new("Name")])
        .with_prelude("Welcome!")
        .with_epilogue("Thanks.")
        .run(&mut port)
        .unwrap();

    assert_eq!(port.messages(), ["Welcome!", "Thanks."]);
}

#[test]
fn test_epilogue_skipped_on_failure() {
    let mut port = ScriptedPort::new();
    Prompt::new([Question::new("Name").required()])
        .with_epilogue("Thanks.")
        .run(&mut port)
        .unwrap_err();

    assert!(port.messages().is_empty());
}

#[test]
fn test_handlers_receive_distinct_outcomes() {
    let completed = Rc::new(RefCell::new(None));
    let failed = Rc::new(RefCell::new(false));
    let settled = Rc::new(RefCell::new(0));

    let (c, f, s) = (completed.clone(), failed.clone(), settled.clone());
    Prompt::new([Question::new("Name")])
        .on_complete(move |answers| *c.borrow_mut() = Some(answers.clone()))
        .on_error(move |_| *f.borrow_mut() = true)
        .then(move |outcome| {
            assert!(outcome.is_ok());
            *s.borrow_mut() += 1;
        })
        .run(ScriptedPort::new().with_line("Zed"))
        .unwrap();

    let answers = completed.borrow().clone().unwrap();
    assert_eq!(answers.get_string("Name").unwrap(), "Zed");
    assert!(!*failed.borrow());
    assert_eq!(*settled.borrow(), 1);
}

#[test]
fn test_error_handler_on_failure() {
    let failed = Rc::new(RefCell::new(None));
    let f = failed.clone();

    let result = Prompt::new([Question::new("Name").required()])
        .on_complete(|_| panic!("must not complete"))
        .on_error(move |err| *f.borrow_mut() = Some(err.to_string()))
        .run(ScriptedPort::new());

    assert!(result.is_err());
    assert_eq!(
        failed.borrow().as_deref(),
        Some("Input closed before 'Name' was answered")
    );
}

#[test]
fn test_questions_collected_from_iterator() {
    let prompt: Prompt = ["One", "Two", "Three"].into_iter().map(Question::new).collect();
    assert_eq!(prompt.len(), 3);

    let mut port = ScriptedPort::new().with_lines(["1", "2", "3"]);
    let answers = prompt.run(&mut port).unwrap();
    let values: Vec<&str> = answers.iter().filter_map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, ["1", "2", "3"]);
}

#[test]
fn test_failed_prompt_write_is_terminal_error() {
    let mut port = FlakyPort::new(ScriptedPort::new().with_lines(["Alice", "30"]));
    port.fail_prompt = Some(1);
    let failed = Rc::new(RefCell::new(false));
    let f = failed.clone();

    let err = Prompt::new([Question::new("Name"), Question::new("Age")])
        .on_complete(|_| panic!("must not complete"))
        .on_error(move |_| *f.borrow_mut() = true)
        .run(&mut port)
        .unwrap_err();

    assert!(matches!(err, PromptError::Terminal { .. }));
    assert_eq!(err.to_string(), "Terminal error: terminal went away");
    assert!(*failed.borrow());
    assert!(port.inner.is_closed());

    let partial = err.into_partial();
    assert_eq!(partial.get_string("Name").unwrap(), "Alice");
    assert!(!partial.contains("Age"));
}

#[test]
fn test_failed_close_keeps_complete_answers() {
    let mut port = FlakyPort::new(ScriptedPort::new().with_lines(["Alice", "30"]));
    port.fail_close = true;
    let failed = Rc::new(RefCell::new(false));
    let f = failed.clone();

    let err = Prompt::new([Question::new("Name"), Question::new("Age")])
        .on_complete(|_| panic!("must not complete"))
        .on_error(move |_| *f.borrow_mut() = true)
        .run(&mut port)
        .unwrap_err();

    assert!(matches!(err, PromptError::Terminal { .. }));
    assert!(*failed.borrow());
    assert_eq!(err.partial().len(), 2);
    assert_eq!(err.partial().get_string("Age").unwrap(), "30");
}

#[test]
fn test_questions_pushed_after_construction() {
    let mut prompt = Prompt::new([Question::new("Name")]);
    prompt.push(Question::new("City").id("city").default("Durban").color("cyan"));

    let pending: Vec<&str> = prompt.questions().map(|q| q.text()).collect();
    assert_eq!(pending, ["Name", "City"]);

    let city = prompt.questions().nth(1).unwrap();
    assert_eq!(city.get_id(), Some("city"));
    assert_eq!(city.get_default(), Some("Durban"));
    assert_eq!(city.get_color(), Some("cyan"));

    let answers = prompt
        .run(ScriptedPort::new().with_lines(["Thandi", ""]))
        .unwrap();
    assert_eq!(answers.get_string("city").unwrap(), "Durban");
}

#[test]
fn test_filter_may_return_small_integers() {
    let mut port = ScriptedPort::new().with_line("yes");
    let answers = Prompt::new([Question::new("Agree").filter(|a| {
        Ok(AnswerValue::from(i32::from(a.as_str() == Some("yes"))))
    })])
    .run(&mut port)
    .unwrap();

    assert_eq!(answers.get_int("Agree").unwrap(), 1);
}
