use simple_prompt::{AnswerValue, Color, Prompt, Question};
use simple_prompt_console::ConsolePort;
use tracing_subscriber::EnvFilter;

fn is_email(answer: &AnswerValue) -> bool {
    answer
        .as_str()
        .and_then(|s| s.split_once('@'))
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'))
}

fn to_age(answer: AnswerValue) -> anyhow::Result<AnswerValue> {
    match answer.as_str() {
        Some(text) => Ok(AnswerValue::Int(text.parse()?)),
        None => Ok(AnswerValue::Empty),
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the prompts on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let questions = vec![
        Question::new("Name").required().color(Color::LightBlue),
        Question::new("Email address")
            .id("email")
            .required()
            .validate(is_email),
        Question::new("Age")
            .validate(|a| a.is_empty() || a.as_str().is_some_and(|s| s.parse::<u8>().is_ok()))
            .filter(to_age),
        Question::new("Favourite color").default("blue").color("0;33"),
    ];

    let answers = Prompt::new(questions)
        .with_prelude("=== Tell us about yourself ===")
        .with_epilogue("Thanks!")
        .on_error(|err| eprintln!("Stopped early: {err}"))
        .run(ConsolePort::stdout())?;
    tracing::info!(answers = answers.len(), "collected answers");

    for (key, value) in &answers {
        println!("{key}: {value:?}");
    }
    Ok(())
}
