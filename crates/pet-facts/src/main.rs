//! A simple program demonstrates how to use `pet-facts` as a library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::pin::pin;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use pet_facts::core::tool::ToolCall;
use pet_facts::core::{ActionError, SessionId};
use pet_facts::model::{ActionOutcome, FactKind};
use pet_facts::AssistantBuilder;
use pet_facts_http_source::{HttpFactSource, HttpSourceConfigBuilder};
use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";

const HELP: &str = r#"Commands:
  dog                 fetch a random dog image
  cat                 fetch a random cat fact
  show                show the latest facts of the current session
  prompt              show the system prompt of the current session
  tools               list the tool definitions
  call <name> [json]  call a tool like a model would
  session [id]        show or switch the current session
  help                show this message
  quit                exit"#;

enum Command {
    Fetch(FactKind),
    Show,
    Prompt,
    Tools,
    Call(String, Value),
    Session(Option<String>),
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let command = match head {
            "dog" => Command::Fetch(FactKind::DogImage),
            "cat" => Command::Fetch(FactKind::CatFact),
            "show" => Command::Show,
            "prompt" => Command::Prompt,
            "tools" => Command::Tools,
            "call" => {
                let (name, arguments) = match rest.split_once(char::is_whitespace)
                {
                    Some((name, arguments)) => (name, arguments.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err("usage: call <name> [json]".to_owned());
                }
                let arguments = if arguments.is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str(arguments)
                        .map_err(|err| format!("invalid arguments: {err}"))?
                };
                Command::Call(name.to_owned(), arguments)
            }
            "session" => {
                Command::Session((!rest.is_empty()).then(|| rest.to_owned()))
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(format!("unknown command: {head}")),
        };
        Ok(command)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = HttpSourceConfigBuilder::new();
    if let Ok(url) = env::var("PET_FACTS_DOG_IMAGE_URL") {
        config = config.with_dog_image_url(url);
    }
    if let Ok(url) = env::var("PET_FACTS_CAT_FACT_URL") {
        config = config.with_cat_fact_url(url);
    }
    let source = HttpFactSource::new(config.build());
    let assistant = AssistantBuilder::with_fact_source(source).build();

    let mut session = SessionId::new(
        env::var("PET_FACTS_SESSION").unwrap_or_else(|_| "default".to_owned()),
    );

    let progress_style = match ProgressStyle::with_template("{spinner} {wide_msg}")
    {
        Ok(style) => style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        Err(_) => ProgressStyle::default_spinner(),
    };

    println!("{}", "Type `help` for available commands.".dimmed());

    loop {
        print!("{}> ", session.bright_black());
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.bright_red());
                continue;
            }
        };

        let result = match command {
            Command::Fetch(kind) => {
                let fut = assistant.fetch(&session, kind);
                let res =
                    with_spinner(fut, &progress_style, format!("Fetching a {kind}..."))
                        .await;
                res.map(|outcome| print_outcome(&outcome))
            }
            Command::Show => assistant
                .facts(&session)
                .await
                .map(|facts| println!("{}", facts.render().bright_white()))
                .map_err(ActionError::from),
            Command::Prompt => assistant
                .render_prompt(&session)
                .await
                .map(|prompt| println!("{prompt}"))
                .map_err(ActionError::from),
            Command::Tools => {
                for definition in assistant.tool_definitions() {
                    let bar = BAR_CHAR.bright_cyan();
                    println!("{bar}{}", definition.name.bright_white().bold());
                    println!("{bar}{}", definition.description.trim());
                    println!("{bar}{}", definition.parameters);
                }
                Ok(())
            }
            Command::Call(name, arguments) => {
                let call = ToolCall {
                    id: "cli".to_owned(),
                    name,
                    arguments,
                };
                let fut = assistant.call_tool(&session, call);
                match with_spinner(fut, &progress_style, "Calling tool...".to_owned())
                    .await
                {
                    Ok(outcome) => {
                        match serde_json::to_string_pretty(&outcome) {
                            Ok(json) => println!("{json}"),
                            Err(err) => error!("cannot serialize outcome: {err}"),
                        }
                    }
                    Err(err) => println!("{}", err.to_string().bright_red()),
                }
                Ok(())
            }
            Command::Session(Some(id)) => {
                session = SessionId::new(id);
                Ok(())
            }
            Command::Session(None) => {
                println!("{session}");
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(err) = result {
            println!("{}", err.to_string().bright_red());
            break;
        }
    }

    assistant.shutdown();
}

async fn with_spinner<F: Future>(
    fut: F,
    style: &ProgressStyle,
    message: String,
) -> F::Output {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(style.clone());
    progress_bar.set_message(message);

    let mut fut = pin!(fut);
    let output = loop {
        progress_bar.inc(1);
        select! {
            output = &mut fut => break output,
            _ = sleep(Duration::from_millis(100)) => {}
        }
    };

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();
    output
}

fn print_outcome(outcome: &ActionOutcome) {
    if outcome.success() {
        println!(
            "{}✅ {}",
            BAR_CHAR.bright_green(),
            outcome.message().bright_white()
        );
    } else {
        let bar = BAR_CHAR.bright_red();
        println!("{bar}⚠️  {}", outcome.message().bright_white());
        if let Some(error) = outcome.error() {
            println!("{bar}{}", error.dimmed());
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
