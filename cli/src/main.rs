// cli/src/main.rs

//! Interactive demo: ask for a name on stdin, echo a greeting, quiesce.

mod effects;

use anyhow::Result;
use clap::Parser;
use tealoop::{cmd, Application, Cmd, Sub};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(name = "tealoop", version, about = "Interactive demo for the tealoop runtime")]
struct Cli {
  /// Question printed before reading a line from stdin
  #[clap(long, default_value = "What is your name?\n")]
  prompt: String,
}

#[derive(Debug, Clone)]
enum Msg {
  GotName(String),
  Printed,
}

struct Model {
  prompt: String,
}

fn ask(prompt: &str) -> Cmd<Msg> {
  cmd::from_task(effects::read_line(prompt).map(Msg::GotName))
}

fn update(msg: Msg, model: Model) -> (Model, Cmd<Msg>) {
  match msg {
    // An empty answer re-issues the question.
    Msg::GotName(name) if name.is_empty() => {
      let again = ask(&model.prompt);
      (model, again)
    }
    Msg::GotName(name) => {
      let line = format!("So your name appears to be {name}");
      (model, cmd::from_task(effects::print_line(&line).map(|_| Msg::Printed)))
    }
    Msg::Printed => (model, cmd::none()),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tealoop=info,warn"));
  tracing_subscriber::fmt().with_env_filter(env_filter).init();

  let cli = Cli::parse();
  let greeting = ask(&cli.prompt);
  let model = Model { prompt: cli.prompt };

  Application::new((model, greeting), update, |_model| Sub::none())
    .run()
    .await?;
  Ok(())
}
