// cli/src/effects.rs

//! Effect adapters wrapping stdin/stdout behind the task contract.
//!
//! These are ordinary task-producing functions: nothing touches the
//! terminal until the application loop executes the returned value. Both
//! honor single settlement, and cancellation simply drops the pending I/O
//! future.

use tealoop::{Task, TeaError};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Prints `prompt` on stdout, then resolves with one trimmed line read from
/// stdin.
pub fn read_line(prompt: &str) -> Task<TeaError, String> {
  let prompt = prompt.to_string();
  Task::attempt(move || {
    let prompt = prompt.clone();
    async move {
      let mut stdout = io::stdout();
      stdout.write_all(prompt.as_bytes()).await?;
      stdout.flush().await?;
      let mut line = String::new();
      let mut reader = BufReader::new(io::stdin());
      reader.read_line(&mut line).await?;
      Ok(line.trim().to_string())
    }
  })
}

/// Writes one line to stdout and resolves once it is flushed.
pub fn print_line(text: &str) -> Task<TeaError, ()> {
  let text = text.to_string();
  Task::attempt(move || {
    let text = text.clone();
    async move {
      let mut stdout = io::stdout();
      stdout.write_all(text.as_bytes()).await?;
      stdout.write_all(b"\n").await?;
      stdout.flush().await?;
      Ok(())
    }
  })
}
