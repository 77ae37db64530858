// core/src/error.rs

use std::any::Any;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// The failure channel of every [`crate::Cmd`].
///
/// The loop and the combinators hand failures to more than one observer
/// (diagnostic sink, caller of `run`), so the enum is `Clone`; the I/O
/// variant stores its source behind an `Arc` to keep that cheap.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum TeaError {
  // --- I/O Errors ---
  #[error("I/O error: {0}")]
  Io(Arc<io::Error>),

  /// A failure reported by an effect adapter.
  #[error("Effect failed: {0}")]
  Effect(String),

  /// A panic payload captured inside an attempt-wrapped computation or at
  /// the update boundary of the application loop.
  #[error("Panicked during dispatch: {0}")]
  Panic(String),

  // --- Internal Errors ---
  #[error("Internal runtime error: {0}")]
  Internal(String),
}

impl From<io::Error> for TeaError {
  fn from(e: io::Error) -> Self {
    TeaError::Io(Arc::new(e))
  }
}

impl TeaError {
  /// Extracts a readable message from a caught panic payload.
  pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
      (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "opaque panic payload".to_string()
    };
    TeaError::Panic(message)
  }
}
