// core/src/cmd.rs

//! Commands: tasks specialized to produce application messages.
//!
//! A command settles with `Some(msg)` to re-enter `update`, or with `None`
//! (the [`none`] identity command) to tell the loop that dispatch is
//! complete. `None` is the sentinel standing in for the original design's
//! "message or nothing" union.

use std::future::Future;

use crate::error::TeaError;
use crate::task::Task;

/// An application-level side effect that ultimately produces a message.
pub type Cmd<M> = Task<TeaError, Option<M>>;

/// The identity command: settles immediately with no message. The loop
/// stops dispatching when it sees this settle.
pub fn none<M>() -> Cmd<M>
where
  M: Send + 'static,
{
  Task::new(|| async { Ok(None) })
}

/// Lifts a message-producing task into a command.
pub fn from_task<M>(task: Task<TeaError, M>) -> Cmd<M>
where
  M: Send + 'static,
{
  task.map(Some)
}

/// Wraps an infallible ambient computation into a command.
pub fn perform<M, F, Fut>(f: F) -> Cmd<M>
where
  M: Send + 'static,
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = M> + Send + 'static,
{
  from_task(Task::perform(f))
}

/// Wraps a fallible ambient computation into a command; panics inside it are
/// converted to [`TeaError::Panic`].
pub fn attempt<M, F, Fut>(f: F) -> Cmd<M>
where
  M: Send + 'static,
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<M, TeaError>> + Send + 'static,
{
  from_task(Task::attempt(f))
}

/// Sequences a list of commands into one command settling with the ordered
/// list of their messages. The first failure wins; [`none`] members
/// contribute no message.
pub fn batch<M>(commands: Vec<Cmd<M>>) -> Cmd<Vec<M>>
where
  M: Send + 'static,
{
  Task::sequence(commands).map(|results| Some(results.into_iter().flatten().collect()))
}
