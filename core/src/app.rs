// core/src/app.rs

//! The driving loop: owns the (Model, Cmd) pair and dispatches messages.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, error, trace};

use crate::cmd::Cmd;
use crate::error::TeaError;
use crate::sub::Sub;

/// An application assembled from its `init` pair, `update` function, and
/// `subscriptions` function.
///
/// `update` must be total over the message type; Rust's exhaustive `match`
/// enforces that statically. It receives the model by value and returns the
/// replacement pair: state changes by replacement, never by in-place
/// mutation from the runtime's side.
pub struct Application<Model, M, U, S>
where
  U: Fn(M, Model) -> (Model, Cmd<M>),
  S: Fn(&Model) -> Sub,
{
  init: (Model, Cmd<M>),
  update: U,
  subscriptions: S,
}

impl<Model, M, U, S> Application<Model, M, U, S>
where
  Model: Send + 'static,
  M: Send + 'static,
  U: Fn(M, Model) -> (Model, Cmd<M>),
  S: Fn(&Model) -> Sub,
{
  pub fn new(init: (Model, Cmd<M>), update: U, subscriptions: S) -> Self {
    Self {
      init,
      update,
      subscriptions,
    }
  }

  /// Runs the dispatch loop until it quiesces or halts abnormally.
  ///
  /// Each iteration executes the held command exactly once and replaces the
  /// whole (Model, Cmd) pair with the pair `update` returns; at most one
  /// command is ever in flight. The loop is an explicit `loop`, not
  /// recursion, so long-lived interactive sessions cannot grow the call
  /// stack.
  ///
  /// Terminal conditions:
  /// - the command settles with no message ([`crate::cmd::none`]): dispatch
  ///   is complete, returns `Ok(())`;
  /// - the command fails at top level: logged and returned; recovery must be
  ///   composed into the command itself via `or_else`/`map_err`;
  /// - `update` panics: caught, logged, returned as [`TeaError::Panic`].
  ///
  /// The loop never restarts itself after a failure; that is a supervisor's
  /// job, outside this crate.
  pub async fn run(self) -> Result<(), TeaError> {
    let (mut model, mut command) = self.init;
    debug!("application loop starting");
    loop {
      // Evaluated every iteration, interpreted by nothing: subscriptions
      // are inert in this design.
      let _subs: Sub = (self.subscriptions)(&model);

      // Settle first so the command can be replaced inside the match arms.
      let settled = command.run().await;
      match settled {
        Ok(Some(msg)) => {
          trace!("command settled; dispatching message through update");
          match catch_unwind(AssertUnwindSafe(|| (self.update)(msg, model))) {
            Ok((next_model, next_command)) => {
              model = next_model;
              command = next_command;
            }
            Err(payload) => {
              let err = TeaError::from_panic(payload);
              error!(error = %err, "update panicked; halting dispatch");
              return Err(err);
            }
          }
        }
        Ok(None) => {
          debug!("command settled with no message; dispatch complete");
          return Ok(());
        }
        Err(err) => {
          error!(error = %err, "top-level command failed; halting dispatch");
          return Err(err);
        }
      }
    }
  }
}
