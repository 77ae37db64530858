// core/src/lib.rs

//! tealoop - a minimal model/update/command runtime for asynchronous
//! command-line programs.
//!
//! Application state (the "Model") evolves only in response to discrete
//! messages, and every side effect is a deferred, inspectable value: a
//! [`Task`], specialized as a [`Cmd`] when it produces a message. The
//! [`Application`] loop executes the current command, feeds the resulting
//! message through `update`, and schedules the next command, forever or
//! until it quiesces.

/// The driving loop that owns the (Model, Cmd) pair.
pub mod app;
/// Commands: tasks specialized to produce application messages.
pub mod cmd;
/// Defines the crate error type.
pub mod error;
/// Inert subscription descriptors.
pub mod sub;
/// The lazy, typed, cancellable effect abstraction.
pub mod task;

pub use app::Application;
pub use cmd::Cmd;
pub use error::TeaError;
pub use sub::Sub;
pub use task::{CancelHandle, Task};
