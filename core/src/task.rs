// core/src/task.rs

//! The lazy, typed, cancellable effect abstraction.
//!
//! A [`Task`] is a *description* of a possibly-failing computation, never the
//! computation itself. Nothing runs until the task is executed, either in
//! place via [`Task::run`] or on the Tokio runtime via [`Task::fork`].
//! Descriptions are not memoized: executing the same value again re-runs the
//! computation from scratch, which makes tasks freely shareable and
//! re-usable. At-most-once side effects per logical invocation are the
//! caller's responsibility for stateful effects such as reading a line.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::AbortHandle;

use crate::error::TeaError;

/// The stored description: a factory producing one settlement future per
/// execution.
type Thunk<E, T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// A deferred, possibly-failing computation settling exactly once per
/// execution with either a success value `T` or a failure value `E`.
pub struct Task<E, T> {
  thunk: Thunk<E, T>,
}

impl<E, T> Clone for Task<E, T> {
  fn clone(&self) -> Self {
    Self {
      thunk: Arc::clone(&self.thunk),
    }
  }
}

impl<E, T> std::fmt::Debug for Task<E, T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Task").finish_non_exhaustive()
  }
}

impl<E, T> Task<E, T>
where
  E: Send + 'static,
  T: Send + 'static,
{
  /// The general lazy constructor: `f` is invoked once per execution and its
  /// future decides the settlement.
  pub fn new<F, Fut>(f: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    Self {
      thunk: Arc::new(move || f().boxed()),
    }
  }

  /// A task that settles successfully with `value` and cannot fail.
  pub fn succeed(value: T) -> Self
  where
    T: Clone + Sync,
  {
    Self::new(move || {
      let value = value.clone();
      async move { Ok(value) }
    })
  }

  /// A task that settles as a failure with `error` and never succeeds.
  pub fn fail(error: E) -> Self
  where
    E: Clone + Sync,
  {
    Self::new(move || {
      let error = error.clone();
      async move { Err(error) }
    })
  }

  /// Escape hatch for an infallible ambient computation.
  ///
  /// A panic inside the computation is a programming error and propagates as
  /// one; use [`Task::attempt`] for computations whose failures should land
  /// on the failure channel.
  pub fn perform<F, Fut>(f: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
  {
    Self::new(move || {
      let fut = f();
      async move { Ok(fut.await) }
    })
  }

  /// Evaluates the description in place. The awaiting caller is the
  /// continuation; suspension happens at this await point.
  pub async fn run(&self) -> Result<T, E> {
    (self.thunk)().await
  }

  /// Begins executing the computation on the Tokio runtime and registers the
  /// settlement callbacks. Exactly one of the two callbacks is invoked,
  /// exactly once, unless the returned handle cancels the execution first.
  ///
  /// Must be called from within a Tokio runtime.
  pub fn fork<FE, FS>(&self, on_failure: FE, on_success: FS) -> CancelHandle
  where
    FE: FnOnce(E) + Send + 'static,
    FS: FnOnce(T) + Send + 'static,
  {
    let fut = (self.thunk)();
    let join = tokio::spawn(async move {
      match fut.await {
        Ok(value) => on_success(value),
        Err(error) => on_failure(error),
      }
    });
    CancelHandle {
      handle: join.abort_handle(),
    }
  }

  /// Transforms the success value; failures pass through unchanged.
  pub fn map<U, F>(self, f: F) -> Task<E, U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
  {
    let thunk = self.thunk;
    let f = Arc::new(f);
    Task::new(move || {
      let fut = thunk();
      let f = Arc::clone(&f);
      async move { fut.await.map(|value| (*f)(value)) }
    })
  }

  /// Runs this task, then on success runs the task produced by `f`. A
  /// failure short-circuits without invoking `f`.
  pub fn and_then<U, F>(self, f: F) -> Task<E, U>
  where
    U: Send + 'static,
    F: Fn(T) -> Task<E, U> + Send + Sync + 'static,
  {
    let thunk = self.thunk;
    let f = Arc::new(f);
    Task::new(move || {
      let fut = thunk();
      let f = Arc::clone(&f);
      async move {
        let value = fut.await?;
        (*f)(value).run().await
      }
    })
  }

  /// Transforms the failure value; successes pass through unchanged.
  pub fn map_err<Y, F>(self, f: F) -> Task<Y, T>
  where
    Y: Send + 'static,
    F: Fn(E) -> Y + Send + Sync + 'static,
  {
    let thunk = self.thunk;
    let f = Arc::new(f);
    Task::new(move || {
      let fut = thunk();
      let f = Arc::clone(&f);
      async move { fut.await.map_err(|error| (*f)(error)) }
    })
  }

  /// Recovery on the failure channel: on failure runs the task produced by
  /// `f`; a success passes through without invoking `f`.
  pub fn or_else<Y, F>(self, f: F) -> Task<Y, T>
  where
    Y: Send + 'static,
    F: Fn(E) -> Task<Y, T> + Send + Sync + 'static,
  {
    let thunk = self.thunk;
    let f = Arc::new(f);
    Task::new(move || {
      let fut = thunk();
      let f = Arc::clone(&f);
      async move {
        match fut.await {
          Ok(value) => Ok(value),
          Err(error) => (*f)(error).run().await,
        }
      }
    })
  }

  /// Runs the tasks strictly left to right and resolves with the ordered
  /// list of their successes. The first failure aborts the remainder (later
  /// tasks never start) and becomes the aggregate failure.
  pub fn sequence(tasks: Vec<Task<E, T>>) -> Task<E, Vec<T>> {
    Task::new(move || {
      let tasks = tasks.clone();
      async move {
        let mut results = Vec::with_capacity(tasks.len());
        for task in &tasks {
          results.push(task.run().await?);
        }
        Ok(results)
      }
    })
  }

  /// Applies `f` to the successes of two tasks, evaluated left to right.
  /// The second task does not start before the first has settled
  /// successfully; the first failure wins and `f` is never invoked.
  pub fn map2<B, R, F>(f: F, first: Task<E, T>, second: Task<E, B>) -> Task<E, R>
  where
    B: Send + 'static,
    R: Send + 'static,
    F: Fn(T, B) -> R + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    Task::new(move || {
      let f = Arc::clone(&f);
      let (first, second) = (first.clone(), second.clone());
      async move {
        let a = first.run().await?;
        let b = second.run().await?;
        Ok((*f)(a, b))
      }
    })
  }

  /// Three-task variant of [`Task::map2`], same ordering and short-circuit
  /// rules.
  pub fn map3<B, C, R, F>(f: F, first: Task<E, T>, second: Task<E, B>, third: Task<E, C>) -> Task<E, R>
  where
    B: Send + 'static,
    C: Send + 'static,
    R: Send + 'static,
    F: Fn(T, B, C) -> R + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    Task::new(move || {
      let f = Arc::clone(&f);
      let (first, second, third) = (first.clone(), second.clone(), third.clone());
      async move {
        let a = first.run().await?;
        let b = second.run().await?;
        let c = third.run().await?;
        Ok((*f)(a, b, c))
      }
    })
  }

  /// Four-task variant of [`Task::map2`].
  pub fn map4<B, C, D, R, F>(
    f: F,
    first: Task<E, T>,
    second: Task<E, B>,
    third: Task<E, C>,
    fourth: Task<E, D>,
  ) -> Task<E, R>
  where
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    R: Send + 'static,
    F: Fn(T, B, C, D) -> R + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    Task::new(move || {
      let f = Arc::clone(&f);
      let (first, second, third, fourth) = (first.clone(), second.clone(), third.clone(), fourth.clone());
      async move {
        let a = first.run().await?;
        let b = second.run().await?;
        let c = third.run().await?;
        let d = fourth.run().await?;
        Ok((*f)(a, b, c, d))
      }
    })
  }

  /// Five-task variant of [`Task::map2`].
  pub fn map5<B, C, D, G, R, F>(
    f: F,
    first: Task<E, T>,
    second: Task<E, B>,
    third: Task<E, C>,
    fourth: Task<E, D>,
    fifth: Task<E, G>,
  ) -> Task<E, R>
  where
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    G: Send + 'static,
    R: Send + 'static,
    F: Fn(T, B, C, D, G) -> R + Send + Sync + 'static,
  {
    let f = Arc::new(f);
    Task::new(move || {
      let f = Arc::clone(&f);
      let (first, second, third, fourth, fifth) = (
        first.clone(),
        second.clone(),
        third.clone(),
        fourth.clone(),
        fifth.clone(),
      );
      async move {
        let a = first.run().await?;
        let b = second.run().await?;
        let c = third.run().await?;
        let d = fourth.run().await?;
        let e = fifth.run().await?;
        Ok((*f)(a, b, c, d, e))
      }
    })
  }
}

impl<T> Task<TeaError, T>
where
  T: Send + 'static,
{
  /// Escape hatch for a fallible ambient computation.
  ///
  /// A panic raised while constructing or awaiting the computation is caught
  /// and converted into [`TeaError::Panic`] carrying the payload's message.
  pub fn attempt<F, Fut>(f: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, TeaError>> + Send + 'static,
  {
    Self::new(move || {
      // Guard the synchronous part (future construction) as well.
      let constructed = std::panic::catch_unwind(AssertUnwindSafe(|| f()));
      async move {
        match constructed {
          Ok(fut) => match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(settled) => settled,
            Err(payload) => Err(TeaError::from_panic(payload)),
          },
          Err(payload) => Err(TeaError::from_panic(payload)),
        }
      }
    })
  }
}

/// The cancellation capability returned by [`Task::fork`].
///
/// Cancelling before settlement aborts the spawned execution, dropping the
/// underlying future together with any timers or handles it was holding, and
/// guarantees that neither settlement callback fires afterward.
#[derive(Debug, Clone)]
pub struct CancelHandle {
  handle: AbortHandle,
}

impl CancelHandle {
  /// Cancels the forked execution. Idempotent; a no-op once the task has
  /// settled.
  pub fn cancel(&self) {
    self.handle.abort();
  }

  /// Whether the forked execution has finished, by settlement or by
  /// cancellation.
  pub fn is_settled(&self) -> bool {
    self.handle.is_finished()
  }
}
