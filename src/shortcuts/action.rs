//! Shortcut actions and the boundary that invokes them.
//!
//! Actions never fail past the dispatcher: errors returned by synchronous
//! actions, panics, and failed async futures are logged and dropped. Async
//! actions are spawned onto a local pool and never awaited by dispatch; the
//! host drives them with [`ActionExecutor::run_until_stalled`].

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use futures::FutureExt;
use tracing::{debug, error};

use crate::error::ResultExt;

pub type SyncActionFn = dyn Fn() -> anyhow::Result<()>;
pub type AsyncActionFn = dyn Fn() -> LocalBoxFuture<'static, anyhow::Result<()>>;

/// What a shortcut does when it fires.
#[derive(Clone)]
pub enum ShortcutAction {
    Sync(Arc<SyncActionFn>),
    Async(Arc<AsyncActionFn>),
}

impl ShortcutAction {
    pub fn new(f: impl Fn() -> anyhow::Result<()> + 'static) -> Self {
        Self::Sync(Arc::new(f))
    }

    /// Wrap a closure that cannot fail.
    pub fn infallible(f: impl Fn() + 'static) -> Self {
        Self::Sync(Arc::new(move || {
            f();
            Ok(())
        }))
    }

    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        Self::Async(Arc::new(move || f().boxed_local()))
    }

    pub fn noop() -> Self {
        Self::infallible(|| {})
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }
}

impl Default for ShortcutAction {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("ShortcutAction::Sync(..)"),
            Self::Async(_) => f.write_str("ShortcutAction::Async(..)"),
        }
    }
}

/// Runs shortcut actions, isolating the caller from their failures.
pub struct ActionExecutor {
    pool: LocalPool,
    spawner: LocalSpawner,
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self { pool, spawner }
    }

    /// Fire an action. Returns `false` when it failed synchronously.
    pub fn invoke(&self, shortcut_id: &str, action: &ShortcutAction) -> bool {
        match action {
            ShortcutAction::Sync(f) => match catch_unwind(AssertUnwindSafe(|| f())) {
                Ok(result) => result
                    .map_err(|e| format!("shortcut '{}' action failed: {:#}", shortcut_id, e))
                    .log_err()
                    .is_some(),
                Err(payload) => {
                    error!(
                        shortcut_id,
                        panic = %panic_message(payload.as_ref()),
                        "Shortcut action panicked"
                    );
                    false
                }
            },
            ShortcutAction::Async(f) => {
                let future = match catch_unwind(AssertUnwindSafe(|| f())) {
                    Ok(future) => future,
                    Err(payload) => {
                        error!(
                            shortcut_id,
                            panic = %panic_message(payload.as_ref()),
                            "Shortcut action panicked before yielding a future"
                        );
                        return false;
                    }
                };
                let id = shortcut_id.to_string();
                let guarded = async move {
                    match AssertUnwindSafe(future).catch_unwind().await {
                        Ok(Ok(())) => debug!(shortcut_id = %id, "Async shortcut action completed"),
                        Ok(Err(e)) => {
                            error!(shortcut_id = %id, error = %format!("{:#}", e), "Async shortcut action failed")
                        }
                        Err(payload) => error!(
                            shortcut_id = %id,
                            panic = %panic_message(payload.as_ref()),
                            "Async shortcut action panicked"
                        ),
                    }
                };
                self.spawner
                    .spawn_local(guarded)
                    .map_err(|e| format!("could not spawn action for '{}': {}", shortcut_id, e))
                    .log_err()
                    .is_some()
            }
        }
    }

    /// Poll spawned async actions until none can make progress.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn sync_action_runs() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let action = ShortcutAction::infallible(move || counter.set(counter.get() + 1));

        let executor = ActionExecutor::new();
        assert!(executor.invoke("test", &action));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn sync_error_is_contained() {
        let action = ShortcutAction::new(|| anyhow::bail!("boom"));
        let executor = ActionExecutor::new();
        assert!(!executor.invoke("test", &action));
    }

    #[test]
    fn sync_panic_is_contained() {
        let action = ShortcutAction::infallible(|| panic!("kaboom"));
        let executor = ActionExecutor::new();
        assert!(!executor.invoke("test", &action));
    }

    #[test]
    fn async_action_is_not_awaited_by_invoke() {
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        let action = ShortcutAction::from_async(move || {
            let flag = flag.clone();
            async move {
                flag.set(true);
                Ok(())
            }
        });

        let mut executor = ActionExecutor::new();
        assert!(executor.invoke("test", &action));
        assert!(!done.get());

        executor.run_until_stalled();
        assert!(done.get());
    }

    #[test]
    fn async_failure_is_contained() {
        let action = ShortcutAction::from_async(|| async { anyhow::bail!("rejected") });
        let mut executor = ActionExecutor::new();
        assert!(executor.invoke("test", &action));
        executor.run_until_stalled();
    }
}
