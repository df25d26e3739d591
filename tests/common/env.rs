//! Process environment isolation for in-process tests.
//!
//! Every guard holds one global lock, so tests touching the environment run
//! one at a time. Never hold two guards at once; use [`EnvGuard::apply`].

use std::path::Path;

use env_lock::lock_env;
use tracing::trace;

/// Restores the touched variables and releases the lock on drop.
pub struct EnvGuard<'a> {
    _lock: env_lock::EnvGuard<'a>,
}

impl<'a> EnvGuard<'a> {
    /// Set or remove several variables under one lock. `None` removes.
    #[must_use]
    pub fn apply(vars: &[(&'a str, Option<&str>)]) -> Self {
        trace!(?vars, "Locking environment");
        Self {
            _lock: lock_env(vars.iter().copied()),
        }
    }

    #[must_use]
    pub fn set(key: &'a str, value: &str) -> Self {
        Self::apply(&[(key, Some(value))])
    }

    #[must_use]
    pub fn remove(key: &'a str) -> Self {
        Self::apply(&[(key, None)])
    }
}

/// Point `HOME` at `dir` so `~` paths resolve inside it.
#[must_use]
pub fn home_at(dir: &Path) -> EnvGuard<'static> {
    EnvGuard::set("HOME", &dir.to_string_lossy())
}
