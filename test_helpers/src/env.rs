//! Scoped mutation of process environment variables.
//!
//! Every mutation and every restoration runs under one global re-entrant
//! mutex. [`VarGuard`]s restore a single variable when dropped; an
//! [`EnvScope`] additionally keeps the mutex held until all of its guards
//! have been restored, so a test can observe a fixed environment while it
//! builds child-process environments from it.
//!
//! # Examples
//!
//! ```
//! use blend_config_test_helpers::env;
//!
//! let _scope = env::scope([("BLEND_DOC_A", Some("1")), ("BLEND_DOC_B", None)]);
//! assert_eq!(std::env::var("BLEND_DOC_A").ok().as_deref(), Some("1"));
//! assert!(std::env::var_os("BLEND_DOC_B").is_none());
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable to its previous state on drop.
#[must_use = "dropping restores the prior value"]
pub struct VarGuard {
    key: String,
    previous: Option<OsString>,
}

impl VarGuard {
    fn apply(key: String, value: Option<&OsStr>) -> Self {
        let _lock = ENV_LOCK.lock();
        let previous = env::var_os(&key);
        write(&key, value);
        Self { key, previous }
    }

    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for VarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarGuard")
            .field("key", &self.key)
            .field("was_set", &self.previous.is_some())
            .finish()
    }
}

impl Drop for VarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        write(&self.key, self.previous.as_deref());
    }
}

fn write(key: &str, value: Option<&OsStr>) {
    // SAFETY: callers hold `ENV_LOCK`, and tests touching the environment
    // are additionally serialised with `serial_test`.
    match value {
        Some(value) => unsafe { env::set_var(key, value) },
        None => unsafe { env::remove_var(key) },
    }
}

/// Set `key` to `value` until the guard is dropped.
///
/// ```
/// use blend_config_test_helpers::env;
///
/// {
///     let _guard = env::set_var("BLEND_DOC_SET", "on");
///     assert_eq!(std::env::var("BLEND_DOC_SET").ok().as_deref(), Some("on"));
/// }
/// assert!(std::env::var_os("BLEND_DOC_SET").is_none());
/// ```
pub fn set_var<K, V>(key: K, value: V) -> VarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    VarGuard::apply(key.into(), Some(value.as_ref()))
}

/// Unset `key` until the guard is dropped.
pub fn remove_var<K>(key: K) -> VarGuard
where
    K: Into<String>,
{
    VarGuard::apply(key.into(), None)
}

/// Holds the environment lock together with a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<VarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Names of the variables this scope controls.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(VarGuard::key)
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.guards).finish()
    }
}

/// Set (`Some`) or unset (`None`) each variable and hold the lock until the
/// returned scope is dropped.
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_LOCK.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| VarGuard::apply(key.into(), value.as_ref().map(AsRef::as_ref)))
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}
