//! Thread-shared configuration handle
//!
//! `AppConfig` does no locking of its own. When one thread edits settings
//! while another runs a backup, both hold a `SharedConfig` and readers take a
//! snapshot for the duration of their work.

use std::sync::{Arc, PoisonError, RwLock};

use super::types::AppConfig;

/// Cloneable handle to a single [`AppConfig`] behind a read/write lock
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<AppConfig>>,
}

impl SharedConfig {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> AppConfig {
        // AppConfig holds plain values, so a poisoned lock still guards a
        // complete record.
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutate the settings under the write lock
    ///
    /// The lock is held while `f` runs. Calling `snapshot`, `update` or
    /// `replace` on this handle or any clone of it from inside `f` deadlocks;
    /// read what you need before calling `update`, or use the `&mut
    /// AppConfig` argument.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppConfig) -> R,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    /// Swap in a whole new record, returning the previous one
    pub fn replace(&self, config: AppConfig) -> AppConfig {
        self.update(|current| std::mem::replace(current, config))
    }
}

impl From<AppConfig> for SharedConfig {
    fn from(config: AppConfig) -> Self {
        Self::new(config)
    }
}
