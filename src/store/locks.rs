//! Keyed async locks
//!
//! Makes the per-entity single-writer contract explicit: every mutating
//! operation on a given key first acquires that key's mutex, bounded by a
//! timeout so contended callers fail cleanly instead of queueing forever.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct KeyedLocks {
    inner: StdMutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting at most `timeout`.
    ///
    /// `what` names the contended resource in the timeout error.
    pub async fn acquire(
        &self,
        key: i64,
        timeout: Duration,
        what: &str,
    ) -> AppResult<OwnedMutexGuard<()>> {
        let lock = {
            let mut map = self
                .inner
                .lock()
                .map_err(|_| AppError::Unavailable("lock table poisoned".into()))?;
            Arc::clone(map.entry(key).or_default())
        };

        tokio::time::timeout(timeout, lock.lock_owned())
            .await
            .map_err(|_| AppError::Timeout(format!("{} {}", what, key)))
    }
}
