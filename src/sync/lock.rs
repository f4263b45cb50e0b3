//! Strict mutual-exclusion lock guarding the shared region
//!
//! Both the producer's read-modify-write of a block and the consumer's
//! checksum comparison run inside this lock. The current empty/full
//! alternation already makes overlap impossible, but the lock stays: it is
//! what keeps a partially written block unreadable if the protocol ever
//! pipelines block-level production and consumption.

use std::sync::{Mutex, MutexGuard};

use crate::error::{HandoffError, Result};

/// Mutual-exclusion guard with at most one holder at a time
#[derive(Debug, Default)]
pub struct ExclusionLock<T> {
    inner: Mutex<T>,
}

impl<T> ExclusionLock<T> {
    /// Wrap a value in an exclusion lock
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Block until the lock is held, then return the guard.
    ///
    /// Poisoning (a holder panicked) surfaces as a fatal sync error
    /// rather than propagating the panic.
    pub fn lock(&self) -> Result<MutexGuard<'_, T>> {
        self.inner
            .lock()
            .map_err(|_| HandoffError::sync("exclusion lock poisoned by a panicked holder"))
    }

    /// Consume the lock and return the protected value
    pub fn into_inner(self) -> Result<T> {
        self.inner
            .into_inner()
            .map_err(|_| HandoffError::sync("exclusion lock poisoned by a panicked holder"))
    }
}
