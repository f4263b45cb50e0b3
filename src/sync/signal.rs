//! Counting slot signal built on a mutex and condition variable
//!
//! `acquire` blocks while the counter is zero and then decrements it;
//! `release` increments it and wakes one waiter. A closed signal wakes
//! every waiter and makes all subsequent acquires observe shutdown, which
//! lets the orchestrator retire a blocked worker after a fatal failure
//! instead of terminating it from inside the peer.

use std::sync::{Condvar, Mutex};

use crate::error::{HandoffError, Result};

/// Result of an acquire on a [`SlotSignal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// A permit was obtained; the counter has been decremented
    Granted,
    /// The signal was closed; the caller should stop its protocol loop
    Closed,
}

#[derive(Debug)]
struct SignalState {
    permits: usize,
    closed: bool,
}

/// A counting signal handing off availability of one slot at a time
#[derive(Debug)]
pub struct SlotSignal {
    name: &'static str,
    state: Mutex<SignalState>,
    available: Condvar,
}

impl SlotSignal {
    /// Create a signal with an initial permit count
    pub fn new(name: &'static str, permits: usize) -> Self {
        Self {
            name,
            state: Mutex::new(SignalState {
                permits,
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    fn poisoned(&self) -> HandoffError {
        HandoffError::sync(format!("signal '{}' poisoned by a panicked holder", self.name))
    }

    /// Block until a permit is available or the signal is closed.
    ///
    /// Returns [`Acquire::Granted`] after decrementing the counter, or
    /// [`Acquire::Closed`] without touching it. Waits indefinitely; there
    /// are no timeout semantics in this protocol.
    pub fn acquire(&self) -> Result<Acquire> {
        let mut state = self.state.lock().map_err(|_| self.poisoned())?;
        loop {
            if state.closed {
                return Ok(Acquire::Closed);
            }
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(Acquire::Granted);
            }
            state = self
                .available
                .wait(state)
                .map_err(|_| self.poisoned())?;
        }
    }

    /// Add one permit and wake one waiter
    pub fn release(&self) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| self.poisoned())?;
        state.permits += 1;
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Close the signal, waking every waiter
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| self.poisoned())?;
        state.closed = true;
        drop(state);
        self.available.notify_all();
        Ok(())
    }

    /// Current permit count
    pub fn permits(&self) -> Result<usize> {
        let state = self.state.lock().map_err(|_| self.poisoned())?;
        Ok(state.permits)
    }

    /// Whether the signal has been closed
    pub fn is_closed(&self) -> Result<bool> {
        let state = self.state.lock().map_err(|_| self.poisoned())?;
        Ok(state.closed)
    }
}
