//! Synchronization primitives for the two-worker handoff protocol
//!
//! Two counting signals hand availability back and forth between the
//! producer and consumer without busy-waiting; a strict mutual-exclusion
//! lock serializes block access. Suspension points are exactly the signal
//! acquires; there is no spinning and no timeout.

pub mod lock;
pub mod signal;

pub use lock::ExclusionLock;
pub use signal::{Acquire, SlotSignal};
