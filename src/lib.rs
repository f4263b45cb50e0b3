//! # Handoff - Checksummed Shared-Buffer Exchange Between Two Threads
//!
//! Handoff demonstrates safe handoff of a fixed-size shared buffer between
//! exactly two cooperating workers: a producer filling fixed 32-byte blocks
//! with pseudo-random payload plus a 16-bit additive checksum trailer, and a
//! consumer revalidating every block. Coordination uses two counting signals
//! (no busy-waiting) plus a strict exclusion lock around block access.
//!
//! ## Protocol
//!
//! ```text
//!  Producer                          Consumer
//!     │ acquire(empty)                  │
//!     │ per block:                      │ per block:
//!     │   lock ── fill ── trailer       │   acquire(full)
//!     │   release(full) ───────────────►│   lock ── recompute ── compare
//!     │                                 │ after the cycle:
//!     │◄──────────────── release(empty) │
//! ```
//!
//! The empty/full pair enforces strict alternation at cycle granularity:
//! the producer cannot start cycle *k+1* until the consumer has drained
//! cycle *k*. The exclusion lock adds block-level exclusivity so a partially
//! written block is never read. A checksum mismatch is fatal: the run stops
//! at the offending block and reports which block, cycle and values
//! triggered it.
//!
//! ## Example
//!
//! ```no_run
//! use handoff::{HandoffConfig, Orchestrator};
//!
//! let mut orchestrator = Orchestrator::new(HandoffConfig::new(1024, 4));
//! let outcome = orchestrator.run()?;
//! assert!(outcome.is_success());
//! # Ok::<(), handoff::HandoffError>(())
//! ```

pub mod checksum;
pub mod error;
pub mod orchestrator;
pub mod region;
pub mod sync;
pub mod worker;

pub use checksum::TRAILER_SIZE;
pub use error::{ChecksumMismatch, HandoffError, Result};
pub use orchestrator::{HandoffConfig, Orchestrator, Outcome, RunReport, RunState};
pub use region::{SharedRegion, BLOCK_SIZE, MAX_REGION_SIZE, MIN_BLOCK_SIZE};
pub use sync::{Acquire, ExclusionLock, SlotSignal};
pub use worker::{Consumer, Producer};
