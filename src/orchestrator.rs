//! Run orchestration: configuration, worker lifetimes and the final outcome

use std::{sync::Arc, thread};

use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{ChecksumMismatch, HandoffError, Result},
    region::{SharedRegion, BLOCK_SIZE, MAX_REGION_SIZE},
    sync::{ExclusionLock, SlotSignal},
    worker::{Consumer, Producer},
};

/// Configuration for a handoff run
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    /// Total size of the shared region in bytes; a positive multiple of
    /// [`BLOCK_SIZE`], at most [`MAX_REGION_SIZE`]
    pub region_size: usize,
    /// Number of full-buffer produce/consume cycles; at least 1
    pub repeat_count: usize,
    /// Optional seed for deterministic payload generation
    pub seed: Option<u64>,
}

impl HandoffConfig {
    /// Create a configuration with entropy-seeded payload generation
    pub fn new(region_size: usize, repeat_count: usize) -> Self {
        Self {
            region_size,
            repeat_count,
            seed: None,
        }
    }

    /// Use a fixed seed for the producer's random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.region_size == 0 || self.region_size % BLOCK_SIZE != 0 {
            return Err(HandoffError::config(
                "region_size",
                format!("must be a positive multiple of {}", BLOCK_SIZE),
            ));
        }
        if self.region_size > MAX_REGION_SIZE {
            return Err(HandoffError::config(
                "region_size",
                format!("must not exceed {} bytes", MAX_REGION_SIZE),
            ));
        }
        if self.repeat_count == 0 {
            return Err(HandoffError::config("repeat_count", "must be at least 1"));
        }
        Ok(())
    }
}

/// Lifecycle of an orchestrated run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started yet
    Idle,
    /// Workers are executing
    Running,
    /// Every cycle passed validation
    Completed,
    /// Configuration, infrastructure or checksum failure
    Failed,
}

/// Counters from a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Number of full-buffer cycles executed
    pub cycles: usize,
    /// Blocks per cycle (region size / block size)
    pub blocks_per_cycle: usize,
    /// Total blocks produced across all cycles
    pub blocks_produced: usize,
    /// Total blocks validated across all cycles
    pub blocks_consumed: usize,
}

/// Terminal state of a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every block of every cycle passed validation
    Success {
        /// Produce/consume counters for the run
        report: RunReport,
    },
    /// The consumer detected a corrupted block; the run stopped there
    ChecksumMismatch(ChecksumMismatch),
}

impl Outcome {
    /// Whether the run completed without corruption
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Owner of the shared region, the signal pair and both worker lifetimes
#[derive(Debug)]
pub struct Orchestrator {
    config: HandoffConfig,
    state: RunState,
}

impl Orchestrator {
    /// Create an orchestrator for the given configuration
    pub fn new(config: HandoffConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The configuration this orchestrator runs
    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    /// Execute one complete run: validate the configuration, allocate the
    /// region, start both workers as threads, join them and report the
    /// outcome.
    ///
    /// A checksum mismatch is a terminal [`Outcome`], not an `Err`;
    /// configuration and synchronization failures are errors. In either
    /// failure case both signals are closed before returning, so neither
    /// worker is left blocked.
    pub fn run(&mut self) -> Result<Outcome> {
        self.state = RunState::Running;
        let result = self.run_workers();
        self.state = match &result {
            Ok(outcome) if outcome.is_success() => RunState::Completed,
            _ => RunState::Failed,
        };
        result
    }

    fn run_workers(&self) -> Result<Outcome> {
        self.config.validate()?;

        let region = SharedRegion::new(self.config.region_size, BLOCK_SIZE)?;
        let blocks_per_cycle = region.block_count();
        let cycles = self.config.repeat_count;
        info!(
            "starting handoff run: {} blocks per cycle, {} cycles",
            blocks_per_cycle, cycles
        );

        let region = Arc::new(ExclusionLock::new(region));
        // One round may start immediately; no block is ready yet
        let empty = Arc::new(SlotSignal::new("empty", 1));
        let full = Arc::new(SlotSignal::new("full", 0));

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut producer = Producer::new(
            Arc::clone(&region),
            Arc::clone(&empty),
            Arc::clone(&full),
            cycles,
            rng,
        );
        let mut consumer = Consumer::new(
            Arc::clone(&region),
            Arc::clone(&empty),
            Arc::clone(&full),
            cycles,
        );

        let producer_handle = thread::Builder::new()
            .name("producer".into())
            .spawn(move || producer.run())
            .map_err(|e| HandoffError::sync(format!("failed to spawn producer thread: {}", e)))?;

        let consumer_handle = match thread::Builder::new()
            .name("consumer".into())
            .spawn(move || consumer.run())
        {
            Ok(handle) => handle,
            Err(e) => {
                let _ = empty.close();
                let _ = full.close();
                let _ = producer_handle.join();
                return Err(HandoffError::sync(format!(
                    "failed to spawn consumer thread: {}",
                    e
                )));
            }
        };

        // The consumer is the only worker with a domain-level failure path.
        // If it stops early the producer may be parked on the next cycle's
        // empty permit; closing both signals retires it.
        let consumer_result = consumer_handle.join();
        if !matches!(consumer_result, Ok(Ok(_))) {
            let _ = empty.close();
            let _ = full.close();
        }
        let producer_result = producer_handle.join();

        let blocks_consumed = match consumer_result {
            Ok(Ok(consumed)) => consumed,
            Ok(Err(HandoffError::Mismatch(mismatch))) => {
                return Ok(Outcome::ChecksumMismatch(mismatch));
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(HandoffError::sync("consumer thread panicked")),
        };
        let blocks_produced = match producer_result {
            Ok(Ok(produced)) => produced,
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(HandoffError::sync("producer thread panicked")),
        };

        info!(
            "handoff run complete: {} blocks produced, {} blocks validated",
            blocks_produced, blocks_consumed
        );
        Ok(Outcome::Success {
            report: RunReport {
                cycles,
                blocks_per_cycle,
                blocks_produced,
                blocks_consumed,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(HandoffConfig::new(64, 1).validate().is_ok());
        assert!(HandoffConfig::new(64_000, 10).validate().is_ok());

        assert!(HandoffConfig::new(33, 1).validate().is_err());
        assert!(HandoffConfig::new(0, 1).validate().is_err());
        assert!(HandoffConfig::new(70_000, 1).validate().is_err());
        assert!(HandoffConfig::new(64, 0).validate().is_err());
    }

    #[test]
    fn test_state_starts_idle() {
        let orchestrator = Orchestrator::new(HandoffConfig::new(64, 1));
        assert_eq!(orchestrator.state(), RunState::Idle);
    }

    #[test]
    fn test_invalid_config_fails_before_any_worker_starts() {
        let mut orchestrator = Orchestrator::new(HandoffConfig::new(33, 1));
        assert!(matches!(
            orchestrator.run(),
            Err(HandoffError::Config { .. })
        ));
        assert_eq!(orchestrator.state(), RunState::Failed);
    }
}
