//! Full-protocol integration tests for the block handoff engine
//!
//! These run the orchestrator end to end with both worker threads and
//! assert the no-data-loss property: every configured block is produced
//! and validated exactly once per cycle.

use handoff::{HandoffConfig, HandoffError, Orchestrator, Outcome, RunState, BLOCK_SIZE};

fn run_expecting_success(config: HandoffConfig) -> handoff::RunReport {
    let mut orchestrator = Orchestrator::new(config);
    match orchestrator.run().unwrap() {
        Outcome::Success { report } => {
            assert_eq!(orchestrator.state(), RunState::Completed);
            report
        }
        Outcome::ChecksumMismatch(m) => panic!("unexpected corruption: {}", m),
    }
}

#[test]
fn test_two_blocks_single_cycle() {
    // The concrete reference scenario: 64 bytes, one cycle, two exchanges
    let report = run_expecting_success(HandoffConfig::new(64, 1).with_seed(42));
    assert_eq!(report.blocks_per_cycle, 2);
    assert_eq!(report.cycles, 1);
    assert_eq!(report.blocks_produced, 2);
    assert_eq!(report.blocks_consumed, 2);
}

#[test]
fn test_single_block_region() {
    let report = run_expecting_success(HandoffConfig::new(BLOCK_SIZE, 3).with_seed(7));
    assert_eq!(report.blocks_per_cycle, 1);
    assert_eq!(report.blocks_produced, 3);
    assert_eq!(report.blocks_consumed, 3);
}

#[test]
fn test_multi_cycle_run() {
    let report = run_expecting_success(HandoffConfig::new(1024, 8).with_seed(99));
    assert_eq!(report.blocks_per_cycle, 32);
    assert_eq!(report.blocks_produced, 256);
    assert_eq!(report.blocks_consumed, 256);
}

#[test]
fn test_maximum_region() {
    let report = run_expecting_success(HandoffConfig::new(64_000, 2).with_seed(1));
    assert_eq!(report.blocks_per_cycle, 2000);
    assert_eq!(report.blocks_produced, 4000);
    assert_eq!(report.blocks_consumed, 4000);
}

#[test]
fn test_entropy_seeded_run() {
    let report = run_expecting_success(HandoffConfig::new(128, 2));
    assert_eq!(report.blocks_produced, report.blocks_consumed);
}

#[test]
fn test_repeated_runs_are_independent() {
    for _ in 0..3 {
        run_expecting_success(HandoffConfig::new(96, 2).with_seed(5));
    }
}

#[test]
fn test_rejects_non_multiple_region() {
    let mut orchestrator = Orchestrator::new(HandoffConfig::new(33, 1));
    assert!(matches!(
        orchestrator.run(),
        Err(HandoffError::Config { .. })
    ));
    assert_eq!(orchestrator.state(), RunState::Failed);
}

#[test]
fn test_rejects_oversized_region() {
    let mut orchestrator = Orchestrator::new(HandoffConfig::new(70_000, 1));
    assert!(matches!(
        orchestrator.run(),
        Err(HandoffError::Config { .. })
    ));
}

#[test]
fn test_rejects_zero_repeat_count() {
    let mut orchestrator = Orchestrator::new(HandoffConfig::new(64, 0));
    assert!(matches!(
        orchestrator.run(),
        Err(HandoffError::Config { .. })
    ));
}
