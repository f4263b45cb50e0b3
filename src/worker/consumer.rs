//! Consumer worker: validates the checksum trailer of every published block

use std::sync::Arc;

use log::{debug, error};

use crate::{
    checksum,
    error::{ChecksumMismatch, HandoffError, Result},
    region::SharedRegion,
    sync::{Acquire, ExclusionLock, SlotSignal},
};

/// Worker that waits for each published block, recomputes its checksum and
/// compares it with the stored trailer. A mismatch is fatal: the run stops
/// at the offending block with no retry and no further validation.
#[derive(Debug)]
pub struct Consumer {
    region: Arc<ExclusionLock<SharedRegion>>,
    empty: Arc<SlotSignal>,
    full: Arc<SlotSignal>,
    cycles: usize,
    blocks_consumed: usize,
}

impl Consumer {
    /// Create a consumer for `cycles` full-buffer passes
    pub fn new(
        region: Arc<ExclusionLock<SharedRegion>>,
        empty: Arc<SlotSignal>,
        full: Arc<SlotSignal>,
        cycles: usize,
    ) -> Self {
        Self {
            region,
            empty,
            full,
            cycles,
            blocks_consumed: 0,
        }
    }

    /// Total blocks validated so far
    pub fn blocks_consumed(&self) -> usize {
        self.blocks_consumed
    }

    /// Run the validation loop to completion.
    ///
    /// Per block: wait for the full signal, then recompute and compare the
    /// checksum inside the exclusion lock. After a whole cycle passes, the
    /// empty signal is released once so the producer may begin the next
    /// cycle.
    ///
    /// Returns the number of blocks validated, or
    /// [`HandoffError::Mismatch`] on the first corrupted block. Stops early
    /// and cleanly if the full signal is closed during teardown.
    pub fn run(&mut self) -> Result<usize> {
        let block_count = self.region.lock()?.block_count();

        for cycle in 0..self.cycles {
            for block_index in 0..block_count {
                match self.full.acquire()? {
                    Acquire::Granted => {}
                    Acquire::Closed => {
                        debug!("consumer: full signal closed at cycle {}, stopping", cycle);
                        return Ok(self.blocks_consumed);
                    }
                }

                {
                    let region = self.region.lock()?;
                    let block = region.block(block_index)?;
                    let computed = checksum::compute(checksum::payload(block));
                    let stored = checksum::read_trailer(block);
                    if stored != computed {
                        let mismatch = ChecksumMismatch {
                            block_index,
                            cycle_index: cycle,
                            expected: stored,
                            computed,
                        };
                        error!("consumer: {}", mismatch);
                        return Err(HandoffError::Mismatch(mismatch));
                    }
                }
                self.blocks_consumed += 1;
            }

            self.empty.release()?;
            debug!("consumer: cycle {} validated ({} blocks)", cycle, block_count);
        }

        Ok(self.blocks_consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::BLOCK_SIZE;

    fn region_with_valid_blocks(region_size: usize) -> Arc<ExclusionLock<SharedRegion>> {
        let mut region = SharedRegion::new(region_size, BLOCK_SIZE).unwrap();
        for index in 0..region.block_count() {
            let block = region.block_mut(index).unwrap();
            for (offset, byte) in checksum::payload_mut(block).iter_mut().enumerate() {
                *byte = (index * 31 + offset) as u8;
            }
            let value = checksum::compute(checksum::payload(block));
            checksum::write_trailer(block, value);
        }
        Arc::new(ExclusionLock::new(region))
    }

    #[test]
    fn test_valid_blocks_pass() {
        let region = region_with_valid_blocks(64);
        let empty = Arc::new(SlotSignal::new("empty", 0));
        let full = Arc::new(SlotSignal::new("full", 2));
        let mut consumer = Consumer::new(region, Arc::clone(&empty), full, 1);

        assert_eq!(consumer.run().unwrap(), 2);
        assert_eq!(consumer.blocks_consumed(), 2);
        // End-of-cycle handback to the producer
        assert_eq!(empty.permits().unwrap(), 1);
    }

    #[test]
    fn test_mismatch_is_fatal_and_immediate() {
        let region = region_with_valid_blocks(96);
        {
            let mut guard = region.lock().unwrap();
            guard.block_mut(1).unwrap()[0] ^= 0x01;
        }
        let empty = Arc::new(SlotSignal::new("empty", 0));
        let full = Arc::new(SlotSignal::new("full", 3));
        let mut consumer = Consumer::new(region, Arc::clone(&empty), full, 1);

        match consumer.run() {
            Err(HandoffError::Mismatch(m)) => {
                assert_eq!(m.block_index, 1);
                assert_eq!(m.cycle_index, 0);
                assert_ne!(m.expected, m.computed);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        // Block 0 passed; nothing after the corrupted block was touched
        assert_eq!(consumer.blocks_consumed(), 1);
        assert_eq!(empty.permits().unwrap(), 0);
    }

    #[test]
    fn test_closed_full_signal_stops_consumption() {
        let region = region_with_valid_blocks(64);
        let empty = Arc::new(SlotSignal::new("empty", 0));
        let full = Arc::new(SlotSignal::new("full", 0));
        full.close().unwrap();
        let mut consumer = Consumer::new(region, empty, full, 3);

        assert_eq!(consumer.run().unwrap(), 0);
    }
}
