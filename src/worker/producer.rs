//! Producer worker: fills blocks with random payload and a checksum trailer

use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::{
    checksum,
    error::Result,
    region::SharedRegion,
    sync::{Acquire, ExclusionLock, SlotSignal},
};

/// Worker that fills every block of the region with pseudo-random payload
/// bytes and an additive checksum trailer, once per cycle.
///
/// Generic over the random source so tests can inject a seeded RNG.
#[derive(Debug)]
pub struct Producer<R> {
    region: Arc<ExclusionLock<SharedRegion>>,
    empty: Arc<SlotSignal>,
    full: Arc<SlotSignal>,
    cycles: usize,
    rng: R,
    blocks_produced: usize,
}

impl<R: Rng> Producer<R> {
    /// Create a producer for `cycles` full-buffer passes
    pub fn new(
        region: Arc<ExclusionLock<SharedRegion>>,
        empty: Arc<SlotSignal>,
        full: Arc<SlotSignal>,
        cycles: usize,
        rng: R,
    ) -> Self {
        Self {
            region,
            empty,
            full,
            cycles,
            rng,
            blocks_produced: 0,
        }
    }

    /// Total blocks produced so far
    pub fn blocks_produced(&self) -> usize {
        self.blocks_produced
    }

    /// Run the production loop to completion.
    ///
    /// Per cycle: wait once for the empty signal (the consumer releases it
    /// after draining the previous cycle), then per block fill the payload
    /// with values in `[0, 255)` and write the trailer inside the exclusion
    /// lock, releasing the full signal for each published block.
    ///
    /// Returns the number of blocks produced. Stops early and cleanly if
    /// the empty signal is closed during teardown.
    pub fn run(&mut self) -> Result<usize> {
        let block_count = self.region.lock()?.block_count();

        for cycle in 0..self.cycles {
            match self.empty.acquire()? {
                Acquire::Granted => {}
                Acquire::Closed => {
                    debug!("producer: empty signal closed before cycle {}, stopping", cycle);
                    return Ok(self.blocks_produced);
                }
            }

            for block_index in 0..block_count {
                {
                    let mut region = self.region.lock()?;
                    let block = region.block_mut(block_index)?;
                    let payload = checksum::payload_mut(block);
                    for byte in payload.iter_mut() {
                        *byte = self.rng.gen_range(0..255);
                    }
                    let value = checksum::compute(payload);
                    checksum::write_trailer(block, value);
                }
                self.full.release()?;
                self.blocks_produced += 1;
            }
            debug!("producer: cycle {} published ({} blocks)", cycle, block_count);
        }

        Ok(self.blocks_produced)
    }
}
