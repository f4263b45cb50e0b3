//! Fixed-size shared region partitioned into equal checksummed blocks
//!
//! The region owns the byte buffer and its block layout; it carries no
//! synchronization of its own. Callers must hold the [`ExclusionLock`]
//! wrapping the region before reading or mutating a block.
//!
//! [`ExclusionLock`]: crate::sync::ExclusionLock

use crate::{
    checksum::TRAILER_SIZE,
    error::{HandoffError, Result},
};

/// Size of every block in the shared region: 30 payload bytes + 2 trailer bytes
pub const BLOCK_SIZE: usize = 32;

/// Upper bound on the total region size, in bytes
pub const MAX_REGION_SIZE: usize = 64_000;

/// Smallest block that can hold at least one payload byte plus the trailer
pub const MIN_BLOCK_SIZE: usize = TRAILER_SIZE + 1;

/// A fixed-size byte buffer divided into equal blocks
#[derive(Debug)]
pub struct SharedRegion {
    bytes: Vec<u8>,
    block_size: usize,
}

impl SharedRegion {
    /// Allocate a zeroed region of `total_size` bytes divided into blocks
    /// of `block_size` bytes.
    ///
    /// Fails if `total_size` is not a positive multiple of `block_size`,
    /// exceeds [`MAX_REGION_SIZE`], or `block_size` is below
    /// [`MIN_BLOCK_SIZE`].
    pub fn new(total_size: usize, block_size: usize) -> Result<Self> {
        if block_size < MIN_BLOCK_SIZE {
            return Err(HandoffError::config(
                "block_size",
                format!("must be at least {} bytes", MIN_BLOCK_SIZE),
            ));
        }
        if total_size == 0 || total_size % block_size != 0 {
            return Err(HandoffError::config(
                "total_size",
                format!("must be a positive multiple of {}", block_size),
            ));
        }
        if total_size > MAX_REGION_SIZE {
            return Err(HandoffError::config(
                "total_size",
                format!("must not exceed {} bytes", MAX_REGION_SIZE),
            ));
        }

        Ok(Self {
            bytes: vec![0u8; total_size],
            block_size,
        })
    }

    /// Total size of the region in bytes
    pub fn total_size(&self) -> usize {
        self.bytes.len()
    }

    /// Size of each block in bytes
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks in the region
    pub fn block_count(&self) -> usize {
        self.bytes.len() / self.block_size
    }

    /// Payload bytes per block (block size minus the trailer)
    pub fn payload_size(&self) -> usize {
        self.block_size - TRAILER_SIZE
    }

    /// Byte range of a block, bounds-checked
    fn block_bounds(&self, index: usize) -> Result<std::ops::Range<usize>> {
        let count = self.block_count();
        if index >= count {
            return Err(HandoffError::index(index, count));
        }
        let start = index * self.block_size;
        Ok(start..start + self.block_size)
    }

    /// Get a read-only view of a block
    pub fn block(&self, index: usize) -> Result<&[u8]> {
        let bounds = self.block_bounds(index)?;
        Ok(&self.bytes[bounds])
    }

    /// Get a mutable view of a block
    pub fn block_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        let bounds = self.block_bounds(index)?;
        Ok(&mut self.bytes[bounds])
    }

    /// Get the raw region contents (read-only)
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
