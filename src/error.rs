//! Error types and handling for the handoff engine

/// Result type alias for handoff operations
pub type Result<T> = std::result::Result<T, HandoffError>;

/// A detected checksum mismatch: the single domain-level failure this
/// engine exists to catch. Fatal and immediate; no retry, no recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "checksums at block {block_index}, cycle {cycle_index} did not match: \
     expected {expected}, computed {computed}"
)]
pub struct ChecksumMismatch {
    /// Block index within the region at which validation failed
    pub block_index: usize,
    /// Full-buffer cycle during which validation failed
    pub cycle_index: usize,
    /// Checksum value stored in the block trailer
    pub expected: u16,
    /// Checksum recomputed over the payload bytes
    pub computed: u16,
}

/// Error types for the handoff engine
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    /// Invalid parameters or configuration, rejected before any worker starts
    #[error("invalid parameter: {parameter} - {message}")]
    Config { parameter: String, message: String },

    /// Block index past the end of the shared region
    #[error("block index out of range: {index} >= {count}")]
    Index { index: usize, count: usize },

    /// Failure of a synchronization primitive or worker thread; fatal
    /// infrastructure fault
    #[error("synchronization error: {message}")]
    Sync { message: String },

    /// Detected data corruption
    #[error("data corruption detected: {0}")]
    Mismatch(#[from] ChecksumMismatch),
}

impl HandoffError {
    /// Create a configuration error
    pub fn config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-range block index error
    pub fn index(index: usize, count: usize) -> Self {
        Self::Index { index, count }
    }

    /// Create a synchronization error
    pub fn sync(message: impl Into<String>) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = HandoffError::config("region_size", "must be a multiple of 32");
        assert!(matches!(err, HandoffError::Config { .. }));

        let err = HandoffError::index(4, 2);
        assert!(matches!(err, HandoffError::Index { index: 4, count: 2 }));

        let err = HandoffError::sync("mutex poisoned");
        assert!(matches!(err, HandoffError::Sync { .. }));
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = ChecksumMismatch {
            block_index: 3,
            cycle_index: 1,
            expected: 512,
            computed: 513,
        };
        let display = format!("{}", mismatch);
        assert!(display.contains("block 3"));
        assert!(display.contains("cycle 1"));
        assert!(display.contains("512"));
        assert!(display.contains("513"));

        let err = HandoffError::from(mismatch);
        assert!(format!("{}", err).contains("data corruption"));
    }
}
