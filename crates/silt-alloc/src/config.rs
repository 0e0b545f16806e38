//! Heap allocator configuration parameters.

use crate::error::ConfigError;

/// Configuration for [`HeapAllocator`](crate::HeapAllocator).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Alignment of every payload pointer handed to the GUI library.
    ///
    /// Default: 16, matching `max_align_t` on 64-bit targets. Must be a
    /// power of two and at least `align_of::<usize>()`.
    pub alignment: usize,
}

impl HeapConfig {
    /// Default payload alignment.
    pub const DEFAULT_ALIGNMENT: usize = 16;

    /// Smallest alignment that keeps the size header aligned.
    pub const MIN_ALIGNMENT: usize = core::mem::align_of::<usize>();

    /// Create a config with the given alignment. Call [`validate`](Self::validate)
    /// before use, or go through `HeapAllocator::with_config`.
    pub fn new(alignment: usize) -> Self {
        Self { alignment }
    }

    /// Check the alignment constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alignment.is_power_of_two() || self.alignment < Self::MIN_ALIGNMENT {
            return Err(ConfigError::InvalidAlignment {
                alignment: self.alignment,
                minimum: Self::MIN_ALIGNMENT,
            });
        }
        Ok(())
    }

    /// Bytes reserved in front of each payload for the size header.
    ///
    /// Padded up to `alignment` so the payload that follows stays aligned.
    pub fn header_bytes(&self) -> usize {
        self.alignment.max(core::mem::size_of::<usize>())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIGNMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = HeapConfig::default();
        assert_eq!(config.alignment, 16);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn non_power_of_two_rejected() {
        let err = HeapConfig::new(24).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAlignment {
                alignment: 24,
                minimum: HeapConfig::MIN_ALIGNMENT,
            }
        );
    }

    #[test]
    fn zero_and_tiny_alignment_rejected() {
        assert!(HeapConfig::new(0).validate().is_err());
        assert!(HeapConfig::new(1).validate().is_err());
    }

    #[test]
    fn header_keeps_payload_aligned() {
        for alignment in [8usize, 16, 32, 4096] {
            let config = HeapConfig::new(alignment);
            let header = config.header_bytes();
            assert_eq!(header % alignment, 0);
            assert!(header >= core::mem::size_of::<usize>());
        }
    }
}
