//! # Linear block growth for registration storage.
//!
//! [`GrowthPolicy`] reserves storage in fixed-size blocks. With block size `B`
//! and multiplier `k` (starting at 1):
//! - storage is pre-reserved to `B` entries;
//! - before an append, if the live count has reached `B × k`, capacity is
//!   grown to `B × (k + 1)` and `k` is incremented.
//!
//! Capacity grows by a constant increment instead of doubling. Each growth
//! step is paid for by the `B` appends that preceded it, so `connect` stays
//! amortized O(1).
//!
//! # Example
//! ```rust
//! use sigvisor::GrowthPolicy;
//!
//! let mut growth = GrowthPolicy::new(4);
//! let mut storage: Vec<u32> = Vec::new();
//! growth.reserve_initial(&mut storage);
//! assert!(storage.capacity() >= 4);
//!
//! for i in 0..4 {
//!     assert_eq!(growth.before_push(&mut storage), None);
//!     storage.push(i);
//! }
//! // The fifth append crosses the first block boundary.
//! assert_eq!(growth.before_push(&mut storage), Some(8));
//! assert_eq!(growth.multiplier(), 2);
//! ```

/// Block-based storage growth policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    block: usize,
    multiplier: usize,
}

impl GrowthPolicy {
    /// Creates a policy with the given block size (clamped to at least 1).
    pub fn new(block: usize) -> Self {
        Self {
            block: block.max(1),
            multiplier: 1,
        }
    }

    /// Block size `B`.
    #[inline]
    pub fn block(&self) -> usize {
        self.block
    }

    /// Current multiplier `k`.
    #[inline]
    pub fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// Live count at which the next growth happens (`B × k`).
    #[inline]
    pub fn threshold(&self) -> usize {
        self.block.saturating_mul(self.multiplier)
    }

    /// Reserves the first block.
    pub fn reserve_initial<T>(&self, storage: &mut Vec<T>) {
        let target = self.threshold();
        if storage.capacity() < target {
            storage.reserve_exact(target - storage.len());
        }
    }

    /// Grows `storage` if the next append would cross the current threshold.
    ///
    /// Returns the new reserved target when a growth happened.
    pub fn before_push<T>(&mut self, storage: &mut Vec<T>) -> Option<usize> {
        if storage.len() < self.threshold() {
            return None;
        }
        while storage.len() >= self.threshold() && self.threshold() < usize::MAX {
            self.multiplier += 1;
        }
        let target = self.threshold();
        if storage.capacity() < target {
            storage.reserve_exact(target - storage.len());
        }
        Some(target)
    }
}

impl Default for GrowthPolicy {
    /// Block size 1024, multiplier 1.
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BLOCK_SIZE)
    }
}
