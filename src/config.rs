//! # Registry configuration.
//!
//! Provides [`RegistryConfig`], the per-registry settings.
//!
//! Config is used in two ways:
//! 1. **Standalone registries**: `Registry::with_config(config)`
//! 2. **Global registries**: `sigvisor::configure::<E>(config)` before first use
//!
//! ## Sentinel values
//! - `block_size = 0` → clamped to 1 (see [`RegistryConfig::block_size_clamped`])

/// Default storage block size (registrations reserved per growth step).
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Configuration of one event registry.
///
/// ## Field semantics
/// - `block_size`: Storage growth increment (`0` is clamped to 1)
/// - `strict`: `try_connect` also rejects an identity that is already live
///
/// ## Notes
/// Fields are public; prefer [`RegistryConfig::block_size_clamped`] over
/// reading `block_size` directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of registrations reserved up front and added per growth step.
    ///
    /// Capacity grows linearly: `block`, `2 × block`, `3 × block`, ...
    pub block_size: usize,

    /// Enables duplicate-identity detection in `try_connect`.
    ///
    /// The plain `connect` never checks, strict or not.
    pub strict: bool,
}

impl RegistryConfig {
    /// Returns a config with the given block size and default flags.
    #[inline]
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            ..Self::default()
        }
    }

    /// Returns a copy with `strict` set.
    #[inline]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the block size clamped to a minimum of 1.
    #[inline]
    pub fn block_size_clamped(&self) -> usize {
        self.block_size.max(1)
    }
}

impl Default for RegistryConfig {
    /// Default configuration:
    ///
    /// - `block_size = 1024`
    /// - `strict = false`
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let cfg = RegistryConfig::default();
        assert_eq!(cfg.block_size, 1024);
        assert!(!cfg.strict);
    }

    #[test]
    fn test_zero_block_is_clamped() {
        assert_eq!(RegistryConfig::with_block_size(0).block_size_clamped(), 1);
        assert_eq!(RegistryConfig::with_block_size(8).block_size_clamped(), 8);
    }
}
