//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lower bound for the rule cache TTL, in seconds
pub const MIN_CACHE_TTL_SECS: u64 = 1;

/// Upper bound for the rule cache TTL, in seconds
pub const MAX_CACHE_TTL_SECS: u64 = 3600;

const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Configuration surface of an override engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the engine intercepts operations at all
    pub enabled: bool,

    /// Log a diagnostic record when overrides are applied
    pub verbose: bool,

    /// Seconds between rule cache refreshes, clamped to 1-3600
    pub cache_ttl_secs: u64,
}

impl EngineConfig {
    /// Create a configuration with defaults: enabled, quiet, 60s TTL
    pub fn new() -> Self {
        Self {
            enabled: true,
            verbose: false,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }

    /// Enable or disable the engine
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable or disable the apply-time diagnostic record
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the cache TTL, clamping to the supported range
    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs.clamp(MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS);
        self
    }

    /// Cache TTL as a [`Duration`], clamped to the supported range
    ///
    /// Clamping happens here as well so a deserialized out-of-range value
    /// cannot bypass the bounds.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache_ttl_secs
                .clamp(MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS),
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
