//! Override engine orchestration
//!
//! Composes the rule cache, matcher, and override session around a
//! caller-supplied unit of work.

use std::future::Future;
use std::sync::Arc;

use retune_store::RuleStore;
use tracing::{info, warn};

use crate::cache::{ReentrancyFlag, RuleCache};
use crate::config::EngineConfig;
use crate::error::{EngineError, RunError};
use crate::matcher::RuleMatcher;
use crate::session::OverrideSession;
use crate::settings::SettingsBackend;

/// Per-context override engine.
///
/// One engine instance belongs to one execution context (a connection, a
/// session, a worker): it owns that context's rule cache, reentrancy flag,
/// and ambient settings handle. Nothing here is global; a process hosting
/// many contexts instantiates one engine per context. Calls on one engine
/// are strictly sequential, which `&mut self` on [`run`] enforces.
///
/// [`run`]: OverrideEngine::run
pub struct OverrideEngine {
    store: Arc<dyn RuleStore>,
    settings: Arc<dyn SettingsBackend>,
    cache: RuleCache,
    config: EngineConfig,
}

impl OverrideEngine {
    /// Create an engine with the default configuration
    pub fn new(store: Arc<dyn RuleStore>, settings: Arc<dyn SettingsBackend>) -> Self {
        Self::with_config(store, settings, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(
        store: Arc<dyn RuleStore>,
        settings: Arc<dyn SettingsBackend>,
        config: EngineConfig,
    ) -> Self {
        let cache = RuleCache::new(config.cache_ttl());
        Self {
            store,
            settings,
            cache,
            config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration; the cache picks up a changed TTL
    pub fn set_config(&mut self, config: EngineConfig) {
        self.cache.set_ttl(config.cache_ttl());
        self.config = config;
    }

    /// Handle to the ambient settings the engine overrides
    pub fn settings(&self) -> Arc<dyn SettingsBackend> {
        Arc::clone(&self.settings)
    }

    /// Handle to the cache's reentrancy guard
    pub fn reentrancy_flag(&self) -> ReentrancyFlag {
        self.cache.reentrancy_flag()
    }

    /// Administrative cache reload, independent of the TTL
    pub async fn force_refresh(&mut self) {
        self.cache.refresh(self.store.as_ref()).await;
    }

    /// Run `operation` with any matching rule's overrides applied.
    ///
    /// Resolution uses the exact identity key first, then the wildcard
    /// pattern against `text`. With no matching rule, or when the engine is
    /// disabled, or while a rule refresh is in flight, the operation runs
    /// unmodified.
    ///
    /// With a match, the rule's settings are applied before the operation
    /// and restored after it on every path. An operation failure is
    /// re-raised unchanged once restoration has run; a restore failure
    /// after an operation failure is logged so the original error still
    /// reaches the caller.
    pub async fn run<T, E, F, Fut>(
        &mut self,
        identity_key: Option<i64>,
        text: Option<&str>,
        operation: F,
    ) -> Result<T, RunError<E>>
    where
        E: std::error::Error,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.config.enabled || self.cache.is_refreshing() {
            return operation().await.map_err(RunError::Operation);
        }

        if self.cache.is_stale() {
            self.cache.refresh(self.store.as_ref()).await;
        }

        let rules = self.cache.rules();
        let Some(rule) = RuleMatcher::resolve(&rules, identity_key, text) else {
            return operation().await.map_err(RunError::Operation);
        };

        let mut session = OverrideSession::open(self.settings.as_ref(), &rule.settings)
            .map_err(EngineError::Apply)?;

        if self.config.verbose {
            info!(
                "applied {} override(s) (identity_key={:?})",
                session.len(),
                rule.identity_key
            );
        }

        let outcome = operation().await;
        let restored = session.restore();

        match outcome {
            Ok(value) => {
                restored.map_err(EngineError::Restore)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(restore_err) = restored {
                    warn!("restore failed after operation error: {}", restore_err);
                }
                Err(RunError::Operation(err))
            }
        }
    }
}
