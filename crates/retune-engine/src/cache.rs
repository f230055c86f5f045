//! TTL-based rule cache with reentrancy protection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use retune_core::OverrideRule;
use retune_store::RuleStore;
use tracing::{debug, warn};

/// Cloneable handle to a cache's reentrancy guard.
///
/// The rule store lookup may itself pass back through an interception
/// point: to the host it is indistinguishable from ordinary work. Anything
/// observing this flag set must take the passthrough path instead of
/// recursing into a refresh that is already in progress.
#[derive(Clone, Debug)]
pub struct ReentrancyFlag(Arc<AtomicBool>);

impl ReentrancyFlag {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// True while a refresh is in progress
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn try_acquire(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Priority-ordered rule cache.
///
/// Owns the current rule set and replaces it wholesale on refresh, so a
/// match in flight always sees one consistent snapshot. The set arrives
/// from the store already ordered by descending priority and is never
/// re-sorted here. Staleness is tracked with a monotonic clock.
pub struct RuleCache {
    rules: Arc<Vec<OverrideRule>>,
    loaded_at: Option<Instant>,
    ttl: Duration,
    refreshing: ReentrancyFlag,
}

impl RuleCache {
    /// Create an empty cache that is stale until the first refresh
    pub fn new(ttl: Duration) -> Self {
        Self {
            rules: Arc::new(Vec::new()),
            loaded_at: None,
            ttl,
            refreshing: ReentrancyFlag::new(),
        }
    }

    /// Snapshot of the current rule set
    pub fn rules(&self) -> Arc<Vec<OverrideRule>> {
        Arc::clone(&self.rules)
    }

    /// Refresh interval
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Change the refresh interval; takes effect at the next staleness check
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    /// Handle to the reentrancy guard, shareable with collaborators
    pub fn reentrancy_flag(&self) -> ReentrancyFlag {
        self.refreshing.clone()
    }

    /// True while a refresh is in progress
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_set()
    }

    /// True when no successful load has happened yet or the TTL elapsed
    pub fn is_stale(&self) -> bool {
        match self.loaded_at {
            None => true,
            Some(loaded_at) => loaded_at.elapsed() >= self.ttl,
        }
    }

    /// Reload the rule set from the store.
    ///
    /// Silent no-op when a refresh is already in progress. Store failure is
    /// fail-open: the cache installs an empty set, and the load time is
    /// stamped either way so a broken store does not cause a refresh storm.
    ///
    /// There is no staleness check here; callers gate on [`is_stale`], and
    /// the administrative reload calls this directly.
    ///
    /// [`is_stale`]: RuleCache::is_stale
    pub async fn refresh(&mut self, store: &dyn RuleStore) {
        if !self.refreshing.try_acquire() {
            return;
        }

        match store.list_enabled_rules().await {
            Ok(rules) => {
                debug!("loaded {} override rule(s)", rules.len());
                self.rules = Arc::new(rules);
            }
            Err(err) => {
                warn!("failed to load override rules, proceeding with none: {}", err);
                self.rules = Arc::new(Vec::new());
            }
        }

        self.loaded_at = Some(Instant::now());
        self.refreshing.clear();
    }
}
