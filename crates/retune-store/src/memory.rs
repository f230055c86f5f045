//! In-memory rule store
//!
//! Simple memory-backed store for testing and development.

use async_trait::async_trait;
use retune_core::OverrideRule;
use tokio::sync::RwLock;

use crate::{RuleStore, StoreResult};

struct StoredRule {
    rule: OverrideRule,
    enabled: bool,
}

/// In-memory rule store
///
/// Holds rules in insertion order and sorts by descending priority when
/// listed, keeping insertion order among equal priorities. Suitable for
/// tests and development; rules are lost when the process exits.
pub struct MemoryRuleStore {
    rules: RwLock<Vec<StoredRule>>,
}

impl MemoryRuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
        }
    }

    /// Add an enabled rule
    pub async fn insert(&self, rule: OverrideRule) {
        let mut rules = self.rules.write().await;
        rules.push(StoredRule {
            rule,
            enabled: true,
        });
    }

    /// Add a disabled rule; it is filtered out of listings
    pub async fn insert_disabled(&self, rule: OverrideRule) {
        let mut rules = self.rules.write().await;
        rules.push(StoredRule {
            rule,
            enabled: false,
        });
    }

    /// Remove all rules
    pub async fn clear(&self) {
        let mut rules = self.rules.write().await;
        rules.clear();
    }

    /// Total number of stored rules, including disabled ones
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    /// True when the store holds no rules
    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_enabled_rules(&self) -> StoreResult<Vec<OverrideRule>> {
        let rules = self.rules.read().await;

        let mut listed: Vec<OverrideRule> = rules
            .iter()
            .filter(|stored| stored.enabled)
            .map(|stored| stored.rule.clone())
            .collect();

        // Stable sort: equal priorities keep insertion order
        listed.sort_by_key(|rule| std::cmp::Reverse(rule.priority));

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_orders_by_descending_priority() {
        let store = MemoryRuleStore::new();
        store
            .insert(OverrideRule::new().with_pattern("low%").with_priority(1))
            .await;
        store
            .insert(OverrideRule::new().with_pattern("high%").with_priority(10))
            .await;
        store
            .insert(OverrideRule::new().with_pattern("mid%").with_priority(5))
            .await;

        let rules = store.list_enabled_rules().await.unwrap();
        let patterns: Vec<_> = rules
            .iter()
            .map(|r| r.text_pattern.as_deref().unwrap())
            .collect();
        assert_eq!(patterns, vec!["high%", "mid%", "low%"]);
    }

    #[tokio::test]
    async fn test_equal_priorities_keep_insertion_order() {
        let store = MemoryRuleStore::new();
        store
            .insert(OverrideRule::new().with_pattern("first%").with_priority(5))
            .await;
        store
            .insert(OverrideRule::new().with_pattern("second%").with_priority(5))
            .await;

        let rules = store.list_enabled_rules().await.unwrap();
        assert_eq!(rules[0].text_pattern.as_deref(), Some("first%"));
        assert_eq!(rules[1].text_pattern.as_deref(), Some("second%"));
    }

    #[tokio::test]
    async fn test_disabled_rules_filtered() {
        let store = MemoryRuleStore::new();
        store
            .insert_disabled(OverrideRule::new().with_pattern("off%"))
            .await;
        store.insert(OverrideRule::new().with_pattern("on%")).await;

        let rules = store.list_enabled_rules().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].text_pattern.as_deref(), Some("on%"));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = MemoryRuleStore::new();
        assert!(store.list_enabled_rules().await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryRuleStore::new();
        store.insert(OverrideRule::new().with_pattern("%")).await;
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
