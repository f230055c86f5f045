//! Core trait definition for rule storage backends

use async_trait::async_trait;
use retune_core::OverrideRule;

use crate::StoreResult;

/// Storage interface the override engine loads its rules from.
///
/// # Contract
///
/// - Only enabled rules are returned, ordered by descending priority.
///   Consumers never re-sort; ties keep the store's order.
/// - Absence of backing storage is not an error: implementations return an
///   empty list so the engine proceeds with no overrides (fail-open).
/// - A malformed individual setting inside a record is dropped with a
///   warning rather than failing the whole record.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Fetch the current enabled rule set, highest priority first
    async fn list_enabled_rules(&self) -> StoreResult<Vec<OverrideRule>>;
}
