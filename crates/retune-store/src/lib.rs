//! Rule store abstraction for the retune override engine
//!
//! This crate provides a unified interface for loading override rules from
//! different storage backends:
//!
//! - **Memory store**: in-process rule list for tests and development
//! - **PostgreSQL store**: database-backed rules behind the `postgres`
//!   feature
//!
//! Stores deliver only enabled rules, already ordered by descending
//! priority. A store with no backing storage reports an empty rule set
//! rather than an error, so the engine fails open.
//!
//! # Quick Start
//!
//! ```
//! use retune_core::OverrideRule;
//! use retune_store::{MemoryRuleStore, RuleStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let store = MemoryRuleStore::new();
//! store
//!     .insert(OverrideRule::new().with_pattern("%orders%").with_setting("max_workers", "2"))
//!     .await;
//!
//! let rules = store.list_enabled_rules().await?;
//! assert_eq!(rules.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod payload;
pub mod traits;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use memory::MemoryRuleStore;
pub use payload::settings_from_json;
pub use traits::RuleStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRuleStore;
