//! Retune Engine - per-operation configuration overrides
//!
//! This crate implements the override-resolution engine: it selects a rule
//! for a request, temporarily applies the rule's named settings around one
//! unit of work, and guarantees restoration of the prior values whether the
//! work succeeds or fails.
//!
//! Components:
//! - [`RuleCache`]: TTL-refreshed, reentrancy-guarded rule set
//! - [`RuleMatcher`]: two-pass resolution (exact identity, then pattern)
//! - [`OverrideSession`]: snapshot/apply/restore with guaranteed release
//! - [`OverrideEngine`]: composes the above around a caller-supplied
//!   async operation
//!
//! One engine instance belongs to one execution context; nothing in this
//! crate is global.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use retune_core::OverrideRule;
//! use retune_engine::{MemorySettings, OverrideEngine, SettingsBackend};
//! use retune_store::MemoryRuleStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryRuleStore::new());
//! store
//!     .insert(OverrideRule::new().with_pattern("%orders%").with_setting("max_workers", "2"))
//!     .await;
//!
//! let settings = Arc::new(MemorySettings::new());
//! let mut engine = OverrideEngine::new(store, settings.clone());
//!
//! let seen = engine
//!     .run(None, Some("SELECT * FROM orders"), || async {
//!         Ok::<_, std::io::Error>(settings.current("max_workers"))
//!     })
//!     .await?;
//!
//! assert_eq!(seen.as_deref(), Some("2"));          // override visible inside
//! assert_eq!(settings.current("max_workers"), None); // restored afterwards
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod session;
pub mod settings;

// Re-export main types
pub use cache::{ReentrancyFlag, RuleCache};
pub use config::EngineConfig;
pub use engine::OverrideEngine;
pub use error::{EngineError, RunError};
pub use matcher::RuleMatcher;
pub use session::OverrideSession;
pub use settings::{MemorySettings, SettingsBackend, SettingsError};

// Re-export commonly used types from dependencies
pub use retune_core::{like_match, OverrideRule, SettingOverride};
pub use retune_store::RuleStore;
