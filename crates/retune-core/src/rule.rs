//! Override rule definitions

use serde::{Deserialize, Serialize};

/// A single named setting forced to a value while a rule is in effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOverride {
    /// Name of the setting in the ambient configuration namespace
    pub name: String,

    /// Value the setting is forced to for the duration of the operation
    pub value: String,
}

impl SettingOverride {
    /// Create a new setting override
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        SettingOverride {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declarative rule mapping a request identity or text pattern to a set of
/// configuration overrides.
///
/// Rules are immutable once loaded. A rule carrying neither an identity key
/// nor a text pattern is legal but can never match ([`is_inert`]).
///
/// [`is_inert`]: OverrideRule::is_inert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Exact identity fingerprint this rule matches; `None` when the rule
    /// matches by pattern only. Zero is not a valid key and is normalized
    /// to `None`.
    pub identity_key: Option<i64>,

    /// Wildcard pattern (`%`, `_`) matched against the raw request text
    pub text_pattern: Option<String>,

    /// Ordered setting overrides. Duplicate names are allowed; the last
    /// occurrence wins at apply time.
    pub settings: Vec<SettingOverride>,

    /// Store-side ordering hint. The store delivers rules already sorted
    /// by descending priority; nothing downstream re-sorts.
    pub priority: i32,
}

impl OverrideRule {
    /// Create an empty rule
    pub fn new() -> Self {
        OverrideRule {
            identity_key: None,
            text_pattern: None,
            settings: Vec::new(),
            priority: 0,
        }
    }

    /// Set the identity key. Zero means "no key" and clears it.
    pub fn with_identity_key(mut self, key: i64) -> Self {
        self.identity_key = (key != 0).then_some(key);
        self
    }

    /// Set the text pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.text_pattern = Some(pattern.into());
        self
    }

    /// Append a setting override
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.push(SettingOverride::new(name, value));
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// True when the rule has neither an identity key nor a pattern and
    /// therefore can never match
    pub fn is_inert(&self) -> bool {
        self.identity_key.is_none() && self.text_pattern.is_none()
    }
}

impl Default for OverrideRule {
    fn default() -> Self {
        Self::new()
    }
}
