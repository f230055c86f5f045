//! Ambient settings namespace
//!
//! The engine overrides named settings in a shared ambient namespace that
//! the wrapped operation reads while it runs. The namespace is the one
//! piece of mutable shared state the engine touches, and only for the
//! names listed in a matched rule.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use thiserror::Error;

/// Errors raised by settings assignment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The backend does not recognize the setting name
    #[error("Unknown setting: {name}")]
    UnknownSetting { name: String },

    /// The backend rejected the value for this setting
    #[error("Invalid value for setting '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Shared ambient configuration namespace.
///
/// `current` reads a setting's explicit value, `None` meaning the setting
/// is unset (at its default). `assign` with `None` clears the setting back
/// to its default. Implementations use interior mutability so one handle
/// can be shared between the engine and the wrapped operation; the
/// execution model is single-threaded per context, so assignments are
/// strictly sequential.
pub trait SettingsBackend: Send + Sync {
    /// Current explicit value of `name`, or `None` when unset
    fn current(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`, or clear it to its default when `value` is
    /// `None`
    fn assign(&self, name: &str, value: Option<&str>) -> Result<(), SettingsError>;
}

/// In-memory settings backend.
///
/// Open namespace by default: any name may be assigned.
/// [`with_known_names`] restricts assignment to a declared set so an
/// unknown name fails the way an invalid host setting would.
///
/// [`with_known_names`]: MemorySettings::with_known_names
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
    known: Option<HashSet<String>>,
}

impl MemorySettings {
    /// Create an open-namespace backend
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            known: None,
        }
    }

    /// Create a backend that only accepts the given setting names
    pub fn with_known_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: RwLock::new(HashMap::new()),
            known: Some(names.into_iter().map(Into::into).collect()),
        }
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsBackend for MemorySettings {
    fn current(&self, name: &str) -> Option<String> {
        self.values.read().unwrap().get(name).cloned()
    }

    fn assign(&self, name: &str, value: Option<&str>) -> Result<(), SettingsError> {
        if let Some(known) = &self.known {
            if !known.contains(name) {
                return Err(SettingsError::UnknownSetting {
                    name: name.to_string(),
                });
            }
        }

        let mut values = self.values.write().unwrap();
        match value {
            Some(value) => {
                values.insert(name.to_string(), value.to_string());
            }
            None => {
                values.remove(name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_read() {
        let settings = MemorySettings::new();
        assert_eq!(settings.current("work_mem"), None);

        settings.assign("work_mem", Some("64MB")).unwrap();
        assert_eq!(settings.current("work_mem").as_deref(), Some("64MB"));
    }

    #[test]
    fn test_assign_none_clears_to_default() {
        let settings = MemorySettings::new();
        settings.assign("work_mem", Some("64MB")).unwrap();
        settings.assign("work_mem", None).unwrap();
        assert_eq!(settings.current("work_mem"), None);
    }

    #[test]
    fn test_unknown_name_rejected_in_restricted_mode() {
        let settings = MemorySettings::with_known_names(["work_mem"]);
        settings.assign("work_mem", Some("64MB")).unwrap();

        let err = settings.assign("wrok_mem", Some("64MB")).unwrap_err();
        assert_eq!(
            err,
            SettingsError::UnknownSetting {
                name: "wrok_mem".to_string()
            }
        );
    }

    #[test]
    fn test_unrelated_settings_untouched() {
        let settings = MemorySettings::new();
        settings.assign("a", Some("1")).unwrap();
        settings.assign("b", Some("2")).unwrap();
        settings.assign("a", None).unwrap();
        assert_eq!(settings.current("b").as_deref(), Some("2"));
    }
}
