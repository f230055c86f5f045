//! Error types for the override engine

use thiserror::Error;

use crate::settings::SettingsError;

/// Engine-side failures of a protected run
#[derive(Error, Debug)]
pub enum EngineError {
    /// An override assignment was rejected while entering the session
    #[error("Failed to apply overrides: {0}")]
    Apply(#[source] SettingsError),

    /// Restoring prior values failed after the operation completed
    #[error("Failed to restore overridden settings: {0}")]
    Restore(#[source] SettingsError),
}

/// Outcome error of [`OverrideEngine::run`].
///
/// Keeps the wrapped operation's failure separate from engine failures so
/// the original error reaches the caller unchanged, never wrapped or
/// replaced.
///
/// [`OverrideEngine::run`]: crate::OverrideEngine::run
#[derive(Error, Debug)]
pub enum RunError<E: std::error::Error> {
    /// The wrapped operation failed; ambient state was already restored
    #[error(transparent)]
    Operation(E),

    /// The engine itself failed while applying or restoring overrides
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl<E: std::error::Error> RunError<E> {
    /// The operation's own error, when that is what failed
    pub fn into_operation(self) -> Option<E> {
        match self {
            RunError::Operation(err) => Some(err),
            RunError::Engine(_) => None,
        }
    }
}
