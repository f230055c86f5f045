//! Transactional override session
//!
//! Snapshot, apply, and restore of named ambient settings around one
//! protected operation. Opening a session acquires (snapshot + apply);
//! restoring releases. Release runs on every exit path: explicitly on the
//! success and failure paths of the orchestrator, and from `Drop` as a last
//! resort if an open session is abandoned mid-flight.

use retune_core::SettingOverride;
use tracing::warn;

use crate::settings::{SettingsBackend, SettingsError};

/// An open override session: prior values captured, overrides applied.
///
/// The snapshot is scoped strictly to this session and consumed exactly
/// once by [`restore`](OverrideSession::restore).
pub struct OverrideSession<'a> {
    backend: &'a dyn SettingsBackend,
    overrides: &'a [SettingOverride],
    /// Captured prior value per override, in order; `None` is the unset
    /// sentinel
    snapshot: Vec<Option<String>>,
    restored: bool,
}

impl<'a> OverrideSession<'a> {
    /// Snapshot the current values of the rule's settings, then apply the
    /// overrides in order.
    ///
    /// The snapshot completes before the first assignment, so duplicate
    /// names restore correctly: every occurrence captures the pre-apply
    /// value, and apply order makes the last occurrence win. If an
    /// assignment is rejected the already-applied prefix is rolled back
    /// before the error surfaces.
    pub fn open(
        backend: &'a dyn SettingsBackend,
        overrides: &'a [SettingOverride],
    ) -> Result<Self, SettingsError> {
        let snapshot = overrides
            .iter()
            .map(|entry| backend.current(&entry.name))
            .collect();

        let mut session = Self {
            backend,
            overrides,
            snapshot,
            restored: false,
        };

        for entry in overrides {
            if let Err(err) = backend.assign(&entry.name, Some(&entry.value)) {
                if let Err(rollback_err) = session.restore() {
                    warn!(
                        "rollback after rejected override assignment also failed: {}",
                        rollback_err
                    );
                }
                return Err(err);
            }
        }

        Ok(session)
    }

    /// Number of overrides in effect
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// True when the matched rule carried no settings
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Set every setting back to its captured value, in order.
    ///
    /// All entries are attempted even after a failure; the first error is
    /// reported once the pass completes. Later calls, including the drop
    /// path, are no-ops.
    pub fn restore(&mut self) -> Result<(), SettingsError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let mut first_error = None;
        for (entry, saved) in self.overrides.iter().zip(&self.snapshot) {
            if let Err(err) = self.backend.assign(&entry.name, saved.as_deref()) {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for OverrideSession<'_> {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(err) = self.restore() {
                warn!("failed to restore overridden settings on drop: {}", err);
            }
        }
    }
}

// Manual `Debug` (the `&dyn SettingsBackend` field is not `Debug`, so this
// cannot be derived). Required by tests that call `unwrap_err()` on an
// `open` result, which prints the `Ok` value via `Debug`.
impl std::fmt::Debug for OverrideSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideSession")
            .field("overrides", &self.overrides)
            .field("snapshot", &self.snapshot)
            .field("restored", &self.restored)
            .finish()
    }
}
