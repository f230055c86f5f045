//! Settings payload flattening
//!
//! Backends keep a rule's overrides as a flat JSON object, e.g.
//! `{"max_workers": 2, "enable_sort": false}`. This module flattens such an
//! object into the ordered (name, value) pairs of the core rule model.

use retune_core::SettingOverride;
use serde_json::Value;
use tracing::warn;

/// Flatten a JSON settings object into ordered setting overrides.
///
/// Declaration order is preserved, including duplicate handling downstream
/// (apply order decides the effective value). Scalars coerce to their
/// textual form: strings pass through, booleans become `on`/`off`, numbers
/// use their display form. Non-scalar values are skipped with a warning,
/// and a payload that is not an object yields no settings at all.
pub fn settings_from_json(payload: &Value) -> Vec<SettingOverride> {
    let Value::Object(entries) = payload else {
        warn!("override settings payload is not an object; ignoring it");
        return Vec::new();
    };

    let mut settings = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Bool(true) => "on".to_string(),
            Value::Bool(false) => "off".to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                warn!("skipping non-scalar override value for '{}'", name);
                continue;
            }
        };
        settings.push(SettingOverride::new(name.clone(), value));
    }
    settings
}
