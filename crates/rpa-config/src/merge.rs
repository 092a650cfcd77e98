//! Merge a persisted JSON document over the default settings.
//!
//! Each known field is applied on its own: a field with the wrong type or
//! an invalid value keeps its default without discarding the rest of the
//! document. Unknown fields are ignored.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::schema::Settings;
use crate::validation;

/// Merge `document` over [`Settings::default`].
///
/// Anything other than a JSON object yields the defaults.
pub fn merge_over_defaults(document: Value) -> Settings {
    let overrides = match document {
        Value::Object(map) => map,
        other => {
            warn!(
                kind = json_kind(&other),
                "settings document is not an object, using defaults"
            );
            return Settings::default();
        }
    };

    let mut merged = match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => return Settings::default(),
    };

    for (key, value) in overrides {
        if !merged.contains_key(&key) {
            debug!(field = %key, "ignoring unknown settings field");
            continue;
        }

        let previous = merged.insert(key.clone(), value);
        if let Err(reason) = accept(&merged) {
            warn!(field = %key, %reason, "invalid settings field, keeping default");
            if let Some(previous) = previous {
                merged.insert(key, previous);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!(error = %e, "merged settings failed to deserialize, using defaults");
        Settings::default()
    })
}

/// Check that a candidate map still deserializes into valid settings.
fn accept(candidate: &Map<String, Value>) -> Result<(), String> {
    let settings: Settings =
        serde_json::from_value(Value::Object(candidate.clone())).map_err(|e| e.to_string())?;
    validation::validate(&settings).map_err(|e| e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
