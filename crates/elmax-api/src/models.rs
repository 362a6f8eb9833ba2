// Wire models for Elmax Cloud responses
//
// Only the devices list has a shape this crate relies on; discovery and
// status bodies are kept as raw JSON (see `endpoints` and `Client::get_status`).

use serde::Deserialize;
use serde_json::Value;

/// One entry of `GET api/ext/devices`.
///
/// Fields are optional on the wire side so that a malformed entry turns
/// into `Error::DataUnavailable` instead of a raw decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct DeviceEntry {
    pub hash: Option<String>,
    /// Usually `0`/`1`, occasionally a boolean.
    #[serde(default)]
    pub centrale_online: Value,
    /// User labels attached to the panel; the first one names it.
    pub username: Option<Vec<UserLabel>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLabel {
    pub label: Option<String>,
}

/// Loose truthiness of a JSON value: `null`, `false`, zero, and empty
/// strings, arrays and objects are false, everything else is true.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
