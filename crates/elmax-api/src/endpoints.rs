// Endpoint collections discovered behind a control panel
//
// Zones, outputs and areas are kept exactly as the API returns them.
// Merge policy for a discovery response: a collection is replaced only
// when its field holds a non-empty list. Absent, `null` or `[]` fields
// keep whatever the previous discovery stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{AREA, OUTPUT, ZONE};
use crate::error::Error;

/// One zone, output or area record, verbatim from the discovery response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(Map<String, Value>);

impl Endpoint {
    /// Identifier used by status and command requests (`endpointId`).
    pub fn endpoint_id(&self) -> Option<&str> {
        self.0.get("endpointId").and_then(Value::as_str)
    }

    /// Display name (`nome`).
    pub fn name(&self) -> Option<&str> {
        self.0.get("nome").and_then(Value::as_str)
    }

    /// Raw field access for anything else the panel reports.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Endpoint {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The three endpoint collections of the most recent discoveries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub zones: Vec<Endpoint>,
    pub outputs: Vec<Endpoint>,
    pub areas: Vec<Endpoint>,
}

impl Endpoints {
    /// Apply a discovery response according to the merge policy.
    ///
    /// All three fields are decoded before anything is assigned, so a
    /// malformed field leaves every collection untouched.
    pub fn merge_discovery(&mut self, response: &Map<String, Value>) -> Result<(), Error> {
        let zones = replacement(response, ZONE)?;
        let outputs = replacement(response, OUTPUT)?;
        let areas = replacement(response, AREA)?;

        if let Some(zones) = zones {
            self.zones = zones;
        }
        if let Some(outputs) = outputs {
            self.outputs = outputs;
        }
        if let Some(areas) = areas {
            self.areas = areas;
        }
        Ok(())
    }

    /// Find a record by `endpointId` across all three collections.
    pub fn find(&self, endpoint_id: &str) -> Option<&Endpoint> {
        self.zones
            .iter()
            .chain(&self.outputs)
            .chain(&self.areas)
            .find(|e| e.endpoint_id() == Some(endpoint_id))
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.outputs.is_empty() && self.areas.is_empty()
    }
}

/// `Some(records)` if `key` holds a non-empty list, `None` if the
/// collection must be kept as is.
fn replacement(response: &Map<String, Value>, key: &str) -> Result<Option<Vec<Endpoint>>, Error> {
    match response.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(value @ Value::Array(_)) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::Deserialization {
                message: format!("discovery field '{key}': {e}"),
                body: value.to_string(),
            }),
        Some(other) => Err(Error::Deserialization {
            message: format!("discovery field '{key}' is not a list"),
            body: other.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn response(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test response must be an object"),
        }
    }

    fn ids(records: &[Endpoint]) -> Vec<&str> {
        records.iter().filter_map(Endpoint::endpoint_id).collect()
    }

    #[test]
    fn first_discovery_fills_collections() {
        let mut endpoints = Endpoints::default();
        endpoints
            .merge_discovery(&response(json!({
                "zone": [{ "endpointId": "Z1", "nome": "Kitchen" }],
                "uscite": [{ "endpointId": "O1", "nome": "Siren" }],
                "aree": [{ "endpointId": "A1", "nome": "Ground floor" }]
            })))
            .unwrap();

        assert_eq!(ids(&endpoints.zones), vec!["Z1"]);
        assert_eq!(ids(&endpoints.outputs), vec!["O1"]);
        assert_eq!(ids(&endpoints.areas), vec!["A1"]);
        assert_eq!(endpoints.zones[0].name(), Some("Kitchen"));
    }

    #[test]
    fn empty_or_missing_fields_keep_previous_values() {
        let mut endpoints = Endpoints::default();
        endpoints
            .merge_discovery(&response(json!({
                "zone": [{ "endpointId": "Z1" }],
                "uscite": [{ "endpointId": "O1" }],
                "aree": [{ "endpointId": "A1" }]
            })))
            .unwrap();

        endpoints
            .merge_discovery(&response(json!({
                "zone": [{ "endpointId": "Z2" }, { "endpointId": "Z3" }],
                "uscite": [],
                "aree": null
            })))
            .unwrap();

        assert_eq!(ids(&endpoints.zones), vec!["Z2", "Z3"]);
        assert_eq!(ids(&endpoints.outputs), vec!["O1"]);
        assert_eq!(ids(&endpoints.areas), vec!["A1"]);

        endpoints.merge_discovery(&Map::new()).unwrap();
        assert_eq!(ids(&endpoints.zones), vec!["Z2", "Z3"]);
    }

    #[test]
    fn records_are_kept_verbatim() {
        let raw = json!({ "endpointId": "Z1", "nome": "Kitchen", "esclusa": false, "aperta": true });
        let mut endpoints = Endpoints::default();
        endpoints
            .merge_discovery(&response(json!({ "zone": [raw.clone()] })))
            .unwrap();

        assert_eq!(serde_json::to_value(&endpoints.zones[0]).unwrap(), raw);
        assert_eq!(endpoints.zones[0].get("aperta"), Some(&json!(true)));
    }

    #[test]
    fn malformed_field_changes_nothing() {
        let mut endpoints = Endpoints::default();
        endpoints
            .merge_discovery(&response(json!({ "zone": [{ "endpointId": "Z1" }] })))
            .unwrap();

        let result = endpoints.merge_discovery(&response(json!({
            "zone": [{ "endpointId": "Z2" }],
            "aree": "not a list"
        })));

        assert!(matches!(result, Err(Error::Deserialization { .. })));
        assert_eq!(ids(&endpoints.zones), vec!["Z1"]);
    }

    #[test]
    fn find_searches_every_collection() {
        let mut endpoints = Endpoints::default();
        endpoints
            .merge_discovery(&response(json!({
                "zone": [{ "endpointId": "Z1" }],
                "uscite": [{ "endpointId": "O1", "nome": "Siren" }]
            })))
            .unwrap();

        assert_eq!(endpoints.find("O1").and_then(Endpoint::name), Some("Siren"));
        assert!(endpoints.find("missing").is_none());
        assert!(!endpoints.is_empty());
    }
}
