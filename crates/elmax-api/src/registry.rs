// Control panel registry
//
// Keyed by the panel hash. Registration overwrites, so listing the
// panels twice never yields duplicates.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{DeviceEntry, is_truthy};

/// A remote control panel owned by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPanel {
    /// Panel hash; the identifier used by discovery.
    #[serde(rename = "hash")]
    pub id: String,
    pub online: bool,
    /// Label of the first user entry attached to the panel.
    pub name: String,
}

impl ControlPanel {
    /// Build a descriptor from one `api/ext/devices` entry.
    pub(crate) fn from_entry(entry: DeviceEntry) -> Result<Self, Error> {
        let id = entry.hash.ok_or_else(|| Error::DataUnavailable {
            message: "control panel entry has no hash".into(),
        })?;

        let name = entry
            .username
            .and_then(|labels| labels.into_iter().next())
            .and_then(|first| first.label)
            .ok_or_else(|| Error::DataUnavailable {
                message: format!("control panel {id} has no user label"),
            })?;

        Ok(Self {
            online: is_truthy(&entry.centrale_online),
            id,
            name,
        })
    }
}

/// Control panels seen so far, by id.
#[derive(Debug, Default, Clone)]
pub struct ControlPanelRegistry {
    panels: IndexMap<String, ControlPanel>,
}

impl ControlPanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the descriptor stored under `panel.id`.
    pub fn register(&mut self, panel: ControlPanel) {
        self.panels.insert(panel.id.clone(), panel);
    }

    /// Snapshot of the registered panels. Order is not part of the contract.
    pub fn list(&self) -> Vec<ControlPanel> {
        self.panels.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&ControlPanel> {
        self.panels.get(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn panel(id: &str, online: bool, name: &str) -> ControlPanel {
        ControlPanel {
            id: id.into(),
            online,
            name: name.into(),
        }
    }

    fn entry(value: serde_json::Value) -> DeviceEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn register_is_last_write_wins() {
        let mut registry = ControlPanelRegistry::new();
        registry.register(panel("H1", false, "Old"));
        registry.register(panel("H2", true, "Office"));
        registry.register(panel("H1", true, "Home"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("H1"), Some(&panel("H1", true, "Home")));
    }

    #[test]
    fn register_order_does_not_matter_for_content() {
        let mut a = ControlPanelRegistry::new();
        a.register(panel("H1", true, "First"));
        a.register(panel("H1", false, "Second"));

        let mut b = ControlPanelRegistry::new();
        b.register(panel("H1", false, "Second"));

        assert_eq!(a.list(), b.list());
    }

    #[test]
    fn list_does_not_mutate() {
        let mut registry = ControlPanelRegistry::new();
        assert!(registry.list().is_empty());
        registry.register(panel("H1", true, "Home"));
        let first = registry.list();
        let second = registry.list();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptor_from_entry() {
        let panel = ControlPanel::from_entry(entry(json!({
            "hash": "H1",
            "centrale_online": 1,
            "username": [{ "label": "Home" }, { "label": "Second" }]
        })))
        .unwrap();

        assert_eq!(panel.id, "H1");
        assert!(panel.online);
        assert_eq!(panel.name, "Home");
    }

    #[test]
    fn descriptor_with_offline_flag() {
        let panel = ControlPanel::from_entry(entry(json!({
            "hash": "H9",
            "centrale_online": 0,
            "username": [{ "label": "Cabin" }]
        })))
        .unwrap();
        assert!(!panel.online);
    }

    #[test]
    fn empty_label_list_is_data_unavailable() {
        let result = ControlPanel::from_entry(entry(json!({
            "hash": "H1",
            "centrale_online": true,
            "username": []
        })));
        assert!(matches!(result, Err(Error::DataUnavailable { .. })));
    }

    #[test]
    fn missing_hash_is_data_unavailable() {
        let result = ControlPanel::from_entry(entry(json!({
            "centrale_online": true,
            "username": [{ "label": "Home" }]
        })));
        assert!(matches!(result, Err(Error::DataUnavailable { .. })));
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(panel("H1", true, "Home")).unwrap();
        assert_eq!(value, json!({ "hash": "H1", "online": true, "name": "Home" }));
    }
}
