// Control panel listing
//
// `GET api/ext/devices` returns one entry per panel the account can see.

use tracing::debug;

use crate::client::Client;
use crate::constants::ENDPOINT_DEVICES;
use crate::error::Error;
use crate::models::DeviceEntry;
use crate::registry::ControlPanel;

impl Client {
    /// Fetch the account's control panels and register them.
    ///
    /// Returns a snapshot of the whole registry, including panels seen in
    /// earlier calls. Order is unspecified.
    pub async fn list_control_panels(&mut self) -> Result<Vec<ControlPanel>, Error> {
        self.ensure_authenticated().await?;

        let url = self.endpoint_url(ENDPOINT_DEVICES, &[])?;
        let body = self.get_json(url).await?;

        let entries: Vec<DeviceEntry> =
            serde_json::from_value(body.clone()).map_err(|e| Error::Deserialization {
                message: format!("devices list: {e}"),
                body: body.to_string(),
            })?;

        let panels = entries
            .into_iter()
            .map(ControlPanel::from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = panels.len(), "control panels received");
        for panel in panels {
            self.registry.register(panel);
        }

        Ok(self.registry.list())
    }
}
