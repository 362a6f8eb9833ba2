// Endpoint discovery
//
// `GET api/ext/discovery/{id}/{pin}` lists the zones, outputs and areas
// of one control panel. The PIN is part of the path.

use std::fmt::Display;

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::constants::ENDPOINT_DISCOVERY;
use crate::endpoints::Endpoints;
use crate::error::Error;

impl Client {
    /// Discover the endpoints behind `control_panel_id` and merge them
    /// into the client's collections.
    ///
    /// Collections whose field is missing or empty in the response keep
    /// their previous content (see [`Endpoints::merge_discovery`]).
    /// Returns a copy of the collections after the merge.
    pub async fn get_endpoints(
        &mut self,
        control_panel_id: &str,
        pin: impl Display,
    ) -> Result<Endpoints, Error> {
        let pin = pin.to_string();
        let url = self.endpoint_url(ENDPOINT_DISCOVERY, &[control_panel_id, pin.as_str()])?;
        self.ensure_authenticated().await?;
        debug!(control_panel_id, "discovering endpoints");

        match self.get_json(url).await? {
            Value::Object(response) => {
                self.endpoints.merge_discovery(&response)?;
                debug!(
                    zones = self.endpoints.zones.len(),
                    outputs = self.endpoints.outputs.len(),
                    areas = self.endpoints.areas.len(),
                    "endpoints merged"
                );
                Ok(self.endpoints.clone())
            }
            other => Err(Error::Deserialization {
                message: "discovery response is not an object".into(),
                body: other.to_string(),
            }),
        }
    }
}
