// Status and command endpoints
//
// Both address a single endpoint by the `endpointId` returned from
// discovery.

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::command::Command;
use crate::constants::{ENDPOINT_ENTITY_ID_COMMAND, ENDPOINT_STATUS_ENTITY_ID};
use crate::error::Error;

impl Client {
    /// Fetch the status of one endpoint.
    ///
    /// `GET api/ext/status/{endpoint_id}`. The decoded body is returned as
    /// is; its shape depends on the endpoint type (zones carry an
    /// `esclusa` bypass flag, for example).
    pub async fn get_status(&mut self, endpoint_id: &str) -> Result<Value, Error> {
        let url = self.endpoint_url(ENDPOINT_STATUS_ENTITY_ID, &[endpoint_id])?;
        self.ensure_authenticated().await?;
        debug!(endpoint_id, "fetching status");
        self.get_json(url).await
    }

    /// Send a command to one endpoint.
    ///
    /// `POST api/ext/{endpoint_id}/{command}`. Returns the decoded reply,
    /// or `Value::Null` when the API answers with a non-JSON body.
    pub async fn send_command(&mut self, endpoint_id: &str, command: Command) -> Result<Value, Error> {
        let url = self.endpoint_url(ENDPOINT_ENTITY_ID_COMMAND, &[endpoint_id, command.as_str()])?;
        self.ensure_authenticated().await?;
        debug!(endpoint_id, %command, "sending command");
        self.post_empty(url).await
    }
}
