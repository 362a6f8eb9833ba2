//! Endpoint discovery command handler.

use serde::Serialize;
use tabled::Tabled;

use elmax_api::Endpoint;

use crate::cli::{EndpointKind, EndpointsArgs, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

/// One discovered endpoint, flattened for display.
#[derive(Debug, Serialize)]
struct EndpointEntry {
    kind: &'static str,
    #[serde(flatten)]
    record: Endpoint,
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Endpoint ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&EndpointEntry> for EndpointRow {
    fn from(e: &EndpointEntry) -> Self {
        Self {
            kind: e.kind,
            id: e.record.endpoint_id().unwrap_or_default().to_owned(),
            name: e.record.name().unwrap_or_default().to_owned(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &mut Session,
    args: EndpointsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let panel = args
        .panel
        .or_else(|| session.profile.control_panel.clone())
        .ok_or_else(|| CliError::MissingArgument {
            what: "control panel".into(),
            flag: "panel".into(),
            key: "control_panel".into(),
        })?;
    let pin = args
        .pin
        .or_else(|| session.profile.pin.clone())
        .ok_or_else(|| CliError::MissingArgument {
            what: "control panel PIN".into(),
            flag: "pin".into(),
            key: "pin".into(),
        })?;

    let endpoints = session.client.get_endpoints(&panel, &pin).await?;

    let groups = [
        (EndpointKind::Zones, "zone", endpoints.zones),
        (EndpointKind::Outputs, "output", endpoints.outputs),
        (EndpointKind::Areas, "area", endpoints.areas),
    ];
    let entries: Vec<EndpointEntry> = groups
        .into_iter()
        .filter(|(kind, _, _)| args.kind.is_none_or(|wanted| wanted == *kind))
        .flat_map(|(_, label, records)| {
            records
                .into_iter()
                .map(move |record| EndpointEntry { kind: label, record })
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |e| EndpointRow::from(e),
        |e| e.record.endpoint_id().unwrap_or_default().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
