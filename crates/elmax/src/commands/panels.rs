//! Control panel command handler.

use tabled::Tabled;

use elmax_api::ControlPanel;

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PanelRow {
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl PanelRow {
    fn new(panel: &ControlPanel, color: bool) -> Self {
        Self {
            hash: panel.id.clone(),
            name: panel.name.clone(),
            status: output::online_label(panel.online, color),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    let mut panels = session.client.list_control_panels().await?;
    panels.sort_by(|a, b| a.name.cmp(&b.name));

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &panels,
        |p| PanelRow::new(p, color),
        |p| p.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
