//! Status and command handlers for single endpoints.

use elmax_api::Command;

use crate::cli::{CommandArgs, GlobalOpts, StatusArgs};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

pub async fn handle_status(
    session: &mut Session,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = session.client.get_status(&args.endpoint_id).await?;

    let out = output::render_single(&global.output, &status, output::detail_lines, |_| {
        args.endpoint_id.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_command(
    session: &mut Session,
    args: &CommandArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let command = Command::from(args.action);
    let reply = session
        .client
        .send_command(&args.endpoint_id, command)
        .await?;

    tracing::debug!(endpoint_id = %args.endpoint_id, %command, ?reply, "command sent");
    if !global.quiet {
        eprintln!("Sent '{command}' to {}", args.endpoint_id);
    }
    Ok(())
}
