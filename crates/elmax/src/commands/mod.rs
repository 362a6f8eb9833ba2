//! Command handlers, one module per top-level command.

pub mod config_cmd;
pub mod endpoints;
pub mod login;
pub mod panels;
pub mod status;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Route a command that needs an API session to its handler.
pub async fn dispatch(cmd: Command, session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login => login::handle(session, global).await,
        Command::Panels => panels::handle(session, global).await,
        Command::Endpoints(args) => endpoints::handle(session, args, global).await,
        Command::Status(args) => status::handle_status(session, &args, global).await,
        Command::Command(args) => status::handle_command(session, &args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
