//! `elmax login`: verify credentials.

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;

pub async fn handle(session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    session.client.connect().await?;
    if !global.quiet {
        eprintln!(
            "Authenticated as {} (profile '{}')",
            session.client.username(),
            session.profile_name
        );
    }
    Ok(())
}
