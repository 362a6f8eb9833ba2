//! CLI configuration: a thin wrapper around `elmax_config` shared types.
//!
//! Adds the resolution that respects `GlobalOpts` flag overrides
//! (--username, --base-url, --timeout).

use std::time::Duration;

use elmax_api::{Client, ClientConfig};
use elmax_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a command needs: the client plus profile defaults.
pub struct Session {
    pub client: Client,
    pub profile_name: String,
    pub profile: Profile,
}

/// Resolve the active profile (or an ad-hoc one from flags/env) and build a client.
pub fn build_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = elmax_config::load_config_or_default();
    let profile_name = cfg.active_profile_name(global.profile.as_deref());
    let profile = select_profile(&cfg, &profile_name, global)?;

    let credentials = elmax_config::resolve_credentials(&profile, &profile_name)?;
    let client_config = client_config(&profile, &cfg, global)?;

    tracing::debug!(profile = %profile_name, base_url = %client_config.base_url, "building client");
    let client = Client::with_config(credentials, client_config)?;

    Ok(Session {
        client,
        profile_name,
        profile,
    })
}

/// Pick the named profile, applying the `--username` override.
///
/// A profile requested explicitly must exist; the implicit default may
/// be missing, in which case flags and env vars stand in for it.
fn select_profile(cfg: &Config, name: &str, global: &GlobalOpts) -> Result<Profile, CliError> {
    let mut profile = match cfg.profiles.get(name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: name.into(),
                available: cfg.profile_names(),
                path: elmax_config::config_path().display().to_string(),
            });
        }
        None => Profile::default(),
    };

    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    Ok(profile)
}

/// Base URL and timeout: flag > profile > defaults.
fn client_config(profile: &Profile, cfg: &Config, global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let mut config = elmax_config::profile_client_config(profile, &cfg.defaults)?;

    if let Some(ref base_url) = global.base_url {
        config = ClientConfig::with_base_url(base_url)?.timeout(config.timeout);
    }
    if let Some(seconds) = global.timeout {
        config = config.timeout(Duration::from_secs(seconds));
    }
    Ok(config)
}
