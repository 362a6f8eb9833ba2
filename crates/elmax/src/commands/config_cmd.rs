//! Config command handlers (no API session needed).

use elmax_config::ConfigError;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&elmax_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = elmax_config::load_config()?;
            for profile in cfg.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some(REDACTED.into());
                }
                if profile.pin.is_some() {
                    profile.pin = Some(REDACTED.into());
                }
            }

            let rendered = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |_| rendered.clone(),
                |c| {
                    let mut names: Vec<&str> = c.profiles.keys().map(String::as_str).collect();
                    names.sort_unstable();
                    names.join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = elmax_config::load_config_or_default();
            let profile_name = cfg.active_profile_name(global.profile.as_deref());

            let password = rpassword::prompt_password(format!("Password for profile '{profile_name}': "))?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "must not be empty".into(),
                });
            }

            elmax_config::store_password(&profile_name, &password)?;
            if !global.quiet {
                eprintln!("Password stored in the system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
