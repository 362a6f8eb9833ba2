//! Shared configuration for Elmax tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `elmax_api::ClientConfig` + `Credentials`. The
//! CLI adds `GlobalOpts`-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use elmax_api::{ClientConfig, Credentials};

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "elmax";

/// Environment variable consulted for the password of any profile.
pub const PASSWORD_ENV: &str = "ELMAX_PASSWORD";

/// Environment variable consulted when a profile has no username.
pub const USERNAME_ENV: &str = "ELMAX_USERNAME";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named Elmax Cloud account.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Profile {
    /// Account username (e-mail).
    pub username: Option<String>,

    /// Password in plaintext. Keyring or env var take precedence.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// API base URL override (defaults to the public cloud).
    pub base_url: Option<String>,

    /// Control panel hash used when a command omits `--panel`.
    pub control_panel: Option<String>,

    /// Control panel PIN used when a command omits `--pin`.
    pub pin: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("it", "elmax", "elmax").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("elmax");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from `path`, layered over defaults and under `ELMAX_*`
/// environment variables (`__` separates nesting, e.g. `ELMAX_DEFAULTS__TIMEOUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ELMAX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

impl Config {
    /// The profile name to use when none is requested explicitly.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Sorted, comma-separated profile names (for diagnostics).
    pub fn profile_names(&self) -> String {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

fn keyring_password(profile_name: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
        .ok()?
        .get_password()
        .ok()
}

/// Resolve username + password for a profile.
///
/// Username: profile, then `ELMAX_USERNAME`. Password: the profile's
/// `password_env` variable, `ELMAX_PASSWORD`, the system keyring, then
/// plaintext in the config.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(profile, profile_name, keyring_password)
}

fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .ok_or_else(no_credentials)?;

    let password = profile
        .password_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok())
        .or_else(|| std::env::var(PASSWORD_ENV).ok())
        .or_else(|| keyring(profile_name))
        .or_else(|| profile.password.clone())
        .ok_or_else(no_credentials)?;

    Ok(Credentials::new(username, SecretString::from(password)))
}

/// Build the `ClientConfig` a profile describes.
pub fn profile_client_config(profile: &Profile, defaults: &Defaults) -> Result<ClientConfig, ConfigError> {
    let config = match profile.base_url.as_deref() {
        Some(base) => ClientConfig::with_base_url(base).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: e.to_string(),
        })?,
        None => ClientConfig::default(),
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    Ok(config.timeout(timeout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile() -> Profile {
        Profile {
            username: Some("user@example.com".into()),
            password: Some("plaintext".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                control_panel: Some("H1".into()),
                pin: Some("000000".into()),
                timeout: Some(10),
                ..profile()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.defaults, Defaults::default());
        assert!(loaded.profiles.is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_profile = \"home\"\n\n[profiles.home]\nusername = \"me@example.com\"\n",
        )
        .unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.active_profile_name(None), "home");
        assert_eq!(loaded.active_profile_name(Some("other")), "other");
        assert_eq!(loaded.defaults.timeout, 30);
        assert_eq!(
            loaded.profiles["home"].username.as_deref(),
            Some("me@example.com")
        );
    }

    #[test]
    fn keyring_beats_plaintext() {
        let creds = resolve_credentials_with(&profile(), "home", |name| {
            assert_eq!(name, "home");
            Some("from-keyring".into())
        })
        .unwrap();
        assert_eq!(creds.username(), "user@example.com");
        assert_eq!(
            secrecy::ExposeSecret::expose_secret(creds.password()),
            "from-keyring"
        );
    }

    #[test]
    fn plaintext_is_the_last_resort() {
        let creds = resolve_credentials_with(&profile(), "home", |_| None).unwrap();
        assert_eq!(
            secrecy::ExposeSecret::expose_secret(creds.password()),
            "plaintext"
        );
    }

    #[test]
    fn no_password_anywhere() {
        let profile = Profile {
            password: None,
            ..profile()
        };
        let result = resolve_credentials_with(&profile, "home", |_| None);
        assert!(matches!(result, Err(ConfigError::NoCredentials { .. })));
    }

    #[test]
    fn client_config_from_profile() {
        let profile = Profile {
            base_url: Some("http://127.0.0.1:8080".into()),
            ..profile()
        };
        let config = profile_client_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.timeout, Duration::from_secs(30));

        let bad = Profile {
            base_url: Some("not a url".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_client_config(&bad, &Defaults::default()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn profile_names_are_sorted() {
        let mut cfg = Config::default();
        cfg.profiles.insert("office".into(), Profile::default());
        cfg.profiles.insert("home".into(), Profile::default());
        assert_eq!(cfg.profile_names(), "home, office");
    }
}
