//! Clap derive structures for the `elmax` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// elmax -- query and drive Elmax alarm panels through Elmax Cloud
#[derive(Debug, Parser)]
#[command(
    name = "elmax",
    version,
    about = "Query and control Elmax alarm panels from the command line",
    long_about = "A CLI for the Elmax Cloud API.\n\n\
        Lists the control panels of an account, discovers their zones,\n\
        outputs and areas, reads endpoint status and sends commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "ELMAX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Account username (overrides profile)
    #[arg(long, short = 'u', env = "ELMAX_USERNAME", global = true)]
    pub username: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "ELMAX_BASE_URL", global = true, hide_env = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ELMAX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ELMAX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the configured credentials are accepted
    Login,

    /// List the control panels of the account
    #[command(alias = "p")]
    Panels,

    /// Discover zones, outputs and areas of a control panel
    #[command(alias = "ep")]
    Endpoints(EndpointsArgs),

    /// Show the status of one endpoint
    Status(StatusArgs),

    /// Send a command to one endpoint
    #[command(alias = "cmd")]
    Command(CommandArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Endpoints ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Control panel hash (defaults to the profile's control_panel)
    #[arg(long)]
    pub panel: Option<String>,

    /// Control panel PIN (defaults to the profile's pin)
    #[arg(long, env = "ELMAX_PIN", hide_env_values = true)]
    pub pin: Option<String>,

    /// Only show one kind of endpoint
    #[arg(long, short = 'k')]
    pub kind: Option<EndpointKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointKind {
    Zones,
    Outputs,
    Areas,
}

// ── Status & commands ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Endpoint identifier (`endpointId` from `elmax endpoints`)
    pub endpoint_id: String,
}

#[derive(Debug, Args)]
pub struct CommandArgs {
    /// Endpoint identifier (`endpointId` from `elmax endpoints`)
    pub endpoint_id: String,

    /// Action to perform
    pub action: Action,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Action {
    /// Switch an output on
    On,
    /// Switch an output off
    Off,
    /// Arm an area
    Arm,
    /// Disarm an area
    Disarm,
}

impl From<Action> for elmax_api::Command {
    fn from(action: Action) -> Self {
        match action {
            Action::On => Self::On,
            Action::Off => Self::Off,
            Action::Arm => Self::Arm,
            Action::Disarm => Self::Disarm,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the resolved configuration (passwords redacted)
    Show,

    /// Store a profile password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
