// Elmax Cloud API constants
//
// Paths are relative to the base URL and joined segment by segment,
// so none of them carry leading or trailing slashes.

/// Production endpoint of the Elmax Cloud service.
pub const BASE_URL: &str = "https://cloud.elmaxsrl.it";

pub const ENDPOINT_LOGIN: &str = "api/ext/login";
pub const ENDPOINT_DEVICES: &str = "api/ext/devices";
pub const ENDPOINT_DISCOVERY: &str = "api/ext/discovery";
pub const ENDPOINT_STATUS_ENTITY_ID: &str = "api/ext/status";
/// Prefix for `{endpointId}/{command}` requests.
pub const ENDPOINT_ENTITY_ID_COMMAND: &str = "api/ext";

/// `user-agent` sent with every request.
pub const USER_AGENT: &str = concat!("elmax-api/", env!("CARGO_PKG_VERSION"));

/// `Accept` header sent with every request.
pub const ACCEPT: &str = "application/json, text/plain, */*";

// ── Discovery wire keys ─────────────────────────────────────────────

pub const ZONE: &str = "zone";
pub const OUTPUT: &str = "uscite";
pub const AREA: &str = "aree";

// ── Command verbs ───────────────────────────────────────────────────

pub const COMMAND_ON: &str = "on";
pub const COMMAND_OFF: &str = "off";
pub const COMMAND_ARM: &str = "ins";
pub const COMMAND_DISARM: &str = "dis";
