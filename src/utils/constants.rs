//! Shared constants and invariants

// Endpoint configuration is read from these variables when the config file has no `forward` block
pub const ENV_FORWARD_URL: &str = "DAVID_SLING_URL";
pub const ENV_FORWARD_KEY: &str = "DAVIDS_POUCH_KEY";

pub const DEFAULT_AUTH_HEADER: &str = "x-davids-pouch-key";
pub const DEFAULT_STORE_PATH: &str = "tokens.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const EMPTY_STORE: &str = "[]";

// relay: events stored/forwarded at the same time
pub const DEFAULT_MAX_IN_FLIGHT: usize = 32;
