//! Shared constants for the cabinet client.

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Interval between notification polls.
pub const NOTIFICATION_POLL_INTERVAL_SECS: u64 = 30;

/// Poll intervals below this produce a config warning.
pub const MIN_RECOMMENDED_POLL_SECS: u64 = 5;

/// Header carrying the session credential.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Minimum accepted length for a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Schema version written into CMS envelopes.
pub const CMS_SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "CABINET_HOME";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CABINET_API_URL";

/// Environment variable read by `login` when `--password` is omitted.
pub const PASSWORD_ENV: &str = "CABINET_PASSWORD";
