use std::env;

/// Application-level constants
pub const APP_NAME: &str = "FonoTrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default REST backend, matching the local development server.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable selecting the backend target per deployment.
pub const API_BASE_URL_ENV: &str = "FONOTRACK_API_URL";

/// Transport ceiling for every gateway request, in seconds. Requests
/// still outstanding after this fail with a timeout error.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolve the backend base URL: the deployment override when set and
/// non-empty, otherwise the development default.
pub fn api_base_url() -> String {
    env::var(API_BASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info"
}
