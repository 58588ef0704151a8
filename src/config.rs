//! Client configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client is served as static assets behind a reverse proxy, so the API
//! base defaults to the relative `/api` prefix. Local development builds point
//! elsewhere by setting `DIGIBUDDY_API_BASE_URL` when compiling.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Persisted credential keys in browser storage.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

pub const LOGIN_PATH: &str = "/login";
pub const CHAT_PATH: &str = "/chat";

pub const LOGIN_URL_ENDPOINT: &str = "/auth/google/login/";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/me/";
pub const CHAT_ENDPOINT: &str = "/chat/";

/// Upper bound for a single chat exchange before it is treated as failed.
pub const CHAT_TIMEOUT_MS: u32 = 60_000;

/// Backend location for REST calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Build from `DIGIBUDDY_API_BASE_URL` captured at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("DIGIBUDDY_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Absolute-or-relative URL for an endpoint path such as `/chat/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
