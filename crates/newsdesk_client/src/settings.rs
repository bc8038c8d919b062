use std::time::Duration;

/// Header carrying the raw access token alongside `Authorization`.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
/// Header carrying the raw refresh token when one is stored.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";

/// One day. Media uploads over slow links can legitimately take hours and
/// requests cannot be cancelled, so the ceiling is kept deliberately high.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
