use std::time::Duration;

use serde::Deserialize;

/// Outbound HTTP client configuration shared by every provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Client-side timeout applied to each provider request
    #[serde(default = "default_request_timeout", with = "crate::duration")]
    pub request_timeout: Duration,
    /// `User-Agent` header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: None,
        }
    }
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(1)
}
