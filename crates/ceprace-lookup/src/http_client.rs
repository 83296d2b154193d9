use std::time::Duration;

use ceprace_config::HttpConfig;
use reqwest::{Client, header};

use crate::error::LookupError;

const DEFAULT_USER_AGENT: &str = concat!("ceprace/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by every provider in a race
///
/// The client-side timeout bounds each provider request on its own,
/// independently of the overall race deadline.
pub fn http_client(config: &HttpConfig) -> crate::Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    Client::builder()
        .timeout(config.request_timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .user_agent(user_agent)
        .default_headers(headers)
        .build()
        .map_err(|e| LookupError::ConfigError(format!("failed to build HTTP client: {e}")))
}
