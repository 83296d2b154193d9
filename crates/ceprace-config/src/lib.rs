#![allow(clippy::must_use_candidate)]

mod duration;
mod env;
pub mod http;
mod loader;
pub mod provider;
pub mod race;

use indexmap::IndexMap;
use serde::Deserialize;

pub use http::*;
pub use provider::*;
pub use race::*;

/// Top-level ceprace configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Race selector configuration
    #[serde(default)]
    pub race: RaceConfig,
    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// CEP providers keyed by name, raced in declaration order
    #[serde(default = "provider::default_providers")]
    pub providers: IndexMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            race: RaceConfig::default(),
            http: HttpConfig::default(),
            providers: provider::default_providers(),
        }
    }
}

impl Config {
    /// Providers that take part in the race
    pub fn enabled_providers(&self) -> impl Iterator<Item = (&str, &ProviderConfig)> {
        self.providers
            .iter()
            .filter(|(_, provider)| provider.enabled)
            .map(|(name, provider)| (name.as_str(), provider))
    }
}
