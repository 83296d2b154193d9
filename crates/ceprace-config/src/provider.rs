use indexmap::IndexMap;
use serde::Deserialize;

/// Placeholder replaced by the normalized CEP in provider URL templates
pub const CEP_PLACEHOLDER: &str = "{cep}";

const DEFAULT_BRASIL_API_URL: &str = "https://brasilapi.com.br/api/cep/v1/{cep}";
const DEFAULT_VIA_CEP_URL: &str = "http://viacep.com.br/ws/{cep}/json/";

/// Configuration for a single CEP provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Response shape spoken by the provider
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// URL template override, must contain `{cep}`
    #[serde(default)]
    pub url: Option<String>,
    /// Whether the provider takes part in the race
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ProviderConfig {
    pub const fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            url: None,
            enabled: true,
        }
    }

    /// Configured URL template, or the provider's public endpoint
    pub fn url_template(&self) -> &str {
        self.url.as_deref().unwrap_or_else(|| self.provider_type.default_url())
    }
}

/// Supported CEP providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// `BrasilAPI` (`{cep, street, neighborhood, city, state}`)
    BrasilApi,
    /// `ViaCEP` (`{cep, logradouro, bairro, localidade, uf}`)
    ViaCep,
}

impl ProviderType {
    pub const fn default_url(self) -> &'static str {
        match self {
            Self::BrasilApi => DEFAULT_BRASIL_API_URL,
            Self::ViaCep => DEFAULT_VIA_CEP_URL,
        }
    }
}

/// Both public providers, `BrasilAPI` first
pub fn default_providers() -> IndexMap<String, ProviderConfig> {
    IndexMap::from([
        ("brasilapi".to_string(), ProviderConfig::new(ProviderType::BrasilApi)),
        ("viacep".to_string(), ProviderConfig::new(ProviderType::ViaCep)),
    ])
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}
