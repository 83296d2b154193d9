use std::path::Path;

use url::Url;

use crate::{CEP_PLACEHOLDER, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;

        tracing::debug!(
            config_path = %path.display(),
            providers = config.providers.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Config::load`]
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is enabled, a URL template is
    /// malformed, or a timeout is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_providers()?;
        self.validate_provider_urls()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_has_providers(&self) -> anyhow::Result<()> {
        if self.enabled_providers().next().is_none() {
            anyhow::bail!("at least one enabled provider must be configured");
        }

        Ok(())
    }

    fn validate_provider_urls(&self) -> anyhow::Result<()> {
        for (name, provider) in self.enabled_providers() {
            let template = provider.url_template();

            if !template.contains(CEP_PLACEHOLDER) {
                anyhow::bail!("url for provider '{name}' must contain the {CEP_PLACEHOLDER} placeholder");
            }

            let sample = template.replace(CEP_PLACEHOLDER, "00000000");
            Url::parse(&sample).map_err(|e| anyhow::anyhow!("invalid url for provider '{name}': {e}"))?;
        }

        Ok(())
    }

    fn validate_timeouts(&self) -> anyhow::Result<()> {
        if self.race.timeout.is_zero() {
            anyhow::bail!("race.timeout must be greater than 0");
        }

        if self.http.request_timeout.is_zero() {
            anyhow::bail!("http.request_timeout must be greater than 0");
        }

        Ok(())
    }
}
