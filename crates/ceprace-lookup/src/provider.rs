pub mod brasil_api;
pub mod via_cep;

use std::marker::PhantomData;

use async_trait::async_trait;
use ceprace_config::CEP_PLACEHOLDER;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{cep::Cep, error::LookupError, types::Address};

/// Trait for CEP provider implementations
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Resolve a normalized CEP to the canonical address record
    async fn lookup(&self, cep: &Cep) -> crate::Result<Address>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Provider-specific JSON body that renames into an [`Address`]
pub trait WireShape: DeserializeOwned + Into<Address> + Send + 'static {
    /// Whether a successfully decoded body is the provider's "unknown CEP" marker
    fn is_not_found(&self) -> bool {
        false
    }
}

/// Provider adapter for any JSON-over-GET CEP API
///
/// Parameterized by a URL template containing `{cep}` and by the wire
/// shape `S` that carries the provider's field names.
pub struct JsonProvider<S> {
    client: Client,
    name: String,
    url_template: String,
    shape: PhantomData<fn() -> S>,
}

impl<S: WireShape> JsonProvider<S> {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            name: name.into(),
            url_template: url_template.into(),
            shape: PhantomData,
        }
    }

    /// Render the request URL for a normalized CEP
    pub fn url_for(&self, cep: &Cep) -> String {
        self.url_template.replace(CEP_PLACEHOLDER, cep.as_str())
    }

    fn transport_error(&self, e: &reqwest::Error) -> LookupError {
        let message = if e.is_timeout() {
            format!("request timed out: {e}")
        } else {
            e.to_string()
        };

        LookupError::TransportError {
            provider: self.name.clone(),
            message,
        }
    }
}

#[async_trait]
impl<S: WireShape> CepProvider for JsonProvider<S> {
    async fn lookup(&self, cep: &Cep) -> crate::Result<Address> {
        let url = self.url_for(cep);

        tracing::debug!(provider = %self.name, %url, "sending CEP lookup");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(provider = %self.name, error = %e, "CEP request failed");
            self.transport_error(&e)
        })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!(provider = %self.name, %status, "CEP provider returned an error");

            return Err(match status.as_u16() {
                404 => LookupError::NotFound {
                    provider: self.name.clone(),
                },
                status => LookupError::ProviderApiError {
                    provider: self.name.clone(),
                    status,
                    message,
                },
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(&e))?;

        let shape: S = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(provider = %self.name, error = %e, "failed to decode CEP response");
            LookupError::DecodeError {
                provider: self.name.clone(),
                message: e.to_string(),
            }
        })?;

        if shape.is_not_found() {
            return Err(LookupError::NotFound {
                provider: self.name.clone(),
            });
        }

        tracing::debug!(provider = %self.name, bytes = body.len(), "CEP lookup complete");

        Ok(shape.into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
