use std::{sync::Arc, time::Duration};

use ceprace_config::{FailurePolicy, ProviderType};
use tokio::{task::JoinSet, time::Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    cep::Cep,
    error::LookupError,
    http_client::http_client,
    provider::{CepProvider, JsonProvider, brasil_api::BrasilApiShape, via_cep::ViaCepShape},
    types::{Address, RaceOutcome},
};

/// Race selector: queries every provider at once and keeps the first address
pub struct Race {
    providers: Vec<Arc<dyn CepProvider>>,
    timeout: Duration,
    failure_policy: FailurePolicy,
}

impl Race {
    pub fn new(providers: Vec<Arc<dyn CepProvider>>, timeout: Duration, failure_policy: FailurePolicy) -> Self {
        Self {
            providers,
            timeout,
            failure_policy,
        }
    }

    /// Names of the racing providers, in spawn order
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|provider| provider.name())
    }

    /// Run the race to completion
    pub async fn run(&self, cep: &Cep) -> crate::Result<RaceOutcome> {
        self.run_until(cep, &CancellationToken::new()).await
    }

    /// Run the race, giving up early with [`LookupError::Interrupted`] when
    /// `shutdown` fires
    ///
    /// Every provider request is spawned on its own task. The first success
    /// wins and every other in-flight request is cancelled before this
    /// returns. Provider failures are handled according to the configured
    /// [`FailurePolicy`].
    pub async fn run_until(&self, cep: &Cep, shutdown: &CancellationToken) -> crate::Result<RaceOutcome> {
        if self.providers.is_empty() {
            return Err(LookupError::NoProviders);
        }

        let started = Instant::now();
        let deadline = started + self.timeout;

        // Fires on every exit path, including the early returns below
        let cancel = shutdown.child_token();
        let _cancel_on_exit = cancel.clone().drop_guard();

        let mut tasks = JoinSet::new();
        for provider in &self.providers {
            tasks.spawn(fetch(Arc::clone(provider), cep.clone(), cancel.clone()));
        }

        tracing::debug!(%cep, providers = self.providers.len(), "race started");

        let mut failures = Vec::new();

        loop {
            // Shutdown also cancels every fetch, so it must win over their completions
            let joined = tokio::select! {
                biased;

                () = shutdown.cancelled() => {
                    tracing::debug!(%cep, "race interrupted");
                    return Err(LookupError::Interrupted);
                }
                () = tokio::time::sleep_until(deadline) => {
                    tracing::warn!(%cep, timeout = ?self.timeout, pending = tasks.len(), "race timed out");
                    return Err(LookupError::RaceTimeout(self.timeout));
                }
                joined = tasks.join_next() => joined,
            };

            let Some(joined) = joined else {
                return Err(LookupError::AllProvidersFailed(failures));
            };

            // A fetch can observe the shutdown before this loop does
            if shutdown.is_cancelled() || matches!(joined, Ok((_, Err(LookupError::Cancelled { .. })))) {
                tracing::debug!(%cep, "race interrupted");
                return Err(LookupError::Interrupted);
            }

            let error = match joined {
                Ok((provider, Ok(address))) => {
                    let elapsed = started.elapsed();

                    tracing::info!(
                        %cep,
                        provider = %provider,
                        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                        losers = tasks.len(),
                        "race won"
                    );

                    return Ok(RaceOutcome {
                        provider,
                        address,
                        elapsed,
                    });
                }
                Ok((provider, Err(e))) => {
                    tracing::warn!(%cep, provider = %provider, error = %e, "provider dropped out of the race");
                    e
                }
                Err(e) => {
                    tracing::warn!(%cep, error = %e, "provider task failed");
                    LookupError::TaskFailed(e.to_string())
                }
            };

            match self.failure_policy {
                FailurePolicy::FailFast => return Err(error),
                FailurePolicy::FirstSuccess => failures.push(error),
            }
        }
    }
}

/// Single provider lookup that stops as soon as `cancel` fires
async fn fetch(
    provider: Arc<dyn CepProvider>,
    cep: Cep,
    cancel: CancellationToken,
) -> (String, crate::Result<Address>) {
    let name = provider.name().to_string();

    let result = tokio::select! {
        () = cancel.cancelled() => {
            tracing::debug!(provider = %name, "lookup cancelled");
            Err(LookupError::Cancelled { provider: name.clone() })
        }
        result = provider.lookup(&cep) => result,
    };

    (name, result)
}

/// Builder for constructing the race from configuration
pub struct RaceBuilder<'a> {
    config: &'a ceprace_config::Config,
}

impl<'a> RaceBuilder<'a> {
    pub const fn new(config: &'a ceprace_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::Result<Race> {
        let client = http_client(&self.config.http)?;
        let mut providers: Vec<Arc<dyn CepProvider>> = Vec::new();

        for (name, provider_config) in self.config.enabled_providers() {
            let url_template = provider_config.url_template();

            tracing::debug!(provider = %name, url = %url_template, "initializing CEP provider");

            let provider: Arc<dyn CepProvider> = match provider_config.provider_type {
                ProviderType::BrasilApi => Arc::new(JsonProvider::<BrasilApiShape>::new(
                    name,
                    url_template,
                    client.clone(),
                )),
                ProviderType::ViaCep => Arc::new(JsonProvider::<ViaCepShape>::new(name, url_template, client.clone())),
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            return Err(LookupError::NoProviders);
        }

        tracing::debug!("race initialized with {} provider(s)", providers.len());

        Ok(Race::new(
            providers,
            self.config.race.timeout,
            self.config.race.failure_policy,
        ))
    }
}
